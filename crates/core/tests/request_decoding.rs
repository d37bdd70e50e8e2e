//! End-to-end decoding of Slack-compatible webhook payloads.

#![allow(clippy::unwrap_used)]

use hooks_common::AppError;
use hooks_core::{IncomingWebhookRequest, RequestDecoder, decode_request};

fn sample_payload(text: &str) -> String {
    format!(
        r##"{{
        "text": "{text}",
        "attachments": [
            {{
                "fallback": "{text}",

                "color": "#36a64f",

                "pretext": "{text}",

                "author_name": "{text}",
                "author_link": "http://flickr.com/bobby/",
                "author_icon": "http://flickr.com/icons/bobby.jpg",

                "title": "{text}",
                "title_link": "https://api.slack.com/",

                "text": "{text}",

                "fields": [
                    {{
                        "title": "{text}",
                        "value": "{text}",
                        "short": false
                    }}
                ],

                "image_url": "http://my-website.com/path/to/image.jpg",
                "thumb_url": "http://example.com/path/to/thumb.png"
            }}
        ]
    }}"##
    )
}

#[test]
fn test_text_escapes_and_whitespace() {
    // Raw JSON fragments: `\"` is an escaped quote, the newlines and tabs are
    // literal characters inside the string.
    let texts = [
        "this is a test",
        "this is a test\n\t\t\tthat contains a newline and tabs",
        "this is a test \\\"foo\n\t\t\tthat contains a newline and tabs",
        "this is a test \\\"foo\\\"\n\t\t\tthat contains a newline and tabs",
        "this is a test \\\"foo\\\"\n\t\t\\\"\t\t\tthat contains a newline and tabs",
        "this is a test \\\"foo\\\"\n\n\t\t\\\"\t\t\tthat contains a newline and tabs\n\t\t",
    ];

    for text in texts {
        let request = decode_request(sample_payload(text).as_bytes()).unwrap();

        let expected = text.replace("\\\"", "\"");
        assert_eq!(request.text, expected);

        let attachment = &request.attachments[0];
        assert_eq!(attachment.text, expected);
        assert_eq!(attachment.fallback, expected);
        assert_eq!(attachment.pretext, expected);
        assert_eq!(attachment.author_name, expected);
        assert_eq!(attachment.title, expected);
        assert_eq!(attachment.fields[0].title, expected);
        assert_eq!(attachment.fields[0].value, expected);
        assert_eq!(attachment.color, "#36a64f");
    }
}

#[test]
fn test_null_array_items() {
    let payload =
        br#"{"attachments":[{"fields":[{"title":"foo","value":"bar","short":true}, null]}, null]}"#;

    let request = decode_request(payload).unwrap();

    assert_eq!(request.attachments.len(), 1);
    assert_eq!(request.attachments[0].fields.len(), 1);
    assert_eq!(request.attachments[0].fields[0].title, "foo");
    assert!(request.attachments[0].fields[0].short);
}

#[test]
fn test_null_fields_do_not_leak_between_attachments() {
    let payload = br#"{
        "attachments": [
            null,
            {"title": "first", "fields": [null, null]},
            {"title": "second", "fields": [{"title": "a"}, null, {"title": "b"}]},
            null,
            {"title": "third", "fields": null}
        ]
    }"#;

    let request = decode_request(payload).unwrap();

    let titles: Vec<&str> = request
        .attachments
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert!(request.attachments[0].fields.is_empty());
    assert_eq!(request.attachments[1].fields.len(), 2);
    assert_eq!(request.attachments[1].fields[1].title, "b");
    assert!(request.attachments[2].fields.is_empty());
}

#[test]
fn test_missing_and_null_keys_take_empty_values() {
    let request = decode_request(b"{}").unwrap();
    assert_eq!(request, IncomingWebhookRequest::default());
    assert!(request.is_empty());

    let request = decode_request(
        br#"{"text":null,"username":null,"icon_url":null,"channel":null,"props":null,"attachments":null}"#,
    )
    .unwrap();
    assert!(request.is_empty());
}

#[test]
fn test_overrides_and_props() {
    let request = decode_request(
        br#"{
            "text": "hello",
            "username": "robot",
            "icon_url": "https://example.com/robot.png",
            "icon_emoji": ":robot:",
            "channel": "town-square",
            "type": "custom_alert",
            "props": {"card": "details", "priority": 2}
        }"#,
    )
    .unwrap();

    assert_eq!(request.username, "robot");
    assert_eq!(request.icon_url, "https://example.com/robot.png");
    assert_eq!(request.icon_emoji, ":robot:");
    assert_eq!(request.channel_name, "town-square");
    assert_eq!(request.post_type, "custom_alert");
    assert_eq!(request.props["card"], "details");
    assert!(!request.is_empty());
}

#[test]
fn test_malformed_payloads() {
    let cases: [&[u8]; 7] = [
        b"",
        b"{\"text\": \"unterminated",
        b"{\"text\": \"a\"",
        b"[]",
        b"null",
        b"{\"text\": 12}",
        b"{\"attachments\": {\"text\": \"not an array\"}}",
    ];

    for payload in cases {
        let err = decode_request(payload).unwrap_err();
        assert!(
            matches!(err, AppError::MalformedPayload(_)),
            "expected malformed payload for {:?}",
            String::from_utf8_lossy(payload)
        );
    }
}

#[test]
fn test_null_attachment_is_not_an_error_but_scalar_attachment_is() {
    assert!(decode_request(br#"{"attachments":[null]}"#).is_ok());
    assert!(decode_request(br#"{"attachments":["text"]}"#).is_err());
}

#[test]
fn test_arrays_never_stand_in_for_objects() {
    let cases: [&[u8]; 5] = [
        br#"["hi"]"#,
        br#"[["hi"]]"#,
        br#"{"attachments":[["t"]]}"#,
        br#"{"attachments":[{"fields":[["a","b",true]]}]}"#,
        br#"{"attachments":[null, {"fields":[null, []]}]}"#,
    ];

    for payload in cases {
        let err = decode_request(payload).unwrap_err();
        assert!(
            matches!(err, AppError::MalformedPayload(_)),
            "expected malformed payload for {:?}",
            String::from_utf8_lossy(payload)
        );
    }
}

#[test]
fn test_repair_retries_once_then_surfaces_the_error() {
    let cases: [&[u8]; 4] = [
        // Raw newline repaired, but the closing brace is still missing.
        b"{\"text\":\"a\nb\"",
        // Raw newline repaired, then a type mismatch further in.
        b"{\"text\":\"a\nb\",\"attachments\":[{\"title\":12}]}",
        // Backslash before a raw newline is an invalid escape either way.
        b"{\"text\":\"a\\\nb\"}",
        b"{\"text\":\"a\\\nb\tc\"}",
    ];

    for payload in cases {
        let err = decode_request(payload).unwrap_err();
        assert!(
            matches!(err, AppError::MalformedPayload(_)),
            "expected malformed payload for {:?}",
            String::from_utf8_lossy(payload)
        );
    }
}

#[test]
fn test_decoder_is_shareable_across_threads() {
    let decoder = RequestDecoder::default();

    std::thread::scope(|scope| {
        for i in 0..4 {
            let decoder = &decoder;
            scope.spawn(move || {
                let payload = format!(r#"{{"text":"worker {i}"}}"#);
                let request = decoder.decode(payload.as_bytes()).unwrap();
                assert_eq!(request.text, format!("worker {i}"));
            });
        }
    });
}
