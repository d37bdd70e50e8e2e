//! Tolerant decoder for inbound webhook payloads.

use crate::request::IncomingWebhookRequest;
use hooks_common::{AppError, AppResult, IncomingWebhookConfig, json};
use std::io::Read;

/// Decodes raw webhook payloads into [`IncomingWebhookRequest`]s.
///
/// The decoder holds no state besides its options, so a single instance can
/// be shared freely between threads.
#[derive(Debug, Clone)]
pub struct RequestDecoder {
    repair_control_chars: bool,
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RequestDecoder {
    /// Create a new decoder.
    ///
    /// With `repair_control_chars`, a payload rejected because of raw control
    /// characters inside string literals is escaped and parsed once more.
    #[must_use]
    pub const fn new(repair_control_chars: bool) -> Self {
        Self {
            repair_control_chars,
        }
    }

    /// Create a decoder from configuration.
    #[must_use]
    pub const fn from_config(config: &IncomingWebhookConfig) -> Self {
        Self::new(config.repair_control_chars)
    }

    /// Decode a payload held in memory.
    ///
    /// The document and every attachment and field inside it must be JSON
    /// objects; `null` entries in arrays are the only tolerated exception.
    pub fn decode(&self, payload: &[u8]) -> AppResult<IncomingWebhookRequest> {
        match json::object_from_slice(payload) {
            Ok(request) => Ok(request),
            Err(err) if self.repair_control_chars && err.is_syntax() => {
                let Some(repaired) = escape_control_chars(payload) else {
                    return Err(malformed(&err));
                };
                tracing::debug!(
                    error = %err,
                    "Retrying webhook payload with escaped control characters"
                );
                json::object_from_slice(&repaired).map_err(|e| malformed(&e))
            }
            Err(err) => Err(malformed(&err)),
        }
    }

    /// Read a payload to the end and decode it.
    ///
    /// The caller is responsible for bounding the size of `reader`.
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> AppResult<IncomingWebhookRequest> {
        let mut payload = Vec::new();
        reader
            .read_to_end(&mut payload)
            .map_err(|e| AppError::MalformedPayload(format!("failed to read payload: {e}")))?;
        self.decode(&payload)
    }
}

/// Decode a payload with the default decoder.
pub fn decode_request(payload: &[u8]) -> AppResult<IncomingWebhookRequest> {
    RequestDecoder::default().decode(payload)
}

fn malformed(err: &serde_json::Error) -> AppError {
    AppError::MalformedPayload(err.to_string())
}

/// Escape raw control characters that appear inside JSON string literals.
///
/// Bytes outside string literals are copied as they are, so whitespace
/// between tokens keeps its meaning. Returns `None` when nothing needed
/// escaping.
fn escape_control_chars(payload: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(payload.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    let mut changed = false;

    for &byte in payload {
        if !in_string {
            in_string = byte == b'"';
            out.push(byte);
            continue;
        }
        if escaped {
            escaped = false;
            out.push(byte);
            continue;
        }

        match byte {
            b'\\' => {
                escaped = true;
                out.push(byte);
            }
            b'"' => {
                in_string = false;
                out.push(byte);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0c => out.extend_from_slice(b"\\f"),
            0x00..=0x1f => out.extend_from_slice(format!("\\u{byte:04x}").as_bytes()),
            _ => {
                out.push(byte);
                continue;
            }
        }

        if byte < 0x20 {
            changed = true;
        }
    }

    changed.then_some(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_only_inside_strings() {
        let payload = b"{\n\t\"text\": \"a\nb\tc\"\n}";
        let repaired = escape_control_chars(payload).unwrap();
        assert_eq!(repaired, b"{\n\t\"text\": \"a\\nb\\tc\"\n}".to_vec());
    }

    #[test]
    fn test_escape_respects_escaped_quotes() {
        let payload = b"{\"text\": \"say \\\"hi\n\\\" now\"}";
        let repaired = escape_control_chars(payload).unwrap();
        assert_eq!(repaired, b"{\"text\": \"say \\\"hi\\n\\\" now\"}".to_vec());
    }

    #[test]
    fn test_escape_other_control_chars() {
        let repaired = escape_control_chars(b"[\"\x01\x08\x0c\r\"]").unwrap();
        assert_eq!(repaired, b"[\"\\u0001\\b\\f\\r\"]".to_vec());
    }

    #[test]
    fn test_escape_nothing_to_do() {
        assert!(escape_control_chars(b"{\n  \"text\": \"plain\"\n}").is_none());
    }

    #[test]
    fn test_repair_can_be_disabled() {
        let payload = b"{\"text\": \"line one\nline two\"}";

        let strict = RequestDecoder::new(false).decode(payload).unwrap_err();
        assert!(matches!(strict, AppError::MalformedPayload(_)));

        let lenient = RequestDecoder::default().decode(payload).unwrap();
        assert_eq!(lenient.text, "line one\nline two");
    }

    #[test]
    fn test_from_config() {
        let config = IncomingWebhookConfig {
            repair_control_chars: false,
        };
        let decoder = RequestDecoder::from_config(&config);
        assert!(decoder.decode(b"{\"text\": \"a\tb\"}").is_err());
    }

    #[test]
    fn test_decode_reader() {
        let request = RequestDecoder::default()
            .decode_reader(&b"{\"text\":\"from a reader\"}"[..])
            .unwrap();
        assert_eq!(request.text, "from a reader");
    }
}
