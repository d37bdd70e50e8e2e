//! Decoded inbound webhook request.

use crate::attachment::Attachment;
use crate::serde_helpers::{null_as_default, skip_null_objects};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One inbound webhook invocation, decoded from its JSON payload.
///
/// Every key is optional. Overrides such as `username` or `channel` are
/// carried through untouched; deciding whether they are honored is up to the
/// component that posts the message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingWebhookRequest {
    /// Message body.
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    /// Username override.
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    /// Profile picture override.
    #[serde(deserialize_with = "null_as_default")]
    pub icon_url: String,
    /// Emoji used as profile picture override.
    #[serde(deserialize_with = "null_as_default")]
    pub icon_emoji: String,
    /// Target channel override, by name.
    #[serde(rename = "channel", deserialize_with = "null_as_default")]
    pub channel_name: String,
    /// Post type requested by the sender.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub post_type: String,
    /// Free-form properties attached to the resulting post.
    #[serde(deserialize_with = "null_as_default")]
    pub props: Map<String, Value>,
    /// Rich attachments; `null` entries are dropped.
    #[serde(deserialize_with = "skip_null_objects")]
    pub attachments: Vec<Attachment>,
}

impl IncomingWebhookRequest {
    /// Whether the request carries neither text nor attachments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.attachments.is_empty()
    }
}
