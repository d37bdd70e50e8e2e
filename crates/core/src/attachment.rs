//! Message attachments in the Slack-compatible webhook format.

use crate::serde_helpers::{
    lenient_bool, null_as_default, scalar_as_string, skip_null_objects,
};
use serde::{Deserialize, Serialize};

/// A rich content block attached to a webhook message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    /// Plain text summary for clients that cannot render attachments.
    #[serde(deserialize_with = "null_as_default")]
    pub fallback: String,
    /// Sidebar color, usually a hex code such as `#36a64f`.
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
    /// Text shown above the attachment.
    #[serde(deserialize_with = "null_as_default")]
    pub pretext: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author_link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author_icon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title_link: String,
    /// Main body of the attachment.
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    /// Table-like fields; `null` entries are dropped.
    #[serde(deserialize_with = "skip_null_objects")]
    pub fields: Vec<AttachmentField>,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumb_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub footer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub footer_icon: String,
    /// Epoch timestamp shown in the footer. Senders use both numbers and
    /// strings, so it is kept as text.
    #[serde(deserialize_with = "scalar_as_string")]
    pub ts: String,
}

/// A single title/value pair inside an [`Attachment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentField {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Numbers and booleans are accepted and stored in their textual form.
    #[serde(deserialize_with = "scalar_as_string")]
    pub value: String,
    /// Whether the field is narrow enough to sit next to another one.
    #[serde(deserialize_with = "lenient_bool")]
    pub short: bool,
}

impl Attachment {
    /// Whether the attachment carries nothing that could be displayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
