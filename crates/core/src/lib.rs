//! Inbound webhook payload interpretation.
//!
//! Turns loosely-typed JSON posted by third parties in the Slack-compatible
//! attachment format into an [`IncomingWebhookRequest`].
//!
//! # Tolerance
//!
//! - `null` entries in `attachments` and in each attachment's `fields` are
//!   dropped, independently at every level
//! - missing or `null` scalars decode to their empty value
//! - raw control characters inside string literals are escaped and the
//!   payload retried (see [`RequestDecoder::new`])
//!
//! Anything else that is not well-formed JSON of the expected shape is
//! reported as [`AppError::MalformedPayload`](hooks_common::AppError::MalformedPayload).
//!
//! # Example
//!
//! ```
//! use hooks_core::decode_request;
//!
//! let payload = br#"{"text":"deployed","attachments":[{"fields":[null]}, null]}"#;
//! let request = decode_request(payload).unwrap();
//! assert_eq!(request.text, "deployed");
//! assert_eq!(request.attachments.len(), 1);
//! assert!(request.attachments[0].fields.is_empty());
//! ```

pub mod attachment;
pub mod decoder;
pub mod request;
mod serde_helpers;

pub use attachment::{Attachment, AttachmentField};
pub use decoder::{RequestDecoder, decode_request};
pub use request::IncomingWebhookRequest;
