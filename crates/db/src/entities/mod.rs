//! Database entities.

pub mod incoming_webhook;

pub use incoming_webhook::{
    ActiveModel as IncomingWebhookActiveModel, Entity as IncomingWebhook,
    Model as IncomingWebhookModel,
};
