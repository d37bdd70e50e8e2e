//! Common utilities and shared types for inbound webhooks.
//!
//! This crate provides foundational components used across all hooks crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based identifiers via [`IdGenerator`] and the
//!   shape check [`is_valid_id`]
//! - **JSON**: Object-only decoding via [`json::object_from_slice`]
//! - **Clock**: Millisecond timestamps via [`now_millis`]
//! - **Telemetry**: Tracing subscriber setup via [`telemetry::init`]
//!
//! # Example
//!
//! ```no_run
//! use hooks_common::{AppResult, Config, IdGenerator, is_valid_id};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     hooks_common::telemetry::init(&config.logging)?;
//!     let id = IdGenerator::new().generate();
//!     assert!(is_valid_id(&id));
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod json;
pub mod telemetry;

pub use clock::now_millis;
pub use config::{Config, DatabaseConfig, IncomingWebhookConfig, LoggingConfig};
pub use error::{AppError, AppResult};
pub use id::{ID_LENGTH, IdGenerator, is_valid_id};
