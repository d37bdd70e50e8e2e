//! ID generation utilities.

use ulid::Ulid;

/// Length of every identifier produced by [`IdGenerator::generate`].
pub const ID_LENGTH: usize = 26;

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs are:
    /// - Lexicographically sortable
    /// - Monotonically increasing within the same millisecond
    /// - Exactly 26 alphanumeric characters
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}

/// Check whether `id` has the shape of a generated identifier.
///
/// Only the shape is checked: 26 ASCII letters or digits. Whether the
/// referenced user, channel or team exists is up to the caller.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| b.is_ascii_alphanumeric())
}
