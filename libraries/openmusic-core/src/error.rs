/// Core error types for the OpenMusic API
use thiserror::Error;

/// Result type alias using the core `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type shared by the storage layer and its callers.
///
/// The HTTP boundary maps each variant to a status code: `NotFound` to 404,
/// `PermissionDenied` to 403, `Duplicate` and `InvalidInput` to 400, and
/// everything else to a masked 500.
#[derive(Error, Debug)]
pub enum Error {
    /// Entity not found
    #[error("{entity} not found")]
    NotFound {
        /// Human-readable entity name ("Album", "Playlist", …)
        entity: &'static str,
        /// The identifier that failed to resolve
        id: String,
    },

    /// The requesting user may not perform this operation
    #[error("{0}")]
    PermissionDenied(String),

    /// A uniqueness invariant would be violated
    #[error("{0}")]
    Duplicate(String),

    /// Invalid input
    #[error("{0}")]
    InvalidInput(String),

    /// Database errors (for storage implementations)
    #[error("database error: {0}")]
    Database(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        // Unique-constraint violations surface as client errors: the
        // pair-uniqueness invariants on likes, collaborations, and
        // playlist songs are enforced by the database.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Duplicate("duplicate entry".to_string());
            }
        }
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity() {
        let err = Error::not_found("Album", "album-x");
        assert_eq!(err.to_string(), "Album not found");
    }

    #[test]
    fn client_error_messages_pass_through() {
        let err = Error::duplicate("You have already liked this album");
        assert_eq!(err.to_string(), "You have already liked this album");
    }
}
