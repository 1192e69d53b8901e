/// ID types for OpenMusic entities
///
/// Every persisted row is keyed by a prefixed opaque string
/// (`album-1f0c…`) rather than a sequential integer, so identifiers never
/// leak insertion order or row counts.
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Random row id with the given prefix, e.g. `like-1f0c…`.
///
/// Used for join-table rows (likes, activities, playlist songs) whose ids
/// never appear in API responses.
pub fn prefixed_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random id with the entity prefix
            pub fn generate() -> Self {
                Self(prefixed_id($prefix))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> std::result::Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
                Ok(Self(<String as sqlx::Decode<'r, sqlx::Postgres>>::decode(
                    value,
                )?))
            }
        }
    };
}

entity_id!(
    /// Album identifier
    AlbumId,
    "album"
);

entity_id!(
    /// Song identifier
    SongId,
    "song"
);

entity_id!(
    /// User identifier
    UserId,
    "user"
);

entity_id!(
    /// Playlist identifier
    PlaylistId,
    "playlist"
);

entity_id!(
    /// Collaboration identifier
    CollaborationId,
    "collab"
);
