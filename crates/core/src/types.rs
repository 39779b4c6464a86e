/// Row identifiers (BIGSERIAL).
pub type DbId = i64;

/// Stored and compared in UTC throughout.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
