/// BIGSERIAL surrogate keys (translation and association rows).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
