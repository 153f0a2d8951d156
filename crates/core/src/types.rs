/// Database primary keys (PostgreSQL BIGSERIAL) and identity-provider user ids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
