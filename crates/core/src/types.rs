/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Actor identifiers are issued by the hosted auth provider as UUIDs.
pub type ActorId = uuid::Uuid;
