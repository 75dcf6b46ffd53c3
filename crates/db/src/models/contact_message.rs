//! Contact message entity model and DTOs.

use nest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A contact submission row from the `contact_messages` table.
///
/// Immutable after insert, except for deletion by an admin.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    /// Server timestamp at insert time.
    pub created_at: Timestamp,
}

/// DTO for inserting a new contact message.
#[derive(Debug, Clone, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
}
