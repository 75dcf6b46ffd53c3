//! Project entity model and DTOs.

use nest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Public URL of the uploaded cover image, if one was supplied.
    pub image: Option<String>,
    /// Free-text result metrics, insertion order preserved.
    pub results: Vec<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new project.
///
/// Fields are validated (and `results` filtered) by the creation workflow
/// before this struct is constructed.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub results: Vec<String>,
}
