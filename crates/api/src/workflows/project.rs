//! Project creation and deletion workflows.
//!
//! Creation is the one place in the system where ordering across external
//! collaborators matters: the image upload strictly precedes the row
//! insert, and a failed insert triggers exactly one best-effort
//! compensating delete of the blob uploaded in the same invocation. A
//! row's `image` URL therefore never points at a blob that was not
//! successfully uploaded first.

use async_trait::async_trait;
use nest_core::blob;
use nest_core::error::CoreError;
use nest_core::types::{ActorId, DbId};
use nest_core::validation::{filter_results, require_field};
use nest_db::models::project::{NewProject, Project};
use nest_db::repositories::ProjectRepo;
use nest_storage::ObjectStore;
use sqlx::PgPool;

/// Data-store operations the project workflows depend on.
///
/// Implemented by [`PgProjectStore`] in production and by in-memory fakes
/// in tests.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert(&self, input: &NewProject) -> Result<Project, sqlx::Error>;
    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, sqlx::Error>;
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// [`ProjectStore`] backed by the Postgres repository layer.
pub struct PgProjectStore<'a> {
    pub pool: &'a PgPool,
}

#[async_trait]
impl ProjectStore for PgProjectStore<'_> {
    async fn insert(&self, input: &NewProject) -> Result<Project, sqlx::Error> {
        ProjectRepo::create(self.pool, input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        ProjectRepo::find_by_id(self.pool, id).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        ProjectRepo::delete(self.pool, id).await
    }
}

/// An image file attached to a project submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Raw form input for project creation, before validation.
#[derive(Debug, Clone, Default)]
pub struct ProjectSubmission {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageUpload>,
    /// Ordered result entries as submitted; blanks are filtered by the
    /// workflow.
    pub results: Vec<String>,
}

/// Create a project, uploading its cover image first if one was supplied.
///
/// Steps, in order:
/// 1. Reject when no authenticated actor is present.
/// 2. Validate required text fields before any external call.
/// 3. Upload the image (if present and non-empty) under a fresh key;
///    abort on upload failure with no row created.
/// 4. Insert the row, referencing the uploaded blob's public URL.
/// 5. On insert failure, issue one best-effort delete for the blob from
///    step 3; the insert error is what surfaces either way.
pub async fn create_project(
    store: &dyn ProjectStore,
    blobs: &dyn ObjectStore,
    actor: Option<ActorId>,
    submission: ProjectSubmission,
) -> Result<Project, CoreError> {
    let Some(actor) = actor else {
        return Err(CoreError::Unauthorized(
            "You must be logged in to create a project".into(),
        ));
    };

    let title = require_field("title", submission.title.as_deref())?;
    let category = require_field("category", submission.category.as_deref())?;
    let description = require_field("description", submission.description.as_deref())?;

    // Upload before insert, so the stored row can only ever reference a
    // blob that already exists.
    let mut uploaded_key: Option<String> = None;
    let mut image_url: Option<String> = None;
    if let Some(image) = submission.image.filter(|f| !f.bytes.is_empty()) {
        let key = blob::project_image_key(actor, &image.filename);
        blobs
            .upload(&key, image.bytes, &image.content_type)
            .await
            .map_err(|e| CoreError::Upload(format!("Error uploading image: {e}")))?;
        image_url = Some(blobs.public_url(&key));
        uploaded_key = Some(key);
    }

    let input = NewProject {
        title: title.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        image: image_url,
        results: filter_results(submission.results),
    };

    match store.insert(&input).await {
        Ok(project) => Ok(project),
        Err(insert_err) => {
            // Compensate: the row never materialized, so the blob uploaded
            // above must not be left behind. One attempt, unguarded; its
            // own failure is logged and the insert error still surfaces.
            if let Some(key) = uploaded_key {
                if let Err(delete_err) = blobs.delete(&key).await {
                    tracing::warn!(
                        %key,
                        error = %delete_err,
                        "Failed to clean up uploaded image after insert error"
                    );
                }
            }
            Err(CoreError::Insert(format!(
                "Error creating project: {insert_err}"
            )))
        }
    }
}

/// Delete a project row by id, then best-effort delete its image blob.
///
/// The blob cleanup never turns a successful row delete into an error.
pub async fn delete_project(
    store: &dyn ProjectStore,
    blobs: &dyn ObjectStore,
    id: DbId,
) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation("Invalid project ID".into()));
    }

    let project = store
        .find_by_id(id)
        .await
        .map_err(|e| CoreError::Delete(format!("Error deleting project: {e}")))?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id,
        })?;

    let deleted = store
        .delete(id)
        .await
        .map_err(|e| CoreError::Delete(format!("Error deleting project: {e}")))?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Project",
            id,
        });
    }

    // The row is gone; without this the blob would be orphaned forever.
    if let Some(key) = project
        .image
        .as_deref()
        .and_then(blob::key_from_public_url)
    {
        if let Err(err) = blobs.delete(&key).await {
            tracing::warn!(%key, error = %err, "Failed to delete image blob for removed project");
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
