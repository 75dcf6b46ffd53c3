//! Handlers for the `/projects` resource.

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use nest_core::error::CoreError;
use nest_core::types::DbId;
use nest_db::models::project::Project;
use nest_db::repositories::ProjectRepo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::workflows::project::{
    create_project, delete_project, ImageUpload, PgProjectStore, ProjectSubmission,
};

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// POST /api/v1/projects
///
/// Multipart form: `title`, `category`, `description`, an optional `image`
/// file, and any number of `results` fields (order preserved; the legacy
/// `results[n]` field naming is accepted too).
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Project>)> {
    let submission = read_submission(&mut multipart).await?;
    let store = PgProjectStore { pool: &state.pool };
    let project = create_project(
        &store,
        state.blobs.as_ref(),
        Some(user.actor_id),
        submission,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let store = PgProjectStore { pool: &state.pool };
    delete_project(&store, state.blobs.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Collect the multipart fields of a project submission, in arrival order.
async fn read_submission(multipart: &mut Multipart) -> Result<ProjectSubmission, AppError> {
    let mut submission = ProjectSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => submission.title = Some(text(field).await?),
            "category" => submission.category = Some(text(field).await?),
            "description" => submission.description = Some(text(field).await?),
            "image" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                submission.image = Some(ImageUpload {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            n if n == "results" || n.starts_with("results[") => {
                submission.results.push(text(field).await?);
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(submission)
}

async fn text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
