//! Handlers for the public contact form and the admin message list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nest_core::error::CoreError;
use nest_core::types::DbId;
use nest_db::models::contact_message::ContactMessage;
use nest_db::repositories::ContactMessageRepo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::workflows::contact::{submit_contact, ContactSubmission, PgContactStore};

/// POST /api/v1/contact
///
/// Public endpoint behind the marketing site's contact form. Validation
/// failures come back as structured 400s; notification sends are
/// best-effort and never affect the response.
pub async fn submit(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> AppResult<(StatusCode, Json<ContactMessage>)> {
    let store = PgContactStore { pool: &state.pool };
    let message = submit_contact(&store, state.notifier.as_ref(), submission).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/contact-messages
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<ContactMessage>>> {
    let messages = ContactMessageRepo::list(&state.pool).await?;
    Ok(Json(messages))
}

/// DELETE /api/v1/contact-messages/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ContactMessageRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }))
    }
}
