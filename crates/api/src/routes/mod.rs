//! Route definitions.

pub mod health;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{contact, email, project};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// GET    /projects               -> list (public)
/// POST   /projects               -> create (auth, multipart)
/// GET    /projects/{id}          -> get_by_id (public)
/// DELETE /projects/{id}          -> delete (auth)
///
/// POST   /contact                -> submit (public)
/// GET    /contact-messages       -> list (auth)
/// DELETE /contact-messages/{id}  -> delete (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{id}",
            get(project::get_by_id).delete(project::delete),
        )
        .route("/contact", post(contact::submit))
        .route("/contact-messages", get(contact::list))
        .route("/contact-messages/{id}", delete(contact::delete))
}

/// Routes mounted at `/api` outside the versioned tree.
///
/// The email dispatch endpoint keeps its fixed `/api/send-email` path so
/// the marketing frontend can call it directly.
pub fn dispatch_routes() -> Router<AppState> {
    Router::new().route("/send-email", post(email::send))
}
