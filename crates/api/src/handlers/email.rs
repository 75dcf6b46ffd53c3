//! Handler for the `/api/send-email` dispatch endpoint.
//!
//! This is the one bespoke wire protocol in the system and it is
//! intentionally minimal: tagged JSON in, `{success, messageId}` out, no
//! auth and no idempotency key.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use nest_mailer::{ContactData, MailError};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::state::AppState;

/// Wire format of a dispatch request.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SendEmailRequest {
    /// Confirmation to the person who submitted the contact form.
    #[serde(rename_all = "camelCase")]
    UserConfirmation { to: String, user_name: String },
    /// Alert to the configured admin addresses.
    #[serde(rename_all = "camelCase")]
    AdminNotification { contact_data: ContactData },
}

/// Successful dispatch response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message_id: String,
}

/// POST /api/send-email
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, (StatusCode, Json<serde_json::Value>)> {
    let result = match &request {
        SendEmailRequest::UserConfirmation { to, user_name } => {
            state.notifier.send_user_confirmation(to, user_name).await
        }
        SendEmailRequest::AdminNotification { contact_data } => {
            state.notifier.send_admin_notification(contact_data).await
        }
    };

    match result {
        Ok(message_id) => Ok(Json(SendEmailResponse {
            success: true,
            message_id,
        })),
        Err(err) => {
            tracing::error!(error = %err, "Email dispatch failed");
            let status = match err {
                MailError::Address(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(json!({ "error": err.to_string() }))))
        }
    }
}
