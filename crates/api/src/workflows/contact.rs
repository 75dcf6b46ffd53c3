//! Contact submission workflow.

use async_trait::async_trait;
use nest_core::error::CoreError;
use nest_core::validation::{require_field, validate_email};
use nest_db::models::contact_message::{ContactMessage, NewContactMessage};
use nest_db::repositories::ContactMessageRepo;
use nest_mailer::{ContactData, Notifier};
use serde::Deserialize;
use sqlx::PgPool;

/// Data-store operations the contact workflow depends on.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, input: &NewContactMessage) -> Result<ContactMessage, sqlx::Error>;
}

/// [`ContactStore`] backed by the Postgres repository layer.
pub struct PgContactStore<'a> {
    pub pool: &'a PgPool,
}

#[async_trait]
impl ContactStore for PgContactStore<'_> {
    async fn insert(&self, input: &NewContactMessage) -> Result<ContactMessage, sqlx::Error> {
        ContactMessageRepo::create(self.pool, input).await
    }
}

/// Raw contact form input, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Validate and persist a contact submission, then notify by email.
///
/// Both notification sends are strictly best-effort: their failures are
/// logged and never affect the persisted row or the returned result.
pub async fn submit_contact(
    store: &dyn ContactStore,
    notifier: &dyn Notifier,
    submission: ContactSubmission,
) -> Result<ContactMessage, CoreError> {
    let name = require_field("name", submission.name.as_deref())?;
    let email = require_field("email", submission.email.as_deref())?;
    let message = require_field("message", submission.message.as_deref())?;
    validate_email(email)?;

    let company = submission
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from);

    let input = NewContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        company,
        message: message.to_string(),
    };
    let saved = store
        .insert(&input)
        .await
        .map_err(|e| CoreError::Insert(format!("Error saving contact message: {e}")))?;

    if let Err(err) = notifier
        .send_user_confirmation(&saved.email, &saved.name)
        .await
    {
        tracing::warn!(to = %saved.email, error = %err, "Failed to send confirmation email");
    }

    let contact = ContactData {
        name: saved.name.clone(),
        email: saved.email.clone(),
        company: saved.company.clone(),
        message: saved.message.clone(),
        submitted_at: saved.created_at.to_rfc3339(),
    };
    if let Err(err) = notifier.send_admin_notification(&contact).await {
        tracing::warn!(error = %err, "Failed to send admin notification email");
    }

    Ok(saved)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
