//! Field validation helpers for form-style input.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Basic `local@domain.tld` shape: one `@`, no whitespace, a dot in the
/// domain part. Deliverability is the mail provider's problem.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// Require a non-blank text field, returning its trimmed value.
pub fn require_field<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!(
            "Missing required field: {name}"
        ))),
    }
}

/// Validate that `email` has a plausible address shape.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid email address: {email}"
        )))
    }
}

/// Drop blank entries from a list of result strings, preserving the order
/// of the survivors. Surviving entries keep their original whitespace.
pub fn filter_results<I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    entries
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .collect()
}
