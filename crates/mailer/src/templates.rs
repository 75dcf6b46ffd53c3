//! HTML bodies for the two notification emails.
//!
//! Inline styles only; all interpolated values are HTML-escaped.

use crate::ContactData;

const CONTAINER_STYLE: &str = "font-family:Inter,-apple-system,'Segoe UI',sans-serif;\
max-width:600px;margin:0 auto;background:#0f0f0f;color:#e5e5e5;\
border-radius:12px;padding:32px;";

const HEADING_STYLE: &str = "font-size:22px;font-weight:600;color:#ffffff;margin:0 0 16px 0;";

const BOX_STYLE: &str =
    "background:#1a1a1a;border:1px solid #333;border-radius:8px;padding:20px;margin:20px 0;";

const FOOTER_STYLE: &str = "font-size:12px;color:#71717a;margin-top:28px;";

/// Confirmation sent to the person who submitted the contact form.
pub fn user_confirmation(user_name: &str) -> String {
    let name = escape(user_name);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><body style=\"margin:0;padding:20px;background:#000;\">\
<div style=\"{CONTAINER_STYLE}\">\
<h2 style=\"{HEADING_STYLE}\">Thank you for reaching out!</h2>\
<p>Hi <strong>{name}</strong>,</p>\
<p>We've received your message and appreciate you taking the time to connect with us.</p>\
<div style=\"{BOX_STYLE}\">Our team typically responds within 24&ndash;48 hours.</div>\
<p>Best regards,<br><strong>The NEST Team</strong></p>\
<p style=\"{FOOTER_STYLE}\">This is an automated confirmation. Please do not reply to this email.</p>\
</div></body></html>"
    )
}

/// Alert sent to the admin addresses about a new contact submission.
pub fn admin_notification(contact: &ContactData) -> String {
    let name = escape(&contact.name);
    let email = escape(&contact.email);
    let company = escape(contact.company.as_deref().unwrap_or("\u{2014}"));
    let message = escape(&contact.message);
    let submitted_at = escape(&contact.submitted_at);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><body style=\"margin:0;padding:20px;background:#000;\">\
<div style=\"{CONTAINER_STYLE}\">\
<h2 style=\"{HEADING_STYLE}\">New contact form submission</h2>\
<div style=\"{BOX_STYLE}\">\
<p><strong>Name:</strong> {name}</p>\
<p><strong>Email:</strong> <a href=\"mailto:{email}\" style=\"color:#6366f1;\">{email}</a></p>\
<p><strong>Company:</strong> {company}</p>\
<p><strong>Submitted:</strong> {submitted_at}</p>\
</div>\
<div style=\"{BOX_STYLE}\"><p style=\"white-space:pre-wrap;margin:0;\">{message}</p></div>\
<p style=\"{FOOTER_STYLE}\">This notification was generated automatically from the contact form.</p>\
</div></body></html>"
    )
}

/// Minimal HTML escaping for interpolated text.
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
