//! Key derivation and URL mapping for uploaded project images.

use uuid::Uuid;

use crate::types::ActorId;

/// Prefix under which all project images are stored.
pub const PROJECT_IMAGE_PREFIX: &str = "project-images";

/// Fallback extension when the uploaded filename has none we can trust.
const DEFAULT_EXTENSION: &str = "bin";

/// Derive a storage key for a project image upload.
///
/// Keys embed the uploading actor's id plus a random UUID, so concurrent
/// uploads cannot collide, and keep the original file extension so the
/// public URL stays recognizable to browsers and CDNs.
pub fn project_image_key(owner: ActorId, filename: &str) -> String {
    let ext = file_extension(filename);
    format!("{PROJECT_IMAGE_PREFIX}/{owner}-{}.{ext}", Uuid::new_v4())
}

/// Recover the storage key (`project-images/{file}`) from a public URL.
///
/// Returns `None` when the URL's final path segments do not look like a
/// project-image key.
pub fn key_from_public_url(url: &str) -> Option<String> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let file = segments.next().filter(|f| !f.is_empty())?;
    let prefix = segments.next()?;
    (prefix == PROJECT_IMAGE_PREFIX).then(|| format!("{prefix}/{file}"))
}

/// Lowercase extension of `filename`, or [`DEFAULT_EXTENSION`] when the
/// name has no dot or the extension is not plain ASCII alphanumeric.
fn file_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}
