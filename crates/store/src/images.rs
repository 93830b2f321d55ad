//! Base64 data-URL encoding of images for transport to clients.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use unveil_core::images::mime_for_ext;

/// Read an image file and encode it as a `data:<mime>;base64,<payload>`
/// URL for the frontend.
///
/// Returns `None` when the file is missing or unreadable -- the caller
/// decides whether a null image is acceptable. MIME type is judged by
/// extension only (see [`unveil_core::images::mime_for_ext`]).
pub async fn data_url(path: &Path) -> Option<String> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Image unreadable, returning null");
            return None;
        }
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let mime = mime_for_ext(ext);

    Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}
