//! Image file conventions shared by the store and the edit client.

/// File extensions (lowercase, no dot) recognised as game images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// MIME type for a file extension (with or without a leading dot).
///
/// Only JPEG is distinguished; everything else -- including unknown
/// extensions -- is labelled `image/png`. This mislabelling of unknown
/// extensions is a deliberate simplification, not a sniffing routine.
pub fn mime_for_ext(ext: &str) -> &'static str {
    match ext.trim_start_matches('.').to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        _ => "image/png",
    }
}

/// Whether a filename looks like a game image, judged purely by
/// extension membership in [`IMAGE_EXTENSIONS`] (case-insensitive).
pub fn is_image_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Extension of a filename including the leading dot, lowercased.
/// Falls back to `.png` when there is no extension, matching the
/// upload path's default.
pub fn ext_with_dot(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => ".png".to_string(),
    }
}
