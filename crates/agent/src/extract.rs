//! JSON array extraction from accumulated chat output.
//!
//! The chat agent is asked for pure JSON but routinely wraps it in
//! markdown code fences or surrounds it with prose. Extraction strips
//! the fences and takes the first `[ { ... } ]` span; anything short
//! of a parseable array is a failure with no partial recovery.

use std::sync::LazyLock;

use regex::Regex;

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?").expect("valid regex"));

static JSON_ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\{[\s\S]*\}\s*\]").expect("valid regex"));

/// Extract the first JSON array of objects from `content`.
///
/// Markdown code-fence markers are removed first, then the first
/// `[ { ... } ]` span is taken. Returns the raw array text (not yet
/// parsed), or `None` when no such span exists.
pub fn extract_json_array(content: &str) -> Option<String> {
    if content.is_empty() {
        return None;
    }

    let cleaned = CODE_FENCE_RE.replace_all(content, "");
    JSON_ARRAY_RE
        .find(&cleaned)
        .map(|m| m.as_str().trim().to_owned())
}
