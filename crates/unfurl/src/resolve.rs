// ABOUTME: Relative-URL resolution for image references discovered during extraction.
// ABOUTME: Resolves against the originating page URL, falling back to the raw reference.

use url::Url;

/// Resolve a discovered reference against the URL it was found on.
///
/// Absolute references are returned unchanged. Relative references are joined
/// against the originating URL's base. If either URL fails to parse the
/// original reference is returned unresolved as a best-effort fallback; this
/// function never errors.
pub fn resolve_maybe_relative(page_url: &str, reference: &str) -> String {
    let reference = reference.trim();
    if reference.is_empty() {
        return String::new();
    }
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }
    match Url::parse(page_url).and_then(|base| base.join(reference)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => reference.to_string(),
    }
}
