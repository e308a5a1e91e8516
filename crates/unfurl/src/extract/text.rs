// ABOUTME: Plain-text extractor for reader-proxy markdown/plain renderings.
// ABOUTME: Finds a "Title:" line and image URLs via markdown-image then bare-URL patterns.

use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown-style image reference; the capture is the embedded URL.
static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\((https?://[^)\s]+)\)").unwrap());

/// Bare absolute image URL with a known extension and optional query string.
static BARE_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s)]+?\.(?:png|jpe?g|webp)(?:\?[^\s)]*)?").unwrap());

/// Find the first line beginning with a literal `Title:` prefix and return the
/// remainder, trimmed. Reader proxies put the page title on such a line.
pub fn extract_title(text: &str) -> Option<String> {
    for line in text.lines() {
        if let Some(rest) = line.trim().strip_prefix("Title:") {
            let rest = rest.trim();
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}

/// Find the first image URL in raw response text.
///
/// The markdown-image pattern is tried first, then the bare-URL pattern;
/// trailing `)` characters are stripped from either match.
pub fn extract_image_url(text: &str) -> Option<String> {
    if let Some(caps) = MARKDOWN_IMAGE_RE.captures(text) {
        return Some(caps[1].trim_end_matches(')').to_string());
    }
    BARE_IMAGE_RE
        .find(text)
        .map(|m| m.as_str().trim_end_matches(')').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_line_is_found_and_trimmed() {
        let text = "URL Source: https://example.com\n  Title:  My Great Article  \n\nBody";
        assert_eq!(extract_title(text), Some("My Great Article".to_string()));
    }

    #[test]
    fn missing_or_empty_title_line_yields_none() {
        assert_eq!(extract_title("no title here"), None);
        assert_eq!(extract_title("Title:   \nmore text"), None);
    }

    #[test]
    fn markdown_image_wins_over_bare_url() {
        let text = concat!(
            "Title: My Great Article\n",
            "see https://cdn.example.com/other.png and\n",
            "![alt](https://cdn.example.com/a.jpg)\n",
        );
        assert_eq!(
            extract_image_url(text),
            Some("https://cdn.example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn bare_url_is_fallback() {
        let text = "intro https://cdn.example.com/pic.jpeg?w=800 outro";
        assert_eq!(
            extract_image_url(text),
            Some("https://cdn.example.com/pic.jpeg?w=800".to_string())
        );
    }

    #[test]
    fn bare_url_requires_image_extension() {
        assert_eq!(extract_image_url("https://example.com/page.html"), None);
        assert_eq!(
            extract_image_url("https://example.com/p.webp"),
            Some("https://example.com/p.webp".to_string())
        );
    }

    #[test]
    fn trailing_paren_is_stripped() {
        let text = "(see https://cdn.example.com/a.png)";
        assert_eq!(
            extract_image_url(text),
            Some("https://cdn.example.com/a.png".to_string())
        );
    }

    #[test]
    fn no_match_yields_none() {
        assert_eq!(extract_image_url("plain text without images"), None);
    }
}
