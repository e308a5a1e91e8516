// ABOUTME: HTML tag extractor pulling title/description/image from meta-tag candidate chains.
// ABOUTME: Checks property then name attributes per key; first non-blank match wins per field.

use scraper::{Html, Selector};

use crate::metadata::Metadata;
use crate::resolve::resolve_maybe_relative;

/// Title candidate meta keys, before falling back to the `<title>` element.
const TITLE_KEYS: &[&str] = &["og:title", "twitter:title"];

/// Description candidate meta keys in priority order.
const DESCRIPTION_KEYS: &[&str] = &["og:description", "twitter:description", "description"];

/// Image candidate meta keys in priority order.
const IMAGE_KEYS: &[&str] = &[
    "og:image",
    "og:image:url",
    "twitter:image",
    "twitter:image:src",
];

/// Look up a meta tag's `content` by key, checking the `property` attribute
/// first, then `name`. Sites use either interchangeably.
fn meta_content(doc: &Html, key: &str) -> Option<String> {
    for attr in ["property", "name"] {
        let sel = match Selector::parse(&format!("meta[{}='{}']", attr, key)) {
            Ok(s) => s,
            Err(_) => continue,
        };
        for el in doc.select(&sel) {
            if let Some(content) = el.value().attr("content") {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}

/// First non-blank meta content across an ordered list of candidate keys.
fn first_meta(doc: &Html, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| meta_content(doc, key))
}

/// Trimmed text of the `<title>` element, if non-empty.
fn title_text(doc: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    let el = doc.select(&sel).next()?;
    let text = el.text().collect::<String>();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract title/description/image metadata from a fetched body.
///
/// The body is parsed tolerantly: malformed or truncated HTML yields whatever
/// tags still parse, and a non-HTML body simply produces empty fields. A found
/// image is resolved against `page_url` before being stored, so a non-empty
/// image is always an absolute URL.
pub fn extract_tags(body: &str, page_url: &str) -> Metadata {
    let doc = Html::parse_document(body);

    let title = first_meta(&doc, TITLE_KEYS)
        .or_else(|| title_text(&doc))
        .unwrap_or_default();
    let description = first_meta(&doc, DESCRIPTION_KEYS).unwrap_or_default();
    let image = first_meta(&doc, IMAGE_KEYS)
        .map(|raw| resolve_maybe_relative(page_url, &raw))
        .unwrap_or_default();

    Metadata {
        title,
        description,
        image,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE_URL: &str = "https://example.com/post/1";

    #[test]
    fn og_title_beats_twitter_and_title_element() {
        let html = r#"<html><head>
            <title>Element Title</title>
            <meta name="twitter:title" content="Twitter Title">
            <meta property="og:title" content="OG Title">
        </head></html>"#;
        let meta = extract_tags(html, PAGE_URL);
        assert_eq!(meta.title, "OG Title");
    }

    #[test]
    fn title_element_is_last_resort() {
        let html = "<html><head><title>  Element Title  </title></head></html>";
        let meta = extract_tags(html, PAGE_URL);
        assert_eq!(meta.title, "Element Title");
    }

    #[test]
    fn meta_key_matches_name_attribute_too() {
        let html = r#"<html><head>
            <meta name="og:title" content="Name Attr Title">
        </head></html>"#;
        let meta = extract_tags(html, PAGE_URL);
        assert_eq!(meta.title, "Name Attr Title");
    }

    #[test]
    fn blank_content_is_skipped_in_the_chain() {
        let html = r#"<html><head>
            <meta property="og:description" content="   ">
            <meta name="twitter:description" content="Twitter Desc">
        </head></html>"#;
        let meta = extract_tags(html, PAGE_URL);
        assert_eq!(meta.description, "Twitter Desc");
    }

    #[test]
    fn description_chain_order() {
        let html = r#"<html><head>
            <meta name="description" content="Generic">
            <meta name="twitter:description" content="Twitter">
        </head></html>"#;
        let meta = extract_tags(html, PAGE_URL);
        assert_eq!(meta.description, "Twitter");
    }

    #[test]
    fn image_chain_order() {
        let html = r#"<html><head>
            <meta name="twitter:image:src" content="https://example.com/d.png">
            <meta name="twitter:image" content="https://example.com/c.png">
            <meta property="og:image:url" content="https://example.com/b.png">
            <meta property="og:image" content="https://example.com/a.png">
        </head></html>"#;
        let meta = extract_tags(html, PAGE_URL);
        assert_eq!(meta.image, "https://example.com/a.png");
    }

    #[test]
    fn relative_image_is_resolved_against_page_url() {
        let html = r#"<html><head>
            <meta property="og:image" content="/img/cover.png">
        </head></html>"#;
        let meta = extract_tags(html, PAGE_URL);
        assert_eq!(meta.image, "https://example.com/img/cover.png");
    }

    #[test]
    fn non_html_body_yields_empty_fields() {
        let meta = extract_tags("Title: plain text rendering, no tags here", PAGE_URL);
        assert!(meta.is_blank());
    }

    #[test]
    fn truncated_html_keeps_tags_that_parsed() {
        // Cut off mid-tag past the description; title should survive.
        let html = r#"<html><head>
            <meta property="og:title" content="Survivor">
            <meta property="og:descri"#;
        let meta = extract_tags(html, PAGE_URL);
        assert_eq!(meta.title, "Survivor");
        assert_eq!(meta.description, "");
    }
}
