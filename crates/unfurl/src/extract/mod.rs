// ABOUTME: Extraction strategies for link metadata.
// ABOUTME: html handles OG/Twitter/fallback meta tags; text mines reader-proxy renderings.

pub mod html;
pub mod text;
