// ABOUTME: Bot-challenge classifier that inspects extracted page titles.
// ABOUTME: Detects anti-bot interstitial phrasing as one of the proxy fallback triggers.

/// Phrases that mark a title as an anti-bot interstitial (matched
/// case-insensitively as substrings).
///
/// Sites behind Cloudflare may return "Just a moment..." pages to cloud IPs
/// even with a browser UA, resulting in empty OG tags.
const CHALLENGE_MARKERS: &[&str] = &["just a moment", "attention required", "cloudflare"];

/// Returns true if the title looks like a bot-challenge page.
///
/// Used only as a fallback trigger, never to reject a result outright.
pub fn looks_like_bot_challenge(title: &str) -> bool {
    let t = title.trim().to_lowercase();
    CHALLENGE_MARKERS.iter().any(|marker| t.contains(marker))
}
