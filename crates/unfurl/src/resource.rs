// ABOUTME: Bounded HTTP fetcher with browser-impersonating headers and SSRF protection.
// ABOUTME: Streams bodies up to a 2 MiB cap and decodes them with charset detection.

use std::collections::HashMap;
use std::net::IpAddr;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use ipnet::{Ipv4Net, Ipv6Net};

use crate::error::MetadataError;

/// Maximum body size read from a response (2 MiB). Longer bodies are
/// truncated silently rather than failing.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Browser-like User-Agent applied to every outbound fetch.
///
/// Some sites (e.g. behind Cloudflare) block obvious bot UAs from cloud IPs.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";

/// The rest of the browser-impersonating header profile.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("Accept-Language", "ja,en-US;q=0.9,en;q=0.8"),
    ("Cache-Control", "no-cache"),
    ("Pragma", "no-cache"),
];

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub allow_private_networks: bool,
}

/// Result of a completed fetch, successful status or not.
///
/// Non-200 statuses are not errors here; the orchestrator folds them into its
/// fallback-trigger logic.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as text, using the charset declared in the
    /// Content-Type header when present, detection otherwise.
    pub fn text(&self) -> String {
        if let Some(charset) = self.content_type.as_deref().and_then(header_charset) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(&self.body);
                return decoded.into_owned();
            }
        }
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(&self.body, true);
        let (decoded, _, _) = detector.guess(None, true).decode(&self.body);
        decoded.into_owned()
    }
}

/// Extract the charset parameter from a Content-Type header value.
fn header_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        if let Some(charset) = part.trim().strip_prefix("charset=") {
            return Some(charset.trim_matches('"').trim_matches('\'').to_string());
        }
    }
    None
}

/// Check if an IP address is in a private/reserved range.
pub fn is_private_ip(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(ip) => {
            let private_10: Ipv4Net = "10.0.0.0/8".parse().unwrap();
            let private_172: Ipv4Net = "172.16.0.0/12".parse().unwrap();
            let private_192: Ipv4Net = "192.168.0.0/16".parse().unwrap();
            let loopback: Ipv4Net = "127.0.0.0/8".parse().unwrap();
            let link_local: Ipv4Net = "169.254.0.0/16".parse().unwrap();

            private_10.contains(ip)
                || private_172.contains(ip)
                || private_192.contains(ip)
                || loopback.contains(ip)
                || link_local.contains(ip)
        }
        IpAddr::V6(ip) => {
            if ip.is_loopback() {
                return true;
            }
            let unique_local: Ipv6Net = "fc00::/7".parse().unwrap();
            let link_local: Ipv6Net = "fe80::/10".parse().unwrap();

            unique_local.contains(ip) || link_local.contains(ip)
        }
    }
}

/// Reject hosts that are, or resolve to, private/reserved addresses.
async fn check_host(url: &url::Url, original: &str) -> Result<(), MetadataError> {
    let Some(host) = url.host_str() else {
        return Ok(());
    };
    if let Ok(ip) = host.parse::<IpAddr>() {
        if is_private_ip(&ip) {
            return Err(MetadataError::ssrf(
                original,
                "Fetch",
                Some(anyhow::anyhow!("private IP addresses are not allowed")),
            ));
        }
        return Ok(());
    }
    let port = url
        .port()
        .unwrap_or(if url.scheme() == "https" { 443 } else { 80 });
    let addrs = tokio::net::lookup_host((host, port)).await.map_err(|e| {
        MetadataError::fetch(
            original,
            "Fetch",
            Some(anyhow::anyhow!("DNS lookup failed: {}", e)),
        )
    })?;
    for socket_addr in addrs {
        if is_private_ip(&socket_addr.ip()) {
            return Err(MetadataError::ssrf(
                original,
                "Fetch",
                Some(anyhow::anyhow!("private IP addresses are not allowed")),
            ));
        }
    }
    Ok(())
}

/// Perform a single GET with the browser header profile applied.
///
/// Returns body bytes (truncated at [`MAX_BODY_BYTES`]) together with the
/// response status, or an error if the request could not be sent or its body
/// could not be read. The caller bounds this with the operation deadline; the
/// client carries its own per-request timeout.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, MetadataError> {
    if url.is_empty() {
        return Err(MetadataError::invalid_url(url, "Fetch", None));
    }
    let parsed_url = url::Url::parse(url).map_err(|e| {
        MetadataError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(MetadataError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    if !opts.allow_private_networks {
        check_host(&parsed_url, url).await?;
    }

    let mut request = client.get(url);
    for (key, value) in BROWSER_HEADERS {
        request = request.header(*key, *value);
    }
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            MetadataError::timeout(url, "Fetch", Some(anyhow::anyhow!("request timed out: {}", e)))
        } else {
            MetadataError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", e)))
        }
    })?;

    // Re-check after redirects; the final host may differ from the requested one.
    if !opts.allow_private_networks {
        check_host(response.url(), url).await?;
    }

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let mut body = BytesMut::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            if e.is_timeout() {
                MetadataError::timeout(url, "Fetch", Some(anyhow::anyhow!("body read timed out: {}", e)))
            } else {
                MetadataError::fetch(
                    url,
                    "Fetch",
                    Some(anyhow::anyhow!("failed to read body: {}", e)),
                )
            }
        })?;
        let remaining = MAX_BODY_BYTES - body.len();
        if chunk.len() >= remaining {
            body.extend_from_slice(&chunk[..remaining]);
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(FetchResult {
        status,
        final_url,
        content_type,
        body: body.freeze(),
    })
}
