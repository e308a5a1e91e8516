// ABOUTME: The main Client struct and the direct/proxy fallback orchestrator.
// ABOUTME: Runs one parametrized fetch+extract pipeline up to twice and merges the results.

use tokio::time::Instant;

use crate::challenge::looks_like_bot_challenge;
use crate::error::MetadataError;
use crate::extract::{html, text};
use crate::metadata::{Metadata, Source};
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, FetchOptions};

/// The main unfurl client for extracting link metadata.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.fetch_timeout)
                .redirect(reqwest::redirect::Policy::limited(5))
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });
        Self { opts, http_client }
    }

    /// Extract display metadata for a link.
    ///
    /// Fetches the target directly with browser-like headers and mines its
    /// OG/Twitter/fallback tags. When the direct attempt looks unsuccessful
    /// (non-200 status, bot-challenge title, or nothing extracted at all) the
    /// same pipeline runs once more through the reader proxy and the results
    /// are merged field by field, direct values winning unless empty.
    ///
    /// Errors only when the direct fetch cannot be completed at all; every
    /// content-level shortfall degrades into a best-effort record.
    pub async fn extract_metadata(&self, target_url: &str) -> Result<Metadata, MetadataError> {
        if target_url.is_empty() {
            return Err(MetadataError::invalid_url(target_url, "ExtractMetadata", None));
        }
        if url::Url::parse(target_url).is_err() {
            return Err(MetadataError::invalid_url(
                target_url,
                "ExtractMetadata",
                Some(anyhow::anyhow!("malformed URL")),
            ));
        }

        let deadline = Instant::now() + self.opts.overall_timeout;

        let (mut meta, status) = self.fetch_and_extract(target_url, deadline, false).await?;

        let challenged = looks_like_bot_challenge(&meta.title);
        if status == 200 && !challenged && !meta.is_blank() {
            meta.source = Source::Direct;
            return Ok(meta);
        }

        tracing::debug!(
            status,
            challenged,
            blank = meta.is_blank(),
            url = target_url,
            "direct fetch looked unsuccessful, trying reader proxy"
        );

        let proxy_url = format!("{}{}", self.opts.proxy_base, target_url);
        match self.fetch_and_extract(&proxy_url, deadline, true).await {
            Ok((fallback, _)) => {
                let mut merged = meta.merged_with(&fallback);
                merged.source = Source::Proxy;
                Ok(merged)
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    url = target_url,
                    "reader proxy fetch failed, keeping direct result"
                );
                meta.source = Source::Direct;
                Ok(meta)
            }
        }
    }

    /// One pass of the shared pipeline: bounded fetch, HTML tag extraction,
    /// and, on the proxy pass, the plain-text title/image supplement.
    async fn fetch_and_extract(
        &self,
        target: &str,
        deadline: Instant,
        text_supplement: bool,
    ) -> Result<(Metadata, u16), MetadataError> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(MetadataError::timeout(
                target,
                "ExtractMetadata",
                Some(anyhow::anyhow!("operation deadline exceeded")),
            ));
        }

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            allow_private_networks: self.opts.allow_private_networks,
        };
        let result = tokio::time::timeout(remaining, fetch(&self.http_client, target, &fetch_opts))
            .await
            .map_err(|_| {
                MetadataError::timeout(
                    target,
                    "ExtractMetadata",
                    Some(anyhow::anyhow!("operation deadline exceeded")),
                )
            })??;

        let body = result.text();
        let mut meta = html::extract_tags(&body, target);

        // Reader proxies return markdown/plain renderings the tag extractor
        // cannot see into; fill remaining blanks from the raw text.
        if text_supplement && meta.image.is_empty() {
            if meta.title.is_empty() {
                if let Some(title) = text::extract_title(&body) {
                    meta.title = title;
                }
            }
            if let Some(image) = text::extract_image_url(&body) {
                meta.image = image;
            }
        }

        Ok((meta, result.status))
    }
}
