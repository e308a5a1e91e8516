// ABOUTME: Configuration options for the unfurl client and a fluent ClientBuilder.
// ABOUTME: Covers the two time budgets, proxy base, user agent, and extra headers.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;
use crate::resource::BROWSER_USER_AGENT;

/// Default base of the reader proxy; the target URL is appended verbatim.
pub const DEFAULT_PROXY_BASE: &str = "https://r.jina.ai/";

/// Configuration options for the unfurl client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Overall deadline for one extraction call, covering both fetches.
    pub overall_timeout: Duration,
    /// Per-request timeout applied at the HTTP client level.
    pub fetch_timeout: Duration,
    pub user_agent: String,
    pub proxy_base: String,
    pub allow_private_networks: bool,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            overall_timeout: Duration::from_secs(15),
            fetch_timeout: Duration::from_secs(10),
            user_agent: BROWSER_USER_AGENT.to_string(),
            proxy_base: DEFAULT_PROXY_BASE.to_string(),
            allow_private_networks: false,
            headers: HashMap::new(),
            http_client: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall deadline for one extraction call.
    pub fn overall_timeout(mut self, timeout: Duration) -> Self {
        self.opts.overall_timeout = timeout;
        self
    }

    /// Set the per-request HTTP timeout.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.opts.fetch_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the reader-proxy base URL.
    pub fn proxy_base(mut self, base: impl Into<String>) -> Self {
        self.opts.proxy_base = base.into();
        self
    }

    /// Allow or disallow requests to private networks.
    pub fn allow_private_networks(mut self, allow: bool) -> Self {
        self.opts.allow_private_networks = allow;
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}
