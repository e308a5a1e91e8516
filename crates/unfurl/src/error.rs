// ABOUTME: Error types for metadata extraction including ErrorCode enum and MetadataError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing different categories of extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Timeout,
    Ssrf,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Ssrf => "SSRF blocked",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for metadata extraction operations.
///
/// Only hard failures of the direct fetch surface through this type;
/// proxy-path failures and extraction shortfalls degrade into a
/// best-effort `Metadata`.
#[derive(Debug, thiserror::Error)]
pub struct MetadataError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unfurl: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl MetadataError {
    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidUrl,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Fetch,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Timeout,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an SSRF error.
    pub fn ssrf(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Ssrf,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is an SSRF error.
    pub fn is_ssrf(&self) -> bool {
        self.code == ErrorCode::Ssrf
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_url_and_code() {
        let err = MetadataError::fetch("https://example.com", "ExtractMetadata", None);
        let s = err.to_string();
        assert!(s.contains("ExtractMetadata"));
        assert!(s.contains("https://example.com"));
        assert!(s.contains("fetch error"));
    }

    #[test]
    fn display_includes_source() {
        let err = MetadataError::timeout(
            "https://example.com",
            "Fetch",
            Some(anyhow::anyhow!("deadline exceeded")),
        );
        assert!(err.to_string().contains("deadline exceeded"));
        assert!(err.is_timeout());
    }

    #[test]
    fn helpers_match_codes() {
        assert!(MetadataError::invalid_url("x", "op", None).is_invalid_url());
        assert!(MetadataError::ssrf("x", "op", None).is_ssrf());
        assert!(MetadataError::fetch("x", "op", None).is_fetch());
        assert!(!MetadataError::fetch("x", "op", None).is_timeout());
    }
}
