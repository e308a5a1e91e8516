// ABOUTME: Main library entry point for the unfurl link-metadata extractor.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Metadata, Source, MetadataError.

//! unfurl - Enrich saved web links with display metadata.
//!
//! This crate fetches a target page with browser-like headers and extracts
//! Open-Graph / Twitter-card / fallback HTML tags. When the direct fetch
//! looks unsuccessful (bot-challenge page, bad status, or nothing extracted)
//! it retries once through a reader proxy and mines the simplified text
//! rendering instead, merging the two results field by field.
//!
//! # Example
//!
//! ```no_run
//! use unfurl::{Client, MetadataError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MetadataError> {
//!     let client = Client::builder().build();
//!     let meta = client.extract_metadata("https://example.com/article").await?;
//!     println!("{} ({})", meta.title, meta.source);
//!     Ok(())
//! }
//! ```

pub mod challenge;
pub mod client;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod options;
pub mod resolve;
pub mod resource;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, MetadataError};
pub use crate::metadata::{Metadata, Source};
pub use crate::options::{ClientBuilder, Options, DEFAULT_PROXY_BASE};
pub use crate::resource::{FetchOptions, FetchResult, MAX_BODY_BYTES};
