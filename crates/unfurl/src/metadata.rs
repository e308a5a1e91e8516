// ABOUTME: Metadata record produced by the extraction pipeline, with its Source tag.
// ABOUTME: Implements the field-level merge-on-empty logic between direct and proxy results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which fetch produced the returned (merged) record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Direct,
    Proxy,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Source::Direct => "direct",
            Source::Proxy => "proxy",
        };
        write!(f, "{}", s)
    }
}

/// Display metadata extracted for a link.
///
/// Field values are stored trimmed; `image`, when non-empty, is always an
/// absolute URL. Produced fresh per call and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub image: String,
    pub source: Source,
}

impl Metadata {
    /// Returns true if all three extracted fields are empty.
    ///
    /// One of the fallback triggers: a direct fetch that produced nothing
    /// usable is worth retrying through the reader proxy.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.image.is_empty()
    }

    /// Merge with a fallback record, field by field.
    ///
    /// Each field keeps this record's value unless it is empty, in which case
    /// the fallback's value is taken. `source` is carried over unchanged; the
    /// orchestrator decides the final tag, not the merger.
    pub fn merged_with(&self, fallback: &Metadata) -> Metadata {
        let pick = |primary: &str, secondary: &str| {
            if primary.is_empty() {
                secondary.to_string()
            } else {
                primary.to_string()
            }
        };
        Metadata {
            title: pick(&self.title, &fallback.title),
            description: pick(&self.description, &fallback.description),
            image: pick(&self.image, &fallback.image),
            source: self.source,
        }
    }
}
