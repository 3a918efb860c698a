//! Corpus record types.
use serde::{Deserialize, Serialize};

/// A single bilingual segmentation record.
///
/// `source` holds the canonical text with literal newlines as sentence
/// separators; `target` holds the derived rendering where inserted breaks
/// appear as the `<sent_br>` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Record {
    pub fn new(source: String, target: String, filename: Option<String>) -> Self {
        Self {
            source,
            target,
            filename,
        }
    }
}
