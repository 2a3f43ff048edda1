//! Grounding metadata attached to search-augmented responses
//!
//! When the model answers with the help of live web search it returns a list
//! of grounding chunks. Only chunks backed by a web page carry a `web` object.

use serde::{Deserialize, Serialize};

/// Citation metadata for one candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Retrieved chunks the answer was grounded on
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,

    /// Search queries the model issued
    #[serde(default)]
    pub web_search_queries: Vec<String>,
}

/// A single retrieved chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    /// Web page backing this chunk, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

/// A web page the model cited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GroundingMetadata {
    /// Iterate over the web sources, skipping chunks without one
    pub fn web_sources(&self) -> impl Iterator<Item = &WebSource> {
        self.grounding_chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
    }
}
