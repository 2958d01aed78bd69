//! Extraction of web-search results from compound model responses.
//!
//! The compound models execute tools server side and report them back in an
//! `executed_tools` array on the completion message. The shape is only
//! loosely guaranteed, so everything here parses defensively: a record that
//! does not fit is skipped, never an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A search result normalized out of an executed tool record.
///
/// Created transiently per completion, forwarded to the room once, then
/// discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub score: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExecutedTool {
    #[serde(rename = "type")]
    kind: Option<String>,
    search_results: Option<ExecutedSearchResults>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExecutedSearchResults {
    results: Option<Vec<RawSearchResult>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSearchResult {
    title: Option<String>,
    url: Option<String>,
    score: Option<f64>,
}

/// Parse the `executed_tools` value of a completion response into a
/// normalized result list.
///
/// Only records tagged `search` with a navigable nested result collection
/// qualify; a nested result missing `title`, `url` or `score` is skipped.
/// Source order is preserved. Absent, null or malformed input yields an
/// empty list, never a panic or an error.
pub fn extract_search_results(executed_tools: Option<&Value>) -> Vec<SearchResult> {
    let mut results = Vec::new();

    let Some(tools) = executed_tools.and_then(Value::as_array) else {
        debug!("no executed_tools in completion response");
        return results;
    };

    for (index, raw) in tools.iter().enumerate() {
        let tool: ExecutedTool = match serde_json::from_value(raw.clone()) {
            Ok(tool) => tool,
            Err(err) => {
                debug!(index, error = %err, "skipping unparseable executed tool record");
                continue;
            }
        };

        if tool.kind.as_deref() != Some("search") {
            continue;
        }

        let Some(raw_results) = tool.search_results.and_then(|s| s.results) else {
            continue;
        };

        for raw_result in raw_results {
            if let (Some(title), Some(url), Some(score)) =
                (raw_result.title, raw_result.url, raw_result.score)
            {
                results.push(SearchResult { title, url, score });
            }
        }
    }

    debug!(total = results.len(), "extracted search results");
    results
}
