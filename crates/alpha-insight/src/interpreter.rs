//! Turn the model's free-text reply into an `AnalysisResult`
//!
//! The reply is expected to carry one fenced block tagged `json`. Only the
//! first such block is used. Sources never come from the model's JSON; they
//! are derived from the grounding metadata of the call.

use crate::error::{AnalysisError, Result};
use crate::model::{AnalysisResult, Source};
use insight_llm::{CompletionResponse, GroundingMetadata};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, error};

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\n(.*?)\n```").expect("valid fence pattern"));

/// Fields that must be present when strict schema checking is on
const REQUIRED_FIELDS: [&str; 6] = [
    "symbol",
    "companyName",
    "currentPrice",
    "markdownAnalysis",
    "recommendation",
    "trendData",
];

const REQUIRED_RECOMMENDATION_FIELDS: [&str; 5] = [
    "action",
    "confidence",
    "entryPriceRange",
    "exitPriceRange",
    "timeHorizon",
];

/// Body of the first ```json fence, if any
pub fn extract_json_block(text: &str) -> Option<&str> {
    JSON_FENCE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str())
}

/// Map grounding chunks that carry a web page to sources, in order
pub fn sources_from_grounding(metadata: Option<&GroundingMetadata>) -> Vec<Source> {
    metadata
        .map(|metadata| {
            metadata
                .web_sources()
                .map(|web| Source {
                    title: web.title.clone().unwrap_or_default(),
                    uri: web.uri.clone().unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Interpret one completion
///
/// With `strict` off, a structurally valid payload that is missing fields
/// passes through and the gaps stay blank. With `strict` on, any missing
/// required field is an `AnalysisError::Schema`.
pub fn interpret(response: &CompletionResponse, strict: bool) -> Result<AnalysisResult> {
    let text = response.text().ok_or(AnalysisError::NoResponse)?;

    let Some(body) = extract_json_block(text) else {
        error!(raw = %text, "Raw response");
        return Err(AnalysisError::Format {
            raw: text.to_string(),
        });
    };

    let value: Value = serde_json::from_str(body)?;

    if strict {
        let missing = missing_fields(&value);
        if !missing.is_empty() {
            return Err(AnalysisError::Schema { missing });
        }
    }

    let mut result: AnalysisResult =
        serde_json::from_value(value).map_err(AnalysisError::Shape)?;
    result.sources = sources_from_grounding(response.grounding.as_ref());

    debug!(
        symbol = %result.symbol,
        points = result.trend_data.len(),
        sources = result.sources.len(),
        "Interpreted analysis"
    );

    Ok(result)
}

fn missing_fields(value: &Value) -> Vec<String> {
    let mut missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| value.get(**field).is_none_or(Value::is_null))
        .map(|field| (*field).to_string())
        .collect();

    if let Some(recommendation) = value.get("recommendation").filter(|v| v.is_object()) {
        missing.extend(
            REQUIRED_RECOMMENDATION_FIELDS
                .iter()
                .filter(|field| recommendation.get(**field).is_none_or(Value::is_null))
                .map(|field| format!("recommendation.{field}")),
        );
    }

    missing
}
