//! Response parsing: locates the JSON object inside a free-form model reply.
//!
//! Strategies are tried in `ExtractionStrategy::ORDERED` order. Each yields a
//! candidate which must be brace-delimited once trimmed; the first candidate
//! that is wins. When none is, parsing fails with `ParseError::NoJsonCandidate`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").unwrap());

static ANY_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Could not extract valid JSON from the model response")]
    NoJsonCandidate,

    #[error("Could not parse analysis results from model response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// First fenced block tagged `json`.
    JsonFence,
    /// First fenced block of any kind.
    AnyFence,
    /// The entire reply.
    WholeText,
}

impl ExtractionStrategy {
    pub const ORDERED: [Self; 3] = [Self::JsonFence, Self::AnyFence, Self::WholeText];

    /// Raw, untrimmed candidate produced by this strategy, if it applies.
    pub fn extract(self, text: &str) -> Option<&str> {
        match self {
            Self::JsonFence => JSON_FENCE
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str()),
            Self::AnyFence => ANY_FENCE
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str()),
            Self::WholeText => Some(text),
        }
    }
}

fn is_brace_delimited(candidate: &str) -> bool {
    candidate.starts_with('{') && candidate.ends_with('}')
}

/// Returns the trimmed JSON object text found in `text`.
pub fn extract_json_candidate(text: &str) -> Result<&str, ParseError> {
    for strategy in ExtractionStrategy::ORDERED {
        let Some(candidate) = strategy.extract(text).map(str::trim) else {
            continue;
        };
        if is_brace_delimited(candidate) {
            tracing::debug!(?strategy, chars = candidate.len(), "Extracted JSON candidate");
            return Ok(candidate);
        }
    }
    Err(ParseError::NoJsonCandidate)
}

/// Extracts and decodes the JSON object in a model reply.
pub fn parse_analysis_payload(text: &str) -> Result<Value, ParseError> {
    let candidate = extract_json_candidate(text)?;
    Ok(serde_json::from_str(candidate)?)
}
