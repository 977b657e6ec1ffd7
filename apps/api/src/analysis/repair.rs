//! Result repair: merges an untrusted model payload onto `AnalysisResult::repair_defaults()`.
//!
//! Each top-level field is checked on its own. A field that is absent, falsy
//! or unusable takes its default; everything usable is kept. Scores are
//! rounded and clamped into 0..=100. Repairing an already-complete result is a
//! no-op.

use std::collections::HashSet;

use serde_json::Value;

use crate::models::analysis::{
    AnalysisResult, AtsScores, Insight, InsightKind, Recommendation, RecommendationCategory,
    Score, SectionScores,
};

pub fn repair_analysis(raw: &Value) -> AnalysisResult {
    let defaults = AnalysisResult::repair_defaults();
    let field = |name: &str| raw.get(name).filter(|v| is_truthy(v));

    AnalysisResult {
        // Zero is a legitimate score, so only absence or a non-number falls back.
        overall_score: raw
            .get("overallScore")
            .and_then(score_value)
            .unwrap_or(defaults.overall_score),
        sections: field("sections")
            .map(repair_sections)
            .unwrap_or(defaults.sections),
        key_insights: field("keyInsights")
            .map(repair_insights)
            .filter(|insights| !insights.is_empty())
            .unwrap_or(defaults.key_insights),
        recommendations: field("recommendations")
            .map(repair_recommendations)
            .filter(|recs| !recs.is_empty())
            .unwrap_or(defaults.recommendations),
        ats_scores: field("atsScores")
            .map(repair_ats_scores)
            .unwrap_or(defaults.ats_scores),
        detected_keywords: field("detectedKeywords")
            .map(repair_keywords)
            .unwrap_or(defaults.detected_keywords),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Accepts numbers and numeric strings.
fn score_value(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn metric(obj: &Value, key: &str) -> u8 {
    obj.get(key).and_then(score_value).unwrap_or(0)
}

fn repair_sections(value: &Value) -> SectionScores {
    // Accept both `{ "score": n }` and a bare number per section.
    let section = |key: &str| {
        let score = value
            .get(key)
            .and_then(|s| s.get("score").and_then(score_value).or_else(|| score_value(s)))
            .unwrap_or(0);
        Score::new(score)
    };

    SectionScores {
        content: section("content"),
        formatting: section("formatting"),
        keywords: section("keywords"),
        relevance: section("relevance"),
    }
}

fn repair_insights(value: &Value) -> Vec<Insight> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let kind = item
                .get("type")
                .and_then(Value::as_str)
                .and_then(InsightKind::parse)?;
            let text = non_empty_str(item.get("text"))?;
            Some(Insight { kind, text })
        })
        .collect()
}

fn repair_recommendations(value: &Value) -> Vec<Recommendation> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let category = item
                .get("category")
                .and_then(Value::as_str)
                .map(RecommendationCategory::parse)
                .unwrap_or(RecommendationCategory::Other);
            Some(Recommendation {
                category,
                title: non_empty_str(item.get("title"))?,
                description: non_empty_str(item.get("description"))?,
                examples: non_empty_str(item.get("examples")),
            })
        })
        .collect()
}

fn repair_ats_scores(value: &Value) -> AtsScores {
    AtsScores {
        readability: metric(value, "readability"),
        keywords: metric(value, "keywords"),
        formatting: metric(value, "formatting"),
    }
}

fn repair_keywords(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| non_empty_str(Some(item)))
        .filter(|keyword| seen.insert(keyword.clone()))
        .collect()
}
