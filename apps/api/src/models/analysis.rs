use serde::{Deserialize, Serialize};

/// Fully-populated resume analysis returned to callers.
///
/// Every field is always present; the repair pass and the fallback fixture
/// both guarantee it. Scores are bounded to 0–100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub sections: SectionScores,
    pub key_insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
    pub ats_scores: AtsScores,
    pub detected_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub score: u8,
}

impl Score {
    pub const fn new(score: u8) -> Self {
        Self { score }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionScores {
    pub content: Score,
    pub formatting: Score,
    pub keywords: Score,
    pub relevance: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Warning,
    Negative,
}

impl InsightKind {
    /// Case-insensitive parse of the wire label.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "warning" => Some(Self::Warning),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub text: String,
}

impl Insight {
    pub fn new(kind: InsightKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Content,
    Keywords,
    Formatting,
    Other,
}

impl RecommendationCategory {
    /// Unknown labels collapse into `Other`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "content" => Self::Content,
            "keywords" => Self::Keywords,
            "formatting" => Self::Formatting,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
}

/// Applicant-tracking-system readiness metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AtsScores {
    pub readability: u8,
    pub keywords: u8,
    pub formatting: u8,
}
