//! Canned analysis data shared by the pipeline and its tests.
//!
//! - `SAMPLE_RESUME_TEXT` stands in for a PDF whose text could not be recovered.
//! - `AnalysisResult::repair_defaults()` is the record untrusted model output is merged against.
//! - `fallback_analysis()` is returned whenever the pipeline fails.

use crate::models::analysis::{
    AnalysisResult, AtsScores, Insight, InsightKind, Recommendation, RecommendationCategory,
    Score, SectionScores,
};

/// Substituted for PDF content that cleans down to too little text.
pub const SAMPLE_RESUME_TEXT: &str = "\
This is a resume for Jane Doe, a software developer with 5 years of experience. \
Skills include JavaScript, React, Node.js, and Python. \
Previously worked at Tech Company Inc. as Senior Developer. \
Education: Bachelor's in Computer Science from University of Technology. \
Note: This is sample text as the original PDF could not be processed.";

pub const UNREADABLE_INSIGHT_TEXT: &str = "Could not extract readable content from this file.";

impl AnalysisResult {
    /// Canonical record used to fill absent or falsy fields of a model reply.
    pub fn repair_defaults() -> Self {
        Self {
            overall_score: 0,
            sections: SectionScores::default(),
            key_insights: vec![Insight::new(InsightKind::Negative, UNREADABLE_INSIGHT_TEXT)],
            recommendations: vec![Recommendation {
                category: RecommendationCategory::Content,
                title: "Convert to text format".to_string(),
                description: "The current file format was difficult to analyze. \
                    Try converting to plain text."
                    .to_string(),
                examples: Some(
                    "Use a simple text editor to save as .txt or copy/paste text directly."
                        .to_string(),
                ),
            }],
            ats_scores: AtsScores::default(),
            detected_keywords: Vec::new(),
        }
    }
}

/// Hand-authored analysis returned when any pipeline stage fails.
pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        overall_score: 76,
        sections: SectionScores {
            content: Score::new(82),
            formatting: Score::new(68),
            keywords: Score::new(91),
            relevance: Score::new(63),
        },
        key_insights: vec![
            Insight::new(
                InsightKind::Positive,
                "Strong professional experience section with quantifiable achievements.",
            ),
            Insight::new(
                InsightKind::Warning,
                "Education section could be more detailed with relevant coursework.",
            ),
            Insight::new(
                InsightKind::Negative,
                "Missing keywords that are commonly found in job descriptions for this role.",
            ),
            Insight::new(
                InsightKind::Positive,
                "Good use of action verbs throughout the resume.",
            ),
        ],
        recommendations: vec![
            recommendation(
                RecommendationCategory::Content,
                "Add more quantifiable achievements",
                "Include specific metrics, percentages, or other numerical data to demonstrate your impact.",
                "Instead of 'Increased sales', use 'Increased regional sales by 27% over 6 months'.",
            ),
            recommendation(
                RecommendationCategory::Keywords,
                "Include more industry-specific keywords",
                "Your resume is missing some important keywords that recruiters look for.",
                "Consider adding terms like 'project management', 'agile methodology', or 'data analysis'.",
            ),
            recommendation(
                RecommendationCategory::Formatting,
                "Improve section organization",
                "The structure of your resume could be more clear with better section hierarchy.",
                "Use consistent headings and ensure proper spacing between sections.",
            ),
            recommendation(
                RecommendationCategory::Content,
                "Strengthen your summary statement",
                "Your professional summary should concisely highlight your most relevant experience and skills.",
                "Experienced project manager with 5+ years leading cross-functional teams and delivering enterprise software solutions.",
            ),
            recommendation(
                RecommendationCategory::Keywords,
                "Tailor skills section to the job",
                "Customize your skills section to match the requirements in the job description.",
                "For a marketing role, highlight skills like 'content strategy', 'SEO', and 'campaign management'.",
            ),
        ],
        ats_scores: AtsScores {
            readability: 85,
            keywords: 72,
            formatting: 90,
        },
        detected_keywords: [
            "React",
            "JavaScript",
            "Product Management",
            "Agile",
            "Team Leadership",
            "UI/UX",
            "Customer Experience",
            "A/B Testing",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    }
}

fn recommendation(
    category: RecommendationCategory,
    title: &str,
    description: &str,
    examples: &str,
) -> Recommendation {
    Recommendation {
        category,
        title: title.to_string(),
        description: description.to_string(),
        examples: Some(examples.to_string()),
    }
}
