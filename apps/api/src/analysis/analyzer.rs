//! Resume Analysis: orchestrates the full analysis pipeline.
//!
//! Flow: sanitize_content → sufficiency gate → build_analysis_prompt →
//!       LLM generate → parse_analysis_payload → repair_analysis.
//!
//! `analyze` never fails. Any error is logged and replaced by
//! `fallback_analysis()`, so callers always receive a complete record.

use thiserror::Error;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::analysis::fixtures::fallback_analysis;
use crate::analysis::parser::{parse_analysis_payload, ParseError};
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::repair::repair_analysis;
use crate::analysis::sanitize::{sanitize_content, MIN_SIGNAL_CHARS};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::analysis::AnalysisResult;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Could not extract sufficient text from the resume ({chars} characters)")]
    InsufficientContent { chars: usize },

    #[error("Inference endpoint error: {0}")]
    Endpoint(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Stateless analysis service; cheap to clone and safe to share across requests.
#[derive(Clone)]
pub struct ResumeAnalyzer {
    llm: LlmClient,
}

impl ResumeAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Analyzes extracted file content, falling back to the canned analysis on any failure.
    pub async fn analyze(&self, content: &str) -> AnalysisResult {
        let span = tracing::info_span!("analyze", analysis_id = %Uuid::new_v4());

        async {
            info!("Analyzing resume with content length {}", content.len());
            match self.try_analyze(content).await {
                Ok(result) => {
                    info!("Analysis complete: overall score {}/100", result.overall_score);
                    result
                }
                Err(e) => {
                    warn!("Analysis failed, returning fallback analysis: {e}");
                    fallback_analysis()
                }
            }
        }
        .instrument(span)
        .await
    }

    /// The fallible pipeline behind `analyze`.
    pub async fn try_analyze(&self, content: &str) -> Result<AnalysisResult, AnalysisError> {
        // Step 1: Sanitize
        let clean = sanitize_content(content);

        // Step 2: Sufficiency gate, applied to every input
        let chars = clean.chars().count();
        if chars < MIN_SIGNAL_CHARS {
            return Err(AnalysisError::InsufficientContent { chars });
        }

        // Step 3: Prompt + single inference call
        let prompt = build_analysis_prompt(&clean);
        let reply = self.llm.generate_text(&prompt).await?;

        // Step 4: Locate and decode the JSON payload
        let payload = parse_analysis_payload(&reply)?;

        // Step 5: Fill every absent or falsy field
        Ok(repair_analysis(&payload))
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::analysis::sanitize::PDF_SIGNATURE;
    use crate::models::analysis::AtsScores;
    use crate::test_support::{gemini_envelope, serve};

    const RESUME: &str = "Jane Doe, Staff Engineer. Eight years building distributed \
        systems in Rust and Go; led the migration of payments to event sourcing.";

    /// Serves `status` and `body` on every call, counting requests.
    async fn stub_endpoint(status: StatusCode, body: Value) -> (SocketAddr, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new().route(
            "/generate",
            post({
                let hits = hits.clone();
                move || {
                    let hits = hits.clone();
                    let body = body.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        (status, Json(body))
                    }
                }
            }),
        );
        (serve(app).await, hits)
    }

    fn analyzer_for(addr: SocketAddr) -> ResumeAnalyzer {
        let llm = LlmClient::new(
            "test-key".to_string(),
            format!("http://{addr}/generate"),
            None,
        )
        .unwrap();
        ResumeAnalyzer::new(llm)
    }

    fn model_payload() -> Value {
        json!({
            "overallScore": 64,
            "sections": {
                "content": {"score": 70},
                "formatting": {"score": 55},
                "keywords": {"score": 60},
                "relevance": {"score": 72}
            },
            "keyInsights": [
                {"type": "positive", "text": "Quantified migration outcome."},
                {"type": "warning", "text": "No education section."},
                {"type": "negative", "text": "Missing contact details."}
            ],
            "recommendations": [
                {"category": "content", "title": "Add contact info", "description": "Include email and city."},
                {"category": "keywords", "title": "Name the stack", "description": "List Kafka and gRPC."},
                {"category": "formatting", "title": "Use bullets", "description": "Break the paragraph up."}
            ],
            "detectedKeywords": ["Rust", "Go", "distributed systems", "event sourcing", "payments"]
        })
    }

    #[tokio::test]
    async fn test_successful_analysis_repairs_missing_ats_scores() {
        let reply = format!("```json\n{}\n```", model_payload());
        let (addr, hits) = stub_endpoint(StatusCode::OK, gemini_envelope(&reply)).await;

        let result = analyzer_for(addr).analyze(RESUME).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(result.overall_score, 64);
        assert_eq!(result.sections.relevance.score, 72);
        assert_eq!(result.key_insights.len(), 3);
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.ats_scores, AtsScores::default());
        assert_eq!(result.detected_keywords[0], "Rust");
    }

    #[tokio::test]
    async fn test_http_500_returns_exact_fallback() {
        let (addr, hits) = stub_endpoint(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": {"message": "internal"}}),
        )
        .await;

        let result = analyzer_for(addr).analyze(RESUME).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(result, fallback_analysis());
        assert_eq!(result.overall_score, 76);
    }

    #[tokio::test]
    async fn test_no_retry_after_failure() {
        let (addr, hits) =
            stub_endpoint(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;
        let analyzer = analyzer_for(addr);

        let err = analyzer.try_analyze(RESUME).await.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Endpoint(LlmError::Api { status: 503, .. })
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_candidates_falls_back() {
        let (addr, _) = stub_endpoint(StatusCode::OK, json!({"candidates": []})).await;
        let analyzer = analyzer_for(addr);

        assert!(matches!(
            analyzer.try_analyze(RESUME).await,
            Err(AnalysisError::Endpoint(LlmError::NoCandidates))
        ));
        assert_eq!(analyzer.analyze(RESUME).await, fallback_analysis());
    }

    #[tokio::test]
    async fn test_prose_reply_is_parse_error() {
        let (addr, _) = stub_endpoint(
            StatusCode::OK,
            gemini_envelope("I'm sorry, I can't review resumes."),
        )
        .await;

        let err = analyzer_for(addr).try_analyze(RESUME).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(ParseError::NoJsonCandidate)));
    }

    #[tokio::test]
    async fn test_short_plain_text_is_gated_before_inference() {
        let (addr, hits) = stub_endpoint(StatusCode::OK, gemini_envelope("{}")).await;
        let analyzer = analyzer_for(addr);

        // Sanitization leaves non-PDF text untouched...
        assert_eq!(sanitize_content("Hello world"), "Hello world");
        // ...but the sufficiency gate still rejects it, without any request.
        assert!(matches!(
            analyzer.try_analyze("Hello world").await,
            Err(AnalysisError::InsufficientContent { chars: 11 })
        ));
        assert_eq!(analyzer.analyze("Hello world").await, fallback_analysis());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_whitespace_counts_toward_sufficiency_gate() {
        let reply = serde_json::to_string(&model_payload()).unwrap();
        let (addr, hits) = stub_endpoint(StatusCode::OK, gemini_envelope(&reply)).await;

        let padded = format!("Hello world{}", " ".repeat(MIN_SIGNAL_CHARS));
        let result = analyzer_for(addr).analyze(&padded).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(result.overall_score, 64);
    }

    #[tokio::test]
    async fn test_short_pdf_is_padded_and_reaches_inference() {
        let reply = serde_json::to_string(&model_payload()).unwrap();
        let (addr, hits) = stub_endpoint(StatusCode::OK, gemini_envelope(&reply)).await;

        let pdf = format!("{PDF_SIGNATURE}-1.4\n1 0 obj\nendobj\n");
        let result = analyzer_for(addr).analyze(&pdf).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(result.overall_score, 64);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = analyzer_for(addr).analyze(RESUME).await;
        assert_eq!(result, fallback_analysis());
    }

    #[tokio::test]
    async fn test_every_result_is_complete_and_bounded() {
        let replies = [
            gemini_envelope("{\"overallScore\": 250, \"sections\": {\"content\": {\"score\": -9}}}"),
            gemini_envelope("{}"),
            gemini_envelope("not json"),
            json!({"unexpected": true}),
        ];
        for body in replies {
            let (addr, _) = stub_endpoint(StatusCode::OK, body).await;
            let result = analyzer_for(addr).analyze(RESUME).await;

            let value = serde_json::to_value(&result).unwrap();
            for key in [
                "overallScore",
                "sections",
                "keyInsights",
                "recommendations",
                "atsScores",
                "detectedKeywords",
            ] {
                assert!(value.get(key).is_some(), "missing {key}");
            }
            assert!(result.overall_score <= 100);
            assert!(result.sections.content.score <= 100);
            assert!(!result.key_insights.is_empty());
            assert!(!result.recommendations.is_empty());
        }
    }
}
