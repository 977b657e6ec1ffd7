// Prompt constants for resume analysis.
// The JSON schema below is the contract `parser` and `repair` depend on; keep them in sync.

/// Resume analysis prompt template. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are a professional resume analyst. Analyze this resume content and provide detailed feedback:
"{resume_text}"

Return your analysis as a JSON object with this structure:
{
  "overallScore": (number between 0-100),
  "sections": {
    "content": { "score": (number between 0-100) },
    "formatting": { "score": (number between 0-100) },
    "keywords": { "score": (number between 0-100) },
    "relevance": { "score": (number between 0-100) }
  },
  "keyInsights": [
    { "type": "positive", "text": "specific strength" },
    { "type": "warning", "text": "specific area of improvement" },
    { "type": "negative", "text": "specific issue that needs addressing" }
  ],
  "recommendations": [
    {
      "category": "content",
      "title": "short descriptive title",
      "description": "detailed explanation",
      "examples": "specific example of improvement"
    }
  ],
  "atsScores": {
    "readability": (number between 0-100),
    "keywords": (number between 0-100),
    "formatting": (number between 0-100)
  },
  "detectedKeywords": ["keyword or phrase found in the resume"]
}

Rules:
- "keyInsights": 3-5 entries. "type" is exactly one of "positive", "warning", "negative".
- "recommendations": 3-5 entries covering different categories. "category" is exactly one of "content", "keywords", "formatting", "other". "examples" is optional.
- "detectedKeywords": 5-10 keywords or phrases found in the resume.
- Every score is an integer between 0 and 100.

Make the analysis detailed, constructive, and helpful for job seekers."#;

/// Embeds sanitized resume text into the analysis template.
pub fn build_analysis_prompt(resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
