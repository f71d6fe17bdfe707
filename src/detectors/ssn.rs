use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use crate::validators::is_valid_ssn;
use once_cell::sync::Lazy;
use regex::Regex;

/// SSN shapes, including the masked ("XXX-XX-1234") and OCR-confusable
/// ("O" for 0, "B" for 8) variants clinical scans encounter constantly.
static SSN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sources: Vec<&str> = vec![
        r"\b(\d{3})-(\d{2})-(\d{4})\b",
        r"\b(\d{3})[ \t](\d{2})[ \t](\d{4})\b",
        r"\b(\d{3})[–.](\d{2})[–.](\d{4})\b",
        r"\b\d{2}-\d{3}-\d{4}\b",
        r"[\*Xx]{3}-[\*Xx]{2}-(\d{4})\b",
        r"\b(\d{3})-(\d{2})-[\*Xx]{4}",
        r"\b[0-9BOSZIlGg|o]{3}-[0-9BOSZIlGg|o]{2}-[0-9BOSZIlGg|o]{3,4}\b",
        r"\b\d{3}[-\s]*[O0]{2}[-\s]*\d{4}\b",
    ];
    sources.into_iter().map(|s| Regex::new(s).expect("invalid SSN pattern")).collect()
});

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();
    for re in SSN_PATTERNS.iter() {
        for m in re.find_iter(text) {
            if !is_valid_ssn(m.as_str()) {
                continue;
            }
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Ssn, 0.97, "portable SSN pattern", 60));
        }
    }
    dedup_first_match_wins(out)
}

pub struct SsnDetector;

impl Detector for SsnDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Ssn
    }

    fn name(&self) -> &'static str {
        "ssn"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Ssn, "accelerated SSN", 60) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_standard_dashed_ssn() {
        let spans = scan("SSN: 123-45-6789 on file.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "123-45-6789");
    }

    #[test]
    fn matches_masked_ssn() {
        let spans = scan("SSN on file: XXX-XX-6789.");
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn ignores_short_digit_run() {
        assert!(scan("Room 123-45 down the hall").is_empty());
    }
}
