use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").expect("invalid EMAIL pattern")
});

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    EMAIL_RE
        .find_iter(text)
        .map(|m| build_span(text, &utf16, m.start(), m.end(), FilterType::Email, 0.95, "RFC-5322-lite email", 100))
        .collect()
}

pub struct EmailDetector;

impl Detector for EmailDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Email
    }

    fn name(&self) -> &'static str {
        "email"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Email, "accelerated email", 100) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_simple_address() {
        let spans = scan("Contact patient at jane.doe@example.com for follow-up.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "jane.doe@example.com");
        assert_eq!(spans[0].confidence, 0.95);
    }

    #[test]
    fn ignores_text_without_at_sign() {
        assert!(scan("no address mentioned here").is_empty());
    }
}
