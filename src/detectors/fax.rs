use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// Fax numbers are kept separate from phone numbers: the explicit "Fax"
/// label is what distinguishes them, and that label itself is part of the
/// PHI context (it narrows which line at a facility reached the patient).
static FAX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sources: Vec<&str> = vec![
        r"\b(?:Fax|FAX)(?:\s+(?:Number|No|#))?\s*[#:]?\s*(\+?1?[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4})\b",
        r"\b(?:send|fax|transmit)(?:\s+(?:to|results))?\s+(?:fax)?\s*[#:]?\s*(\+?1?[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4})\b",
    ];
    sources
        .into_iter()
        .map(|s| Regex::new(&format!("(?i){s}")).expect("invalid FAX pattern"))
        .collect()
});

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();
    for re in FAX_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Fax, 0.95, "labeled fax number", 100));
        }
    }
    out
}

pub struct FaxDetector;

impl Detector for FaxDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Fax
    }

    fn name(&self) -> &'static str {
        "fax"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Fax, "accelerated fax", 100) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_labeled_fax_number() {
        let spans = scan("Fax: (555) 987-6543 for records request.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "(555) 987-6543");
    }

    #[test]
    fn ignores_unlabeled_digit_run() {
        assert!(scan("(555) 987-6543 is listed without context").is_empty());
    }
}
