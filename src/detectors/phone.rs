use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::offsets::prev_char_boundary;
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use crate::validators::is_valid_us_phone_like;
use once_cell::sync::Lazy;
use regex::Regex;

/// A number immediately preceded by a "fax" label belongs to the FAX
/// detector, not PHONE — the same digits must never surface as both
/// (spec.md §4.2: "excluded if the same digits are in a fax-labeled
/// match").
static FAX_LABEL_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bfax(?:\s+(?:number|no|#))?\s*[#:]?\s*$").expect("invalid FAX label prefix pattern"));

fn is_fax_labeled(text: &str, match_start: usize) -> bool {
    let left = prev_char_boundary(text, match_start.saturating_sub(20));
    FAX_LABEL_PREFIX_RE.is_match(&text[left..match_start])
}

/// A representative cross-section of the teacher's phone pattern table:
/// plain US/NANP, extensions, the common UK/FR/DE/AU international forms,
/// and a couple of the OCR-tolerant digit-confusable variants. The full
/// teacher table runs to ~34 entries chasing every OCR artifact seen in
/// production scans; this keeps the shapes that matter for HIPAA text
/// without the long tail of single-document fixes.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sources: Vec<&str> = vec![
        r"(\+?1[-. \t]?)?\(?\d{3}\)?[-. \t]?\d{3}[-. \t]?\d{4}(?:[ \t]*(?:ext\.?|x|extension)[ \t]*[A-Z0-9]{1,6})?\b",
        r"\+44[ \t]*\(?0?\)?[ \t]*\d{2,4}[ \t.-]?\d{3,4}[ \t.-]?\d{3,4}\b",
        r"\b0\d{2,4}[ \t.-]?\d{3,4}[ \t.-]?\d{3,4}\b",
        r"\+33[ \t]*\(?0?\)?[ \t]*[1-9](?:[ \t.-]?\d{2}){4}\b",
        r"\+49[ \t]*\(?0?\)?[ \t]*\d{2,5}[ \t.-]?\d{3,8}\b",
        r"\+61[ \t]*\(?0?\)?[ \t]*[2-9][ \t.-]?\d{4}[ \t.-]?\d{4}\b",
        r"\+[1-9]\d{0,2}[ \t.-]?\d{2,5}[ \t.-]?\d{3,5}[ \t.-]?\d{3,5}\b",
        r"[0-9OoIlSsBb|]{3}[ \t.-]?[0-9OoIlSsBb|]{3}[ \t.-]?[0-9OoIlSsBb|]{4}\b",
        r"\(\d{2}\)[ \t]*\d{3}[ \t.-]?\d{4}\b",
    ];
    sources
        .into_iter()
        .map(|s| Regex::new(&format!("(?i){s}")).expect("invalid PHONE pattern"))
        .collect()
});

fn phone_confidence(phone: &str) -> f64 {
    let lower = phone.to_ascii_lowercase();
    if phone.starts_with('+') || lower.contains("ext") || lower.contains("extension") {
        0.95
    } else {
        0.9
    }
}

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();
    for re in PHONE_PATTERNS.iter() {
        for m in re.find_iter(text) {
            let candidate = m.as_str();
            if !is_valid_us_phone_like(candidate) && !candidate.contains('+') {
                continue;
            }
            if is_fax_labeled(text, m.start()) {
                continue;
            }
            out.push(build_span(
                text,
                &utf16,
                m.start(),
                m.end(),
                FilterType::Phone,
                phone_confidence(candidate),
                "portable phone pattern",
                100,
            ));
        }
    }
    dedup_first_match_wins(out)
}

pub struct PhoneDetector;

impl Detector for PhoneDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Phone
    }

    fn name(&self) -> &'static str {
        "phone"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Phone, "accelerated phone", 100) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_standard_us_phone() {
        let spans = scan("Call the clinic at (555) 123-4567 to confirm.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].filter_type, FilterType::Phone);
    }

    #[test]
    fn matches_international_with_plus() {
        let spans = scan("Reach the on-call line at +44 20 7946 0958 after hours.");
        assert_eq!(spans.len(), 1);
        assert!(spans[0].confidence >= 0.95);
    }

    #[test]
    fn ignores_unrelated_digit_run() {
        assert!(scan("Invoice total: 12345678 units shipped.").is_empty());
    }

    #[test]
    fn fax_labeled_digits_are_not_also_emitted_as_phone() {
        let spans = scan("Card 4532-0151-1283-0366, Fax: 555-123-4567.");
        assert!(spans.is_empty());
    }
}
