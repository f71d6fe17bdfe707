use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// NPI (National Provider Identifier) numbers are only ever meaningful
/// labeled — a bare 10-digit run is indistinguishable from any other
/// numeric field, so unlike SSN/MRN this detector requires the label.
static NPI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bNPI(?:\s+(?:Number|No|#))?\s*[#:]*\s*([0-9]{10})\b").expect("invalid NPI pattern")
});

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    NPI_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| build_span(text, &utf16, m.start(), m.end(), FilterType::Npi, 0.97, "labeled NPI number", 40))
        .collect()
}

pub struct NpiDetector;

impl Detector for NpiDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Npi
    }

    fn name(&self) -> &'static str {
        "npi"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Npi, "accelerated NPI", 40) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_labeled_npi() {
        let spans = scan("Referring provider NPI: 1234567890");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "1234567890");
    }

    #[test]
    fn ignores_unlabeled_ten_digit_run() {
        assert!(scan("Tracking number 1234567890 for the shipment.").is_empty());
    }
}
