use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use crate::validators::is_valid_dea;
use once_cell::sync::Lazy;
use regex::Regex;

static DEA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sources: Vec<&str> = vec![
        r"\bDEA(?:\s+(?:Number|No|#))?\s*[:#]?\s*([A-Z]{2}\d{7})\b",
        r"\b([A-Z]{2}\d{7})\b",
        r"\bDEA(?:\s+(?:Number|No|#))?\s*[:#]?\s*([A-Z]{2}[0-9OoIlBbSs]{7})\b",
    ];
    sources.into_iter().map(|s| Regex::new(&format!("(?i){s}")).expect("invalid DEA pattern")).collect()
});

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();
    for re in DEA_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if !is_valid_dea(m.as_str()) {
                continue;
            }
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Dea, 0.96, "DEA registrant pattern", 40));
        }
    }
    dedup_first_match_wins(out)
}

pub struct DeaDetector;

impl Detector for DeaDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Dea
    }

    fn name(&self) -> &'static str {
        "dea"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Dea, "accelerated DEA", 40) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_valid_dea_checksum() {
        let spans = scan("Prescriber DEA: AB1234563");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "AB1234563");
    }

    #[test]
    fn rejects_checksum_mismatch() {
        assert!(scan("DEA: AB1234560").is_empty());
    }
}
