use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// Medical record number patterns: always captures group 1, the bare
/// identifier, stripping the label itself from the emitted span.
static MRN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sources: Vec<&str> = vec![
        r"\b(?:MRN?|Medical\s+Record(?:\s+Number)?)(?:\s*\([^)]+\))?\s*(?:[:#]\s*)?#?\s*([A-Z0-9][A-Z0-9-]{4,14})\b",
        r"\b(?:Chart)(?:\s+(?:Number|No|#))?\s*(?:[:#]\s*)?#?\s*([A-Z0-9][A-Z0-9-]{4,11})\b",
        r"\b(?:Record)(?:\s+(?:Number|No|#))?\s*(?:[:#]\s*)?#?\s*([A-Z0-9][A-Z0-9-]{4,11})\b",
        r"\b(?:Patient)(?:\s+(?:ID|Number|#))?\s*(?:[:#]\s*)?#?\s*([A-Z0-9][A-Z0-9-]{4,14})\b",
        r"\b(?:FILE|File)\s*(?:[:#]\s*)?#?\s*(\d{4,14})\b",
        r"\b(?:Case)(?:\s+(?:Number|No|#))?\s*(?:[:#]\s*)?#?\s*([A-Z0-9][A-Z0-9-]{4,14})\b",
        r"\b(?:Accession)(?:\s+(?:Number|No|#))?\s*(?:[:#]\s*)?#?\s*([A-Z0-9][A-Z0-9-]{4,14})\b",
        r"\b((?:PAT|PT|MRN|PATIENT|MR|REC|CHART|CASE|ACC)_[A-Z0-9_]{4,20})\b",
        r"(?:^|[\s:;,\(\[])#(\d{6,12})\b",
        r"\b((?:PAT|PT|MRN|MED|REC|REEC|ID|ACC|AACC|CAC|CHART|CASE)[:\s]+\d{5,14})\b",
        r"\b((?:MRN|PT|PAT|ID|REC|MED)[\s:-]?(?:19|20)\d{2}[-]?\d{5,10})\b",
        r"\b((?:MRN|MED|ME0|REC|PAT|PT|ID|ACC|ADC)[:\s]+[A-Z0-9!@#$%^&*()_+=\\-]{5,20})\b",
        r"\b((?:MRN|MED|REC|PAT|PT|ID|ACC)[:]{1,2}\s*\d{5,14})\b",
        // OCR-corrupted label prefixes for "MED"/"MRN" (0<->O, 1<->I/L
        // confusion on scanned forms) still need the number redacted.
        r"\b(?:JED|M0E|MRIM|MRM)\s*(?:[:#]\s*)?#?\s*([A-Z0-9][A-Z0-9-]{4,14})\b",
    ];
    sources.into_iter().map(|s| Regex::new(&format!("(?i){s}")).expect("invalid MRN pattern")).collect()
});

fn is_tokenized(full_match: &str) -> bool {
    full_match.contains("{{") || full_match.contains("}}")
}

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();
    for re in MRN_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if is_tokenized(m.as_str()) {
                continue;
            }
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Mrn, 0.9, "labeled MRN pattern", 60));
        }
    }
    dedup_first_match_wins(out)
}

pub struct MrnDetector;

impl Detector for MrnDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Mrn
    }

    fn name(&self) -> &'static str {
        "mrn"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Mrn, "accelerated MRN", 60) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_labeled_mrn() {
        let spans = scan("MRN: AB123456 admitted today.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "AB123456");
    }

    #[test]
    fn skips_already_tokenized_placeholder() {
        assert!(scan("MRN: {{MRN_1}} redacted").is_empty());
    }

    #[test]
    fn matches_ocr_corrupted_med_label() {
        let spans = scan("JED: AB123456 on the scanned intake form.");
        assert!(spans.iter().any(|s| s.text == "AB123456"));
    }

    #[test]
    fn matches_accession_number() {
        let spans = scan("Accession #: LB2024-889213 for the pathology specimen.");
        assert!(spans.iter().any(|s| s.text == "LB2024-889213"));
    }

    #[test]
    fn matches_bare_hash_number() {
        let spans = scan("Reference (#558213490) attached to the referral.");
        assert!(spans.iter().any(|s| s.text == "558213490"));
    }
}
