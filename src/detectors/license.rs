use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use crate::validators::is_valid_license;
use once_cell::sync::Lazy;
use regex::Regex;

/// Driver's license patterns (state prefix + digits) and the common
/// professional-license prefixes (RN, MD, DEA, CLIA, ...) clinical text
/// carries alongside a patient's own identifiers.
static LICENSE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sources: Vec<&str> = vec![
        r"\b(?:DL|Driver'?s?\s+License|Drivers?\s+Lic)(?:\s+(?:Number|No|#))?\s*[#:]?\s*([A-Z]{0,2}[A-Z0-9-]{6,20})\b",
        r"\b([A-Z]{2})\s+(?:DL|License|Lic)\s*[#:]?\s*([A-Z0-9-]{6,20})\b",
        r"\b(?:Medical|Nursing|Professional)\s+(?:License|Lic|Number|#)\s*[#:]?\s*([A-Z0-9][A-Z0-9-]{4,19})\b",
        r"\b(?:License|Lic)(?:\s+(?:Number|No))?\s*[#:]\s*([A-Z0-9][A-Z0-9-]{5,19})\b",
        r"\b((?:RN|LPN|LVN|APRN|NP|CNS|CNM|CRNA|CNA|MD|DO|PA|RPH|PHARMD|PT|OT|SLP|RT|RRT|LCSW|LMFT|DDS|DMD|DC|DPM|OD)[-#]?\d{5,10})\b",
        r"(?i)\b(?:CLIA)(?:\s+(?:Number|No|#))?\s*[#:]?\s*(\d{2}D\d{7})\b",
    ];
    sources.into_iter().map(|s| Regex::new(&format!("(?i){s}")).expect("invalid LICENSE pattern")).collect()
});

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();
    for re in LICENSE_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            // The state-prefixed pattern captures two groups (state, id);
            // every other pattern captures the bare identifier in group 1.
            let m = caps.get(2).or_else(|| caps.get(1));
            let Some(m) = m else { continue };
            if !is_valid_license(m.as_str()) {
                continue;
            }
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::License, 0.88, "license pattern", 60));
        }
    }
    dedup_first_match_wins(out)
}

pub struct LicenseDetector;

impl Detector for LicenseDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::License
    }

    fn name(&self) -> &'static str {
        "license"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::License, "accelerated license", 60) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_labeled_drivers_license() {
        let spans = scan("Driver's License Number: D1234567 presented at check-in.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "D1234567");
    }

    #[test]
    fn matches_state_prefixed_professional_license() {
        let spans = scan("Attending license RN-489213 on file.");
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn ignores_short_unlabeled_code() {
        assert!(scan("Room code A1 posted on the door.").is_empty());
    }
}
