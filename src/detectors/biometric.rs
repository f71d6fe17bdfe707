use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// Five sub-patterns per the spec: sentence-level keyword presence,
/// descriptor phrases, photograph references, DNA/genetic test results,
/// and formatted biometric ID codes (`IRIS-*`, `DNA-*`, `FP-*`, ...).
/// The open question on sentence-vs-keyword span width is resolved as
/// keyword-only spans (see DESIGN.md) so the resolver's length-based
/// tie-break stays meaningful and the output stays disjointness-friendly.
static BIOMETRIC_LABELED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:fingerprint|retina|iris|voiceprint|facial\s*recognition|biometric)\s*(?:id|identifier|data|scan|template|hash|record|sample)\s*[:#]?\s*([A-Z0-9][A-Z0-9\-_]{5,})\b")
        .expect("invalid BIOMETRIC labeled pattern")
});

static BIOMETRIC_DNA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:dna|genetic|genome|genotype)\s*(?:id|identifier|profile|sample|marker|sequence|test\s+results?)\s*[:#]?\s*([A-Z0-9][A-Z0-9\-_]{5,})\b")
        .expect("invalid BIOMETRIC dna pattern")
});

static BIOMETRIC_PHOTO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:face|facial|photo(?:graph)?)\s*(?:id|identifier|recognition|template|encoding|reference)\s*[:#]?\s*([A-Z0-9][A-Z0-9\-_]{5,})\b")
        .expect("invalid BIOMETRIC photo pattern")
});

/// Descriptor phrases — identifying physical descriptions the Safe
/// Harbor rule treats as biometric in aggregate ("distinctive facial
/// scarring", "unique gait pattern").
static BIOMETRIC_DESCRIPTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:distinctive|unique|characteristic)\s+(?:facial|gait|vocal|retinal)\s+(?:scar(?:ring)?|pattern|print|feature)\b")
        .expect("invalid BIOMETRIC descriptor pattern")
});

/// Formatted biometric ID codes, e.g. `IRIS-4892`, `DNA-X7712`, `FP-00219`.
static BIOMETRIC_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b((?:IRIS|RETINA|DNA|FP|VOICE)-[A-Z0-9]{4,12})\b").expect("invalid BIOMETRIC code pattern")
});

/// Shape check rejecting likely false positives: the identifier part must
/// contain at least one digit and not be pure alphabetic filler text.
fn is_biometric_reference(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned.len() >= 4 && cleaned.chars().any(|c| c.is_ascii_digit()) && cleaned.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();

    for caps in BIOMETRIC_LABELED_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        if !is_biometric_reference(m.as_str()) {
            continue;
        }
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Biometric, 0.9, "labeled biometric identifier", 60));
    }
    for caps in BIOMETRIC_DNA_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        if !is_biometric_reference(m.as_str()) {
            continue;
        }
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Biometric, 0.9, "DNA/genetic test result", 60));
    }
    for caps in BIOMETRIC_PHOTO_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        if !is_biometric_reference(m.as_str()) {
            continue;
        }
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Biometric, 0.88, "photograph reference", 60));
    }
    for m in BIOMETRIC_DESCRIPTOR_RE.find_iter(text) {
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Biometric, 0.75, "descriptor phrase", 60));
    }
    for caps in BIOMETRIC_CODE_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Biometric, 0.92, "formatted biometric ID code", 60));
    }

    dedup_first_match_wins(out)
}

pub struct BiometricDetector;

impl Detector for BiometricDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Biometric
    }

    fn name(&self) -> &'static str {
        "biometric"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Biometric, "accelerated biometric", 60) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_labeled_fingerprint_id() {
        let spans = scan("Fingerprint ID: FX-88213 on file for identification.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "FX-88213");
    }

    #[test]
    fn matches_formatted_iris_code() {
        let spans = scan("Scan result IRIS-4892 matched the enrolled template.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].pattern, "formatted biometric ID code");
    }

    #[test]
    fn matches_descriptor_phrase() {
        let spans = scan("Exam noted a distinctive facial scarring above the left brow.");
        assert_eq!(spans.len(), 1);
    }
}
