use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::dictionaries::US_STATE_PATTERN;
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// ZIP+4 is checked before the bare 5-digit pattern so a `02139-1234`
/// reading is captured whole rather than leaving a dangling `-1234`.
static ZIP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sources: Vec<&str> = vec![r"\b\d{5}-\d{4}\b", r"\b\d{5}\b"];
    sources.into_iter().map(|s| Regex::new(&format!("(?i){s}")).expect("invalid ZIP pattern")).collect()
});

/// OCR-garbled state-attached form, e.g. a scanned `MA02139` with the
/// space dropped by the scanner — only the digit run is emitted.
static STATE_ATTACHED_RE: Lazy<Regex> = Lazy::new(|| {
    let state = US_STATE_PATTERN.as_str();
    Regex::new(&format!(r"\b(?:{state})(\d{{5}}(?:-\d{{4}})?)\b")).expect("invalid ZIP state-attached pattern")
});

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();
    for re in ZIP_PATTERNS.iter() {
        for m in re.find_iter(text) {
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::ZipCode, 0.85, "bare ZIP code pattern", 40));
        }
    }
    for caps in STATE_ATTACHED_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::ZipCode, 0.75, "state-attached ZIP (OCR-joined)", 40));
    }
    dedup_first_match_wins(out)
}

pub struct ZipCodeDetector;

impl Detector for ZipCodeDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::ZipCode
    }

    fn name(&self) -> &'static str {
        "zipcode"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::ZipCode, "accelerated ZIP", 40) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_zip_plus_four() {
        let spans = scan("Mail to 02139-1234 please.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "02139-1234");
    }

    #[test]
    fn matches_bare_five_digit_zip() {
        let spans = scan("City, MA 02139 USA");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "02139");
    }

    #[test]
    fn matches_ocr_joined_state_zip() {
        let spans = scan("Mailing label read Boston MA02139 in scanned text.");
        assert!(spans.iter().any(|s| s.pattern == "state-attached ZIP (OCR-joined)" && s.text == "02139"));
    }
}
