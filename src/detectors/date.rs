use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::offsets::normalize_ocr_text;
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTH_NAMES: &str =
    "Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t|tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?";

/// Absolute-date pattern table, mined from the teacher's `DATE_PATTERNS`
/// and widened to the spec's required formats: DOB-labeled, US numeric
/// (long and short year), ISO 8601, month-name MDY/DMY, military
/// DDMMMYYYY, and a bare numeric fallback gated by a 4-digit year.
static DATE_PATTERNS: Lazy<Vec<(Regex, &'static str, f64)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)\b(?:DOB|D\.O\.B\.|Date\s+of\s+Birth|Born)\s*[:]?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b")
                .expect("invalid DATE dob pattern"),
            "labeled date of birth",
            0.96,
        ),
        (
            Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{4})\b").expect("invalid DATE us-long pattern"),
            "US numeric date (4-digit year)",
            0.85,
        ),
        (
            Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{2})\b").expect("invalid DATE us-short pattern"),
            "US numeric date (2-digit year)",
            0.75,
        ),
        (
            Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").expect("invalid DATE iso pattern"),
            "ISO 8601 date",
            0.9,
        ),
        (
            Regex::new(&format!(r"(?i)\b((?:{MONTH_NAMES})\.?\s+\d{{1,2}},?\s+\d{{4}})\b")).expect("invalid DATE month-mdy pattern"),
            "month-name MDY date",
            0.9,
        ),
        (
            Regex::new(&format!(r"(?i)\b(\d{{1,2}}\s+(?:{MONTH_NAMES})\.?\s+\d{{4}})\b")).expect("invalid DATE month-dmy pattern"),
            "month-name DMY date",
            0.9,
        ),
        (
            Regex::new(&format!(r"(?i)\b(\d{{2}}(?:{MONTH_NAMES})\d{{4}})\b")).expect("invalid DATE military pattern"),
            "military DDMMMYYYY date",
            0.88,
        ),
        (
            Regex::new(r"\b(\d{1,2}-\d{1,2}-\d{4})\b").expect("invalid DATE dashed pattern"),
            "dashed numeric date",
            0.8,
        ),
    ]
});

/// Scans both the raw text and an OCR-repaired copy of identical length
/// (see [`normalize_ocr_text`]). Because the repair is always a 1
/// char -> 1 char substitution, byte offsets found against the repaired
/// string stay valid against the original and need no remapping — the
/// resolved answer to the open question of how OCR repair interacts with
/// offset tracking.
pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();

    for (re, pattern, confidence) in DATE_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Date, *confidence, pattern, 30));
        }
    }

    let normalized = normalize_ocr_text(text);
    if normalized != text {
        for (re, pattern, confidence) in DATE_PATTERNS.iter() {
            for caps in re.captures_iter(&normalized) {
                let Some(m) = caps.get(1) else { continue };
                out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Date, confidence * 0.9, pattern, 30));
            }
        }
    }

    dedup_first_match_wins(out)
}

pub struct DateDetector;

impl Detector for DateDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Date
    }

    fn name(&self) -> &'static str {
        "date"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Date, "accelerated date", 30) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_labeled_dob() {
        let spans = scan("DOB: 03/14/1985 per registration.");
        assert!(spans.iter().any(|s| s.pattern == "labeled date of birth" && s.text == "03/14/1985"));
    }

    #[test]
    fn matches_iso_date() {
        let spans = scan("Admission recorded on 2024-11-02 at noon.");
        assert!(spans.iter().any(|s| s.text == "2024-11-02"));
    }

    #[test]
    fn matches_month_name_date() {
        let spans = scan("Follow-up scheduled for March 14, 2026.");
        assert!(spans.iter().any(|s| s.text == "March 14, 2026"));
    }

    #[test]
    fn matches_ocr_corrupted_numeric_date() {
        let spans = scan("DOB: O3/14/1985 on the scanned form.");
        assert!(spans.iter().any(|s| s.pattern == "labeled date of birth"));
    }
}
