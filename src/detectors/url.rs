use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// Five pattern classes per the spec: protocol URLs, named patient-portal
/// vendors, URLs carrying a `patient_id`/`mrn`-shaped query param,
/// healthcare-keyword domains, and social-media profile URLs. Overlap
/// within this detector's own candidates is resolved by first-match-wins
/// on the lower `[start, end)`, same as the teacher's `URL_PATTERNS`
/// table in `scan.rs`.
static URL_PATTERNS: Lazy<Vec<(Regex, &'static str, f64)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r#"(?i)\b(?:https?://|ftp://|www\.)[^\s<>"{}|\\^`\[\]]+"#).expect("invalid URL standard"),
            "Standard URL",
            0.95,
        ),
        (
            Regex::new(r#"(?i)\b(?:mychart|myhealth|patient(?:portal)?|epic|cerner|athena|meditech|allscripts|nextgen)[.\-]?[a-z0-9.\-]+\.(?:com|org|net|edu|health|healthcare|med|medical)[^\s<>"{}|\\^`\[\]]*"#)
                .expect("invalid URL patient portal"),
            "Patient portal URL",
            0.92,
        ),
        (
            Regex::new(r#"(?i)\b[a-z0-9][a-z0-9.\-]*\.[a-z]{2,}[^\s<>"{}|\\^`\[\]]*\?[^\s<>"{}|\\^`\[\]]*(?:patientid|patient_id|memberid|member_id|mrnid|mrn)=[^\s<>"{}|\\^`\[\]]+"#)
                .expect("invalid URL patient id"),
            "Patient ID URL",
            0.93,
        ),
        (
            Regex::new(r#"(?i)\b[a-z0-9][a-z0-9.\-]*(?:hospital|medical|health|clinic|care|healthcare)[a-z0-9.\-]*\.[a-z]{2,}[^\s<>"{}|\\^`\[\]]*"#)
                .expect("invalid URL healthcare domain"),
            "Healthcare domain",
            0.85,
        ),
        (
            Regex::new(r#"(?i)\b(?:linkedin\.com/in/|facebook\.com/|twitter\.com/|instagram\.com/|x\.com/)[^\s<>"{}|\\^`\[\]]+"#)
                .expect("invalid URL social"),
            "Social media profile",
            0.9,
        ),
    ]
});

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut candidates: Vec<Span> = Vec::new();
    for (re, pattern, confidence) in URL_PATTERNS.iter() {
        for m in re.find_iter(text) {
            candidates.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Url, *confidence, pattern, 60));
        }
    }
    // First-match-wins on the lowest [start, end) among this detector's
    // own overlapping candidates; sort by start then by longest match
    // first so the more specific (longer) pattern class wins ties.
    candidates.sort_by_key(|s| (s.character_start, std::cmp::Reverse(s.character_end)));
    let mut out: Vec<Span> = Vec::with_capacity(candidates.len());
    for span in candidates {
        let overlaps_prev = out.last().map(|prev: &Span| span.character_start < prev.character_end).unwrap_or(false);
        if !overlaps_prev {
            out.push(span);
        }
    }
    out
}

pub struct UrlDetector;

impl Detector for UrlDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Url
    }

    fn name(&self) -> &'static str {
        "url"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Url, "accelerated URL", 60) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_standard_protocol_url() {
        let spans = scan("Visit https://example-clinic.org/records for the portal.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].pattern, "Standard URL");
    }

    #[test]
    fn matches_patient_portal_without_double_counting_email() {
        let spans = scan("Visit www.mychart.epic.com/patient?patientid=ABC123 and email jane@x.org.");
        assert_eq!(spans.len(), 1);
        assert!(!spans[0].text.contains('@'));
    }

    #[test]
    fn matches_social_media_profile() {
        let spans = scan("Follow updates at linkedin.com/in/janedoe for networking.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].pattern, "Social media profile");
    }
}
