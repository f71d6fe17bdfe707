use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::dictionaries::INSURANCE_KEYWORDS;
use crate::offsets::{next_char_boundary, prev_char_boundary};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use crate::validators::is_valid_healthplan;
use once_cell::sync::Lazy;
use regex::Regex;

/// Multi-pattern health-plan/insurance identifier table. Every pattern
/// requires an insurance keyword within `contextWindowChars` (here a
/// fixed 100-char window, matching the other context-gated detectors) —
/// the context gate, not the shape, is what distinguishes a health-plan
/// number from a generic alphanumeric ID.
static HEALTHPLAN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sources: Vec<&str> = vec![
        r"\b(?:Medicare)(?:\s+(?:Number|No|ID|#))?\s*[#:]?\s*([A-Z0-9][A-Z0-9-]{9,14})\b",
        r"\b(?:Medicaid)(?:\s+(?:Number|No|ID|#))?\s*[#:]?\s*([A-Z0-9][A-Z0-9-]{7,19})\b",
        r"\b(?:Member|Subscriber|Insurance)(?:\s+(?:ID|Number|No|#))?\s*[#:]?\s*([A-Z0-9][A-Z0-9-]{6,24})\b",
        r"\b(?:Policy)(?:\s+(?:Number|No|#))?\s*[#:]?\s*([A-Z0-9][A-Z0-9-]{4,24})\b",
        r"\b(?:Group)(?:\s+(?:Number|No|#))?\s*[#:]?\s*([A-Z0-9][A-Z0-9-]{4,24})\b",
        r"\b((?:PLAN|GRP|POLICY|POL|PL)-[A-Z0-9-]{4,24})\b",
    ];
    sources.into_iter().map(|s| Regex::new(&format!("(?i){s}")).expect("invalid HEALTHPLAN pattern")).collect()
});

fn has_insurance_keyword_nearby(text: &str, byte_start: usize, byte_len: usize, window_chars: usize) -> bool {
    let left = prev_char_boundary(text, byte_start.saturating_sub(window_chars));
    let right = next_char_boundary(text, (byte_start + byte_len + window_chars).min(text.len()));
    let lower = text[left..right].to_ascii_lowercase();
    INSURANCE_KEYWORDS.iter().any(|k| lower.contains(k))
}

pub fn scan(text: &str, window_chars: usize) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();
    for re in HEALTHPLAN_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if !is_valid_healthplan(m.as_str()) {
                continue;
            }
            if !has_insurance_keyword_nearby(text, m.start(), m.len(), window_chars) {
                continue;
            }
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::HealthPlan, 0.87, "insurance-context identifier", window_chars));
        }
    }
    dedup_first_match_wins(out)
}

pub struct HealthPlanDetector;

impl Detector for HealthPlanDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::HealthPlan
    }

    fn name(&self) -> &'static str {
        "healthplan"
    }

    fn detect(&self, text: &str, config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        let window_chars = config.context_window_chars as usize;
        if let Some(spans) = try_accelerate(context, text, FilterType::HealthPlan, "accelerated health plan", window_chars) {
            return spans;
        }
        scan(text, window_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_member_id_with_insurance_context() {
        let spans = scan("Blue Cross insurance Member ID: ABC123456789 on the card.", 100);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "ABC123456789");
    }

    #[test]
    fn rejects_id_without_insurance_context() {
        assert!(scan("Member ID: ABC123456789 printed on the badge.", 100).is_empty());
    }
}
