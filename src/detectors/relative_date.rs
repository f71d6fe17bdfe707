use crate::config::RedactConfig;
use crate::context::{ContextStrength, RedactionContext};
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// Relative/implicit date phrases the Safe Harbor rule treats as
/// identifying when they carry enough surrounding clinical context to
/// read as patient-specific ("three days post-op", "yesterday"). Each
/// entry marks whether context is *required* to emit at all, versus
/// merely boosting confidence.
struct RelativePattern {
    regex: Regex,
    pattern: &'static str,
    base_confidence: f64,
    requires_context: bool,
}

static RELATIVE_PATTERNS: Lazy<Vec<RelativePattern>> = Lazy::new(|| {
    let specs: Vec<(&str, &'static str, f64, bool)> = vec![
        (r"(?i)\byesterday\b", "yesterday", 0.55, true),
        (r"(?i)\btoday\b", "today", 0.4, true),
        (r"(?i)\btomorrow\b", "tomorrow", 0.55, true),
        (r"(?i)\blast\s+(?:week|month|year|night)\b", "last <unit>", 0.6, true),
        (r"(?i)\bnext\s+(?:week|month|year)\b", "next <unit>", 0.55, true),
        (r"(?i)\b\d+\s+days?\s+(?:ago|post-?op|after\s+(?:admission|surgery|discharge))\b", "N days relative", 0.7, true),
        (r"(?i)\b\d+\s+(?:weeks?|months?|years?)\s+(?:ago|prior|post-?op)\b", "N units relative", 0.7, true),
        (r"(?i)\bthis\s+(?:morning|afternoon|evening)\b", "this <daypart>", 0.45, true),
        (r"(?i)\b(?:earlier|later)\s+(?:this|that)\s+(?:week|month|day)\b", "earlier/later this <unit>", 0.55, true),
        (r"(?i)\bon\s+admission\b", "on admission", 0.6, true),
        (r"(?i)\bat\s+discharge\b", "at discharge", 0.6, true),
        (r"(?i)\bpost-?operative(?:ly)?\s+day\s+\d+\b", "post-operative day N", 0.75, true),
        (r"(?i)\bsince\s+(?:last|yesterday)\b", "since <relative>", 0.5, true),
        (r"(?i)\bover\s+the\s+(?:past|last)\s+(?:few\s+)?(?:days?|weeks?|months?)\b", "over the past <unit>", 0.55, true),
        (r"(?i)\bthe\s+following\s+(?:day|week|morning)\b", "the following <unit>", 0.5, true),
        (r"(?i)\bthe\s+prior\s+(?:day|week|visit)\b", "the prior <unit>", 0.55, true),
        (r"(?i)\bfor\s+the\s+past\s+\d+\s+(?:days?|weeks?|months?|years?)\b", "for the past N <unit>", 0.65, true),
        (r"(?i)\bwithin\s+the\s+last\s+\d+\s+(?:hours?|days?|weeks?)\b", "within the last N <unit>", 0.65, true),
        (r"(?i)\b(?:early|late)\s+(?:this|last|next)\s+(?:week|month|year)\b", "early/late <relative period>", 0.55, true),
        (r"(?i)\bage\s+(?:90|9[1-9]|1\d{2})\b", "age 90+", 0.85, false),
        (r"(?i)\b(?:90|9[1-9]|1\d{2})\s*(?:years?\s*old|y\.?o\.?)\b", "age 90+ (suffix form)", 0.85, false),
        (r"(?i)\bhospital\s+day\s+\d+\b", "hospital day N", 0.65, true),
        (r"(?i)\bGA\s+\d+(?:\+\d+)?\s*weeks?\b", "GA N weeks", 0.7, true),
        (r"(?i)\bcycle\s+\d+\b", "cycle N", 0.6, true),
        (r"(?i)\bborn\s+in\s+(?:19|20)\d{2}\b", "born in YYYY", 0.7, true),
    ];
    specs
        .into_iter()
        .map(|(pat, name, conf, req)| RelativePattern {
            regex: Regex::new(pat).unwrap_or_else(|_| panic!("invalid RELATIVE_DATE pattern: {pat}")),
            pattern: name,
            base_confidence: conf,
            requires_context: req,
        })
        .collect()
});

pub fn scan(text: &str, context: &RedactionContext, window_chars: usize) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let analyzer = context.analyzer();
    let mut out = Vec::new();

    for spec in RELATIVE_PATTERNS.iter() {
        for m in spec.regex.find_iter(text) {
            let signal = analyzer.analyze(text, m.start(), m.end(), window_chars);
            if spec.requires_context && signal.strength < ContextStrength::Moderate {
                continue;
            }
            let confidence = (spec.base_confidence + signal.boost).min(0.95);
            // Emitted as DATE (the closed type set has no separate
            // RELATIVE_DATE discriminant) but at DATE + 10 priority so this
            // detector outranks the absolute-date detector on overlap.
            let mut span = build_span(text, &utf16, m.start(), m.end(), FilterType::Date, confidence, spec.pattern, window_chars);
            span.priority = FilterType::relative_date_priority();
            out.push(span);
        }
    }

    dedup_first_match_wins(out)
}

pub struct RelativeDateDetector;

impl Detector for RelativeDateDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Date
    }

    fn name(&self) -> &'static str {
        "relative_date"
    }

    fn detect(&self, text: &str, config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        let window_chars = config.context_window_chars as usize;
        if let Some(mut spans) = try_accelerate(context, text, FilterType::Date, "accelerated relative date", window_chars) {
            for span in &mut spans {
                span.priority = FilterType::relative_date_priority();
            }
            return spans;
        }
        scan(text, context, window_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yesterday_with_clinical_context_is_flagged() {
        let context = RedactionContext::new();
        let spans = scan("Patient reported the pain started yesterday during rounds.", &context, 40);
        assert!(spans.iter().any(|s| s.pattern == "yesterday"));
    }

    #[test]
    fn yesterday_without_clinical_context_is_not_flagged() {
        let context = RedactionContext::new();
        let spans = scan("We went to the beach yesterday and had a great time.", &context, 40);
        assert!(spans.is_empty());
    }

    #[test]
    fn age_over_ninety_is_flagged_without_context_requirement() {
        let context = RedactionContext::new();
        let spans = scan("The subject is a 94 years old male.", &context, 40);
        assert!(spans.iter().any(|s| s.pattern == "age 90+ (suffix form)"));
    }

    #[test]
    fn weak_context_alone_does_not_satisfy_context_requirement() {
        // A single family-relationship term is `Weak` strength (one hit);
        // the spec requires at least `Moderate` before a context-gated
        // relative date fires.
        let context = RedactionContext::new();
        let spans = scan("His sister mentioned he felt unwell yesterday.", &context, 40);
        assert!(spans.is_empty());
    }

    #[test]
    fn hospital_day_is_flagged_with_clinical_context() {
        let context = RedactionContext::new();
        let spans = scan("Patient remains stable on hospital day 4 per the attending physician.", &context, 40);
        assert!(spans.iter().any(|s| s.pattern == "hospital day N"));
    }

    #[test]
    fn gestational_age_is_flagged_with_clinical_context() {
        let context = RedactionContext::new();
        let spans = scan("Patient presents at GA 32 weeks for routine obstetric follow-up.", &context, 40);
        assert!(spans.iter().any(|s| s.pattern == "GA N weeks"));
    }

    #[test]
    fn chemo_cycle_is_flagged_with_clinical_context() {
        let context = RedactionContext::new();
        let spans = scan("Patient tolerated cycle 3 of chemotherapy without complication.", &context, 40);
        assert!(spans.iter().any(|s| s.pattern == "cycle N"));
    }

    #[test]
    fn born_in_year_is_flagged_with_clinical_context() {
        let context = RedactionContext::new();
        let spans = scan("Patient chart notes she was born in 1958 per the intake history.", &context, 40);
        assert!(spans.iter().any(|s| s.pattern == "born in YYYY"));
    }
}
