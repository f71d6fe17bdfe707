use crate::config::{NameDetectionMode, RedactConfig};
use crate::context::{ContextStrength, RedactionContext};
use crate::detectors::{build_span, dedup_first_match_wins, next_span_id, utf16_table};
use crate::ner::{adjust_confidence, ml_priority, NerLabel};
use crate::offsets::{build_utf16_index_map, byte_to_utf16, next_char_boundary, prev_char_boundary};
use crate::registry::Detector;
use crate::span::{FilterType, PostEmitFields, Span};
use crate::whitelist::WhitelistGate;
use once_cell::sync::Lazy;
use regex::Regex;

const NAME_TOKEN: &str = r"[A-Z][a-zA-Z'-]+";

/// Clinical-role titles that, when attached to a name, identify a
/// provider rather than a patient or bystander.
static PROVIDER_TITLED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:Dr|Doctor|Prof|Professor|Nurse|RN|NP|PA|MD|DO)\.?\s+({NAME_TOKEN}(?:\s+{NAME_TOKEN}){{0,2}})"
    ))
    .expect("invalid PROVIDER_TITLED pattern")
});

/// Social titles that carry no clinical role — still identifying, tagged
/// as a plain `NAME`.
static SOCIAL_TITLED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:Mr|Mrs|Ms|Miss|Mx)\.?\s+({NAME_TOKEN}(?:\s+{NAME_TOKEN}){{0,2}})")).expect("invalid SOCIAL_TITLED pattern")
});

/// Explicit "Patient: NAME" / "Name: NAME" labels.
static LABELED_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:patient|pt)\s*(?:name)?\s*[:]\s*({NAME_TOKEN}(?:\s+{NAME_TOKEN}){{0,3}})")).expect("invalid LABELED_NAME pattern")
});

/// Family-relationship labels preceding a name ("son John Smith",
/// "emergency contact: Jane Doe").
static FAMILY_LABELED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:mother|father|spouse|husband|wife|son|daughter|sibling|brother|sister|parent|guardian|next of kin|emergency contact)\s*(?:is|:)?\s*({NAME_TOKEN}(?:\s+{NAME_TOKEN}){{0,2}})"
    ))
    .expect("invalid FAMILY_LABELED pattern")
});

/// First+last pairs anchored in the common-name dictionaries — this is
/// the "diverse name" mode: catching names that don't appear after any
/// label or title at all, at the cost of needing a dictionary hit on at
/// least one token to avoid matching every capitalized two-word phrase.
static NAME_PAIR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"\b({NAME_TOKEN})\s+({NAME_TOKEN})\b")).expect("invalid NAME_PAIR pattern"));

/// A single capitalized given name, ambiguous on its own — only emitted
/// when clinical context around it is at least [`ContextStrength::Moderate`].
static SINGLE_GIVEN_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"\b({NAME_TOKEN})\b")).expect("invalid SINGLE_GIVEN_NAME pattern"));

fn is_dictionary_name_token(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    crate::dictionaries::COMMON_FIRST_NAMES.contains(lower.as_str()) || crate::dictionaries::COMMON_SURNAMES.contains(lower.as_str())
}

pub struct TitledNameDetector {
    whitelist: WhitelistGate,
}

impl TitledNameDetector {
    pub fn new() -> Self {
        Self { whitelist: WhitelistGate::new() }
    }
}

impl Default for TitledNameDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for TitledNameDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Name
    }

    fn name(&self) -> &'static str {
        "titled_name"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, _context: &RedactionContext) -> Vec<Span> {
        let utf16 = utf16_table(text);
        let mut out = Vec::new();

        for caps in PROVIDER_TITLED_RE.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if self.whitelist.should_suppress(text, m.start(), m.as_str()) {
                continue;
            }
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::ProviderName, 0.93, "titled provider name", 60));
        }
        for caps in SOCIAL_TITLED_RE.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if self.whitelist.should_suppress(text, m.start(), m.as_str()) {
                continue;
            }
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Name, 0.9, "titled social name", 60));
        }
        for caps in LABELED_NAME_RE.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if self.whitelist.should_suppress(text, m.start(), m.as_str()) {
                continue;
            }
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Name, 0.95, "labeled patient name", 60));
        }
        for caps in FAMILY_LABELED_RE.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if self.whitelist.should_suppress(text, m.start(), m.as_str()) {
                continue;
            }
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::FamilyName, 0.87, "family-relationship labeled name", 60));
        }

        dedup_first_match_wins(out)
    }
}

/// Dictionary-anchored name detection for running text with no title or
/// label nearby. `context_window_chars` from config gates the
/// single-given-name fallback: only emitted with at least moderate
/// clinical context, since a bare capitalized word is otherwise far too
/// ambiguous.
pub struct DiverseNameDetector {
    whitelist: WhitelistGate,
}

impl DiverseNameDetector {
    pub fn new() -> Self {
        Self { whitelist: WhitelistGate::new() }
    }
}

impl Default for DiverseNameDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for DiverseNameDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Name
    }

    fn name(&self) -> &'static str {
        "diverse_name"
    }

    fn is_enabled(&self, config: &RedactConfig) -> bool {
        !matches!(config.name_detection_mode, NameDetectionMode::Ml)
    }

    fn detect(&self, text: &str, config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        let utf16 = utf16_table(text);
        let window_chars = config.context_window_chars as usize;
        let analyzer = context.analyzer();
        let mut out = Vec::new();
        let mut covered: Vec<(usize, usize)> = Vec::new();

        for caps in NAME_PAIR_RE.captures_iter(text) {
            let (Some(first), Some(last)) = (caps.get(1), caps.get(2)) else { continue };
            if !is_dictionary_name_token(first.as_str()) && !is_dictionary_name_token(last.as_str()) {
                continue;
            }
            let whole_start = first.start();
            let whole_end = last.end();
            if self.whitelist.should_suppress(text, whole_start, &text[whole_start..whole_end]) {
                continue;
            }
            covered.push((whole_start, whole_end));
            out.push(build_span(text, &utf16, whole_start, whole_end, FilterType::Name, 0.82, "dictionary-anchored name pair", window_chars));
        }

        for m in SINGLE_GIVEN_NAME_RE.find_iter(text) {
            if covered.iter().any(|&(s, e)| m.start() >= s && m.end() <= e) {
                continue;
            }
            if !is_dictionary_name_token(m.as_str()) {
                continue;
            }
            if self.whitelist.should_suppress(text, m.start(), m.as_str()) {
                continue;
            }
            let signal = analyzer.analyze(text, m.start(), m.end(), window_chars);
            if signal.strength < ContextStrength::Moderate {
                continue;
            }
            let confidence = (0.55 + signal.boost).min(0.85);
            out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Name, confidence, "context-gated single given name", window_chars));
        }

        dedup_first_match_wins(out)
    }
}

/// Wraps the pluggable [`crate::ner::NerEngine`] capability handle. Runs
/// only in `Ml`/`Hybrid` mode with `gliner_enabled` set; with
/// [`crate::ner::NullNerEngine`] (the default) this always reports
/// nothing, which is the documented fallback when no real model is
/// plugged in.
pub struct MlNameDetector {
    whitelist: WhitelistGate,
}

impl MlNameDetector {
    pub fn new() -> Self {
        Self { whitelist: WhitelistGate::new() }
    }
}

impl Default for MlNameDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MlNameDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Name
    }

    fn name(&self) -> &'static str {
        "ml_name"
    }

    fn is_enabled(&self, config: &RedactConfig) -> bool {
        config.gliner_enabled && !matches!(config.name_detection_mode, NameDetectionMode::Rules)
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        let Some(engine) = context.ner_engine.as_ref() else { return Vec::new() };
        let utf16: Vec<(usize, u32)> = build_utf16_index_map(text);
        let mut out = Vec::new();

        for detection in engine.infer(text) {
            if detection.score < detection.label.threshold() {
                continue;
            }
            // Whitelist gate: reject medical terms, all-caps section
            // headers, pure digits, and short codes the model mistook for
            // a name (spec.md §4.3).
            if self.whitelist.is_whitelisted(&detection.text) {
                continue;
            }
            let filter_type = match detection.label {
                NerLabel::ProviderName => FilterType::ProviderName,
                NerLabel::FamilyMember => FilterType::FamilyName,
                NerLabel::PatientName | NerLabel::PersonName => FilterType::Name,
            };
            let confidence = adjust_confidence(detection.score, &detection.text);
            let priority = ml_priority(filter_type.priority_class());

            let left = prev_char_boundary(text, detection.byte_start.saturating_sub(60));
            let right = next_char_boundary(text, (detection.byte_end + 60).min(text.len()));

            let original_value = text.get(detection.byte_start..detection.byte_end).unwrap_or(&detection.text).to_string();
            out.push(Span {
                id: next_span_id(),
                filter_type,
                text: detection.text.clone(),
                original_value,
                character_start: byte_to_utf16(&utf16, detection.byte_start),
                character_end: byte_to_utf16(&utf16, detection.byte_end),
                confidence,
                priority,
                pattern: "ML NER detection",
                context: text.get(left..right).unwrap_or_default().to_string(),
                window: None,
                ambiguous_with: Vec::new(),
                disambiguation_score: None,
                post_emit: PostEmitFields::default(),
            });
        }

        dedup_first_match_wins(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::{NerDetection, NerEngine};
    use std::sync::Arc;

    #[test]
    fn titled_provider_name_is_tagged_provider() {
        let detector = TitledNameDetector::new();
        let config = RedactConfig::default();
        let context = RedactionContext::new();
        let spans = detector.detect("Seen today by Dr. Wilson for follow-up.", &config, &context);
        assert!(spans.iter().any(|s| s.filter_type == FilterType::ProviderName && s.text == "Wilson"));
    }

    #[test]
    fn labeled_patient_name_is_captured() {
        let detector = TitledNameDetector::new();
        let config = RedactConfig::default();
        let context = RedactionContext::new();
        let spans = detector.detect("Patient: Maria Gonzalez admitted overnight.", &config, &context);
        assert!(spans.iter().any(|s| s.text == "Maria Gonzalez"));
    }

    #[test]
    fn bare_eponym_mention_does_not_yield_provider_name() {
        let detector = TitledNameDetector::new();
        let config = RedactConfig::default();
        let context = RedactionContext::new();
        let spans = detector.detect("History notable for Wilson's disease since childhood.", &config, &context);
        assert!(spans.is_empty());
    }

    #[test]
    fn dictionary_name_pair_is_detected() {
        let detector = DiverseNameDetector::new();
        let config = RedactConfig::default();
        let context = RedactionContext::new();
        let spans = detector.detect("The chart was reviewed by John Smith this morning.", &config, &context);
        assert!(spans.iter().any(|s| s.text == "John Smith"));
    }

    struct StubNerEngine;
    impl NerEngine for StubNerEngine {
        fn infer(&self, text: &str) -> Vec<NerDetection> {
            let start = text.find("Alex Rivera").unwrap();
            vec![NerDetection { label: NerLabel::PatientName, text: "Alex Rivera".to_string(), byte_start: start, byte_end: start + "Alex Rivera".len(), score: 0.8 }]
        }
    }

    #[test]
    fn ml_detector_emits_spans_when_enabled_and_engine_present() {
        let detector = MlNameDetector::new();
        let mut config = RedactConfig::default();
        config.gliner_enabled = true;
        let context = RedactionContext::new().with_ner_engine(Arc::new(StubNerEngine));
        let spans = detector.detect("The patient Alex Rivera reported improvement.", &config, &context);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].filter_type, FilterType::Name);
    }

    #[test]
    fn ml_detector_disabled_by_default_config() {
        let detector = MlNameDetector::new();
        let config = RedactConfig::default();
        assert!(!detector.is_enabled(&config));
    }

    struct WhitelistedTermEngine;
    impl NerEngine for WhitelistedTermEngine {
        fn infer(&self, text: &str) -> Vec<NerDetection> {
            let start = text.find("FINDINGS").unwrap();
            vec![NerDetection { label: NerLabel::PersonName, text: "FINDINGS".to_string(), byte_start: start, byte_end: start + "FINDINGS".len(), score: 0.9 }]
        }
    }

    #[test]
    fn ml_detector_suppresses_whitelisted_section_header() {
        let detector = MlNameDetector::new();
        let mut config = RedactConfig::default();
        config.gliner_enabled = true;
        let context = RedactionContext::new().with_ner_engine(Arc::new(WhitelistedTermEngine));
        let spans = detector.detect("FINDINGS: no acute abnormality.", &config, &context);
        assert!(spans.is_empty());
    }
}
