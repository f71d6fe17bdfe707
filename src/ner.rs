//! The pluggable ML name-detection capability.
//!
//! Model loading and inference are out of scope: this module specifies
//! the interface a caller plugs a real zero-shot NER model behind, plus
//! the confidence-adjustment and whitelist gating that is in scope
//! regardless of which model answers `infer`. [`NullNerEngine`] is the
//! default and always reports no detections, which is indistinguishable
//! from "model unavailable" per the failure semantics of this engine.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NerLabel {
    PatientName,
    ProviderName,
    PersonName,
    FamilyMember,
}

impl NerLabel {
    /// Per-label acceptance threshold the raw model score must clear.
    pub fn threshold(self) -> f64 {
        match self {
            NerLabel::PatientName => 0.60,
            NerLabel::ProviderName => 0.65,
            NerLabel::PersonName => 0.70,
            NerLabel::FamilyMember => 0.65,
        }
    }
}

/// One raw model detection, in byte offsets into the text the engine was
/// given (the caller converts to UTF-16 offsets when building a `Span`).
#[derive(Debug, Clone)]
pub struct NerDetection {
    pub label: NerLabel,
    pub text: String,
    pub byte_start: usize,
    pub byte_end: usize,
    pub score: f64,
}

/// The capability handle for the ML-backed name detector. Intentionally a
/// trait object handed through `RedactionContext` rather than a process
/// singleton — the spec forbids lazy global model state, and this keeps
/// every invocation's model choice explicit and testable.
pub trait NerEngine: Send + Sync {
    fn infer(&self, text: &str) -> Vec<NerDetection>;
}

pub struct NullNerEngine;

impl NerEngine for NullNerEngine {
    fn infer(&self, _text: &str) -> Vec<NerDetection> {
        Vec::new()
    }
}

/// Applies the confidence adjustment formula: +0.10 for multi-word,
/// +0.05 for capitalized, ×0.9 for length < 4 characters; capped at 0.98.
pub fn adjust_confidence(raw_score: f64, candidate: &str) -> f64 {
    let mut score = raw_score;
    if candidate.split_whitespace().count() > 1 {
        score += 0.10;
    }
    if candidate.chars().next().map(|c| c.is_uppercase()).unwrap_or(false) {
        score += 0.05;
    }
    if candidate.chars().count() < 4 {
        score *= 0.9;
    }
    score.min(0.98)
}

/// Priority intentionally 5 lower than the rule-based diverse-name
/// detector, so the resolver prefers rule-based detections on overlap.
pub fn ml_priority(rule_based_priority: u32) -> u32 {
    rule_based_priority.saturating_sub(5)
}

pub fn label_to_keywords() -> HashMap<NerLabel, &'static str> {
    let mut m = HashMap::new();
    m.insert(NerLabel::PatientName, "patient_name");
    m.insert(NerLabel::ProviderName, "provider_name");
    m.insert(NerLabel::PersonName, "person_name");
    m.insert(NerLabel::FamilyMember, "family_member");
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_engine_reports_nothing() {
        assert!(NullNerEngine.infer("Patient: John Smith").is_empty());
    }

    #[test]
    fn multi_word_capitalized_boost_applies() {
        let adjusted = adjust_confidence(0.70, "John Smith");
        assert!((adjusted - 0.85).abs() < 1e-9);
    }

    #[test]
    fn short_candidate_is_damped() {
        let adjusted = adjust_confidence(0.80, "Bo");
        assert!((adjusted - (0.80 * 0.9)).abs() < 1e-9);
    }

    #[test]
    fn confidence_caps_at_098() {
        let adjusted = adjust_confidence(0.95, "Patricia Montgomery");
        assert!(adjusted <= 0.98);
    }

    #[test]
    fn ml_priority_is_five_below_rule_based() {
        assert_eq!(ml_priority(20), 15);
    }
}
