//! Whitelist gating shared by the name detectors.
//!
//! A candidate name is suppressed if it is a medical term, a section
//! header, a role word, or another known non-person structure term —
//! unless it is directly preceded by a person title or family-relationship
//! label, in which case the whitelist is bypassed. This is what makes
//! "Dr. Wilson" survive even though "Wilson's disease" is whitelisted.

use crate::context::ContextAnalyzer;
use crate::dictionaries::{
    DISEASE_EPONYMS, DISEASE_NAMES, MEDICATIONS, ORGANIZATIONS, PROCEDURES, SECTION_HEADERS,
};

/// Role words that, standing alone, are never a person name even though
/// they're capitalized often enough to pass surface shape checks.
const ROLE_WORDS: [&str; 6] = ["patient", "doctor", "nurse", "provider", "physician", "staff"];

pub struct WhitelistGate {
    context: ContextAnalyzer,
}

impl WhitelistGate {
    pub fn new() -> Self {
        Self { context: ContextAnalyzer::new() }
    }

    /// Returns `true` if `candidate` (as it literally appears, case
    /// preserved) should be suppressed as a name detection at `start` in
    /// `text`.
    pub fn should_suppress(&self, text: &str, start: usize, candidate: &str) -> bool {
        if self.context.preceded_by_title_or_family_label(text, start) {
            return false;
        }
        self.is_whitelisted(candidate)
    }

    pub fn is_whitelisted(&self, candidate: &str) -> bool {
        if candidate.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
        if candidate.len() < 3 && candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
            return true;
        }
        let lower = candidate.to_ascii_lowercase();
        let trimmed = lower.trim();

        if SECTION_HEADERS.contains(candidate.to_ascii_uppercase().as_str()) {
            return true;
        }
        if ROLE_WORDS.contains(&trimmed) {
            return true;
        }
        DISEASE_EPONYMS.contains(trimmed)
            || DISEASE_NAMES.contains(trimmed)
            || MEDICATIONS.contains(trimmed)
            || PROCEDURES.contains(trimmed)
            || ORGANIZATIONS.contains(trimmed)
    }
}

impl Default for WhitelistGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_wilsons_disease_mention_is_whitelisted() {
        let gate = WhitelistGate::new();
        let text = "History notable for Wilson's disease diagnosed in childhood.";
        let start = text.find("Wilson's").unwrap();
        assert!(gate.should_suppress(text, start, "Wilson's"));
    }

    #[test]
    fn dr_wilson_survives_despite_eponym_whitelist() {
        let gate = WhitelistGate::new();
        let text = "Seen today by Dr. Wilson for follow-up.";
        let start = text.find("Wilson").unwrap();
        assert!(!gate.should_suppress(text, start, "Wilson"));
    }

    #[test]
    fn section_header_is_whitelisted() {
        let gate = WhitelistGate::new();
        assert!(gate.is_whitelisted("FINDINGS"));
    }
}
