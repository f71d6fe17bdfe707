//! Clinical-context strength scoring.
//!
//! Answers "how strongly does the text around `[start, end)` read as
//! clinical documentation about a patient?" — used to gate
//! context-sensitive detectors (relative dates, single given names) and
//! to compute a small confidence boost blended into a span's final score.

use crate::accelerator::Accelerator;
use crate::dictionaries::{CLINICAL_ROLES_RE, FAMILY_TERMS_RE, PHI_LABELS_RE, TITLE_CONTEXT_RE};
use crate::ner::NerEngine;
use crate::offsets::{next_char_boundary, prev_char_boundary};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContextStrength {
    None,
    Weak,
    Moderate,
    Strong,
}

#[derive(Debug, Clone, Copy)]
pub struct ContextSignal {
    pub strength: ContextStrength,
    /// Confidence boost in [0.0, 0.15], added to a detector's base score.
    pub boost: f64,
}

/// Stateless; dictionaries and context gates are all `'static` lookups.
/// Kept as a struct (rather than free functions) so it can be threaded
/// through `RedactionContext` and swapped in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextAnalyzer;

impl ContextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Samples a `window_chars`-wide band of text centered on `[start,
    /// end)` and classifies how strongly it reads as clinical/patient
    /// context.
    pub fn analyze(&self, text: &str, start: usize, end: usize, window_chars: usize) -> ContextSignal {
        let left = prev_char_boundary(text, start.saturating_sub(window_chars));
        let right = next_char_boundary(text, (end + window_chars).min(text.len()));
        let window = &text[left..right];

        let mut hits = 0u32;
        if PHI_LABELS_RE.is_match(window) {
            hits += 2;
        }
        if CLINICAL_ROLES_RE.is_match(window) {
            hits += 2;
        }
        if TITLE_CONTEXT_RE.is_match(window) {
            hits += 1;
        }
        if FAMILY_TERMS_RE.is_match(window) {
            hits += 1;
        }

        let (strength, boost) = match hits {
            0 => (ContextStrength::None, 0.0),
            1 => (ContextStrength::Weak, 0.05),
            2 | 3 => (ContextStrength::Moderate, 0.10),
            _ => (ContextStrength::Strong, 0.15),
        };
        ContextSignal { strength, boost }
    }

    /// True if the text immediately preceding `start` carries a person
    /// title or family-relationship label — the one condition under which
    /// the whitelist gate in [`crate::whitelist`] is bypassed.
    pub fn preceded_by_title_or_family_label(&self, text: &str, start: usize) -> bool {
        let left = prev_char_boundary(text, start.saturating_sub(40));
        let window = &text[left..start];
        TITLE_CONTEXT_RE.is_match(window) || FAMILY_TERMS_RE.is_match(window) || PHI_LABELS_RE.is_match(window)
    }
}

/// A caller-supplied document date, used to anchor relative-date
/// detections ("three days post-op" relative to an admission date).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

/// Cooperative cancellation signal checked between pattern scans.
/// Cloning shares the same underlying flag.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-invocation shared state: created fresh for each call to
/// `detect_all`, passed by reference to every detector, discarded after
/// plan emission. Read-mostly; any detector-managed mutation must be
/// confined to invocation-scoped caches and be idempotent and commutative
/// across detector execution order, since detectors run concurrently with
/// no ordering guarantee between them.
pub struct RedactionContext {
    pub document_date: Option<DocumentDate>,
    pub accelerator: Option<Arc<dyn Accelerator>>,
    pub ner_engine: Option<Arc<dyn NerEngine>>,
    pub cancellation: CancellationToken,
    analyzer: ContextAnalyzer,
}

impl RedactionContext {
    pub fn new() -> Self {
        Self {
            document_date: None,
            accelerator: None,
            ner_engine: None,
            cancellation: CancellationToken::new(),
            analyzer: ContextAnalyzer::new(),
        }
    }

    pub fn with_accelerator(mut self, accelerator: Arc<dyn Accelerator>) -> Self {
        self.accelerator = Some(accelerator);
        self
    }

    pub fn with_ner_engine(mut self, engine: Arc<dyn NerEngine>) -> Self {
        self.ner_engine = Some(engine);
        self
    }

    pub fn with_document_date(mut self, date: DocumentDate) -> Self {
        self.document_date = Some(date);
        self
    }

    pub fn analyzer(&self) -> &ContextAnalyzer {
        &self.analyzer
    }
}

impl Default for RedactionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_label_and_role_yields_strong_context() {
        let analyzer = ContextAnalyzer::new();
        let text = "Attending physician: Patient: the infusion was started yesterday.";
        let signal = analyzer.analyze(text, 40, 49, 30);
        assert!(signal.strength >= ContextStrength::Moderate);
    }

    #[test]
    fn unrelated_text_yields_no_context() {
        let analyzer = ContextAnalyzer::new();
        let text = "The weather today is sunny with a light breeze.";
        let signal = analyzer.analyze(text, 10, 15, 30);
        assert_eq!(signal.strength, ContextStrength::None);
    }

    #[test]
    fn dr_prefix_is_detected_as_title_context() {
        let analyzer = ContextAnalyzer::new();
        let text = "Seen by Dr. Wilson in clinic.";
        assert!(analyzer.preceded_by_title_or_family_label(text, 12));
    }
}
