//! Top-level detection entrypoint: fans every active detector out over
//! `rayon`, barriers any detector panic so one bad pattern never takes
//! down the whole scan, filters by `min_confidence`, then hands the
//! union to the resolver for final disjoint-plan assembly.

use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::error::{PipelineError, Result};
use crate::registry::DetectorRegistry;
use crate::resolver::resolve;
use crate::span::Span;
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// The result of a full detection pass: a disjoint, resolver-ordered list
/// of spans plus a record of which detectors faulted, if any.
#[derive(Debug, Default)]
pub struct Plan {
    pub spans: Vec<Span>,
    pub faulted_detectors: Vec<&'static str>,
}

/// Runs every detector enabled by `config` against `text`, fault-barriered
/// so a panic inside one detector is caught, logged, and excluded from the
/// plan rather than propagated — under-redaction from a faulted detector
/// is visible in `faulted_detectors`, never a crash.
pub fn detect_all(text: &str, config: &RedactConfig, context: &RedactionContext, registry: &DetectorRegistry) -> Result<Plan> {
    if context.cancellation.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }

    let active: Vec<&dyn crate::registry::Detector> = registry.active(config).collect();
    tracing::info!(detector_count = active.len(), text_len = text.len(), "starting detection pass");

    let results: Vec<(&'static str, std::result::Result<Vec<Span>, ()>)> = active
        .par_iter()
        .map(|detector| {
            let name = detector.name();
            let outcome = catch_unwind(AssertUnwindSafe(|| detector.detect(text, config, context)));
            match outcome {
                Ok(spans) => {
                    tracing::info!(detector = name, span_count = spans.len(), "detector completed");
                    (name, Ok(spans))
                }
                Err(_) => {
                    tracing::warn!(detector = name, "detector panicked; excluded from plan");
                    (name, Err(()))
                }
            }
        })
        .collect();

    if context.cancellation.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }

    let mut all_spans = Vec::new();
    let mut faulted_detectors = Vec::new();
    for (name, outcome) in results {
        match outcome {
            Ok(spans) => all_spans.extend(spans.into_iter().filter(|s| s.confidence >= config.min_confidence)),
            Err(()) => faulted_detectors.push(name),
        }
    }

    let spans = resolve(all_spans);
    Ok(Plan { spans, faulted_detectors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::build_default_registry;

    #[test]
    fn detects_mrn_date_and_phone_without_crashing() {
        let registry = build_default_registry();
        let config = RedactConfig::default();
        let context = RedactionContext::new();
        let text = "MRN: 00482913, DOB: 03/14/1985, contact at (555) 867-5309.";
        let plan = detect_all(text, &config, &context, &registry).expect("detection should succeed");
        assert!(plan.faulted_detectors.is_empty());
        assert!(plan.spans.iter().any(|s| s.filter_type == crate::span::FilterType::Mrn));
        assert!(plan.spans.iter().any(|s| s.filter_type == crate::span::FilterType::Date));
        assert!(plan.spans.iter().any(|s| s.filter_type == crate::span::FilterType::Phone));
    }

    #[test]
    fn output_spans_are_disjoint() {
        let registry = build_default_registry();
        let config = RedactConfig::default();
        let context = RedactionContext::new();
        let text = "Patient: Maria Gonzalez, SSN 123-45-6789, seen by Dr. Wilson yesterday during rounds.";
        let plan = detect_all(text, &config, &context, &registry).expect("detection should succeed");
        for window in plan.spans.windows(2) {
            assert!(window[0].character_end <= window[1].character_start);
        }
    }

    #[test]
    fn cancellation_short_circuits_before_running_detectors() {
        let registry = build_default_registry();
        let config = RedactConfig::default();
        let context = RedactionContext::new();
        context.cancellation.cancel();
        let result = detect_all("anything at all", &config, &context, &registry);
        assert!(matches!(result, Err(PipelineError::Cancelled)));
    }
}
