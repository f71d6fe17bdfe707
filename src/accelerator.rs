//! The acceleration shim: the only FFI-shaped boundary the core imposes
//! on external systems.
//!
//! For detector types that declare acceleration support, a detector first
//! asks the accelerator for detections. If it returns a non-empty list,
//! those are wrapped into spans and the portable pattern scan is skipped
//! entirely for that call. If it returns `None`, the portable scan runs.
//! The accelerator's failure is indistinguishable from "no acceleration
//! available" — there is no error path here by design.

use crate::context::RedactionContext;
use crate::span::FilterType;

/// A single raw detection handed back across the accelerator boundary,
/// before it's been wrapped into a full `Span` (confidence, pattern name,
/// and context window still need to be attached by the calling detector).
#[derive(Debug, Clone)]
pub struct Detection {
    pub text: String,
    pub character_start: u32,
    pub character_end: u32,
    pub confidence: f64,
    pub pattern: String,
}

/// Implementors must guarantee: for any input, the spans returned are a
/// subset of what the portable scan would emit, with identical `[start,
/// end)` for each retained match. Confidences may differ. When in doubt,
/// return `None` and let the portable scan run — silently dropping a span
/// the portable code would have kept is never acceptable.
pub trait Accelerator: Send + Sync {
    fn get_detections(
        &self,
        context: &RedactionContext,
        text: &str,
        filter_type: FilterType,
    ) -> Option<Vec<Detection>>;

    /// Types this accelerator declares it can handle. A detector should
    /// still probe `get_detections` and treat a `None` return as "not
    /// available for this call" even for a declared-supported type.
    fn supports(&self, _filter_type: FilterType) -> bool {
        true
    }
}

/// Default accelerator: always defers to the portable scan. Using this is
/// behaviorally identical to having no accelerator wired in at all.
pub struct NullAccelerator;

impl Accelerator for NullAccelerator {
    fn get_detections(&self, _context: &RedactionContext, _text: &str, _filter_type: FilterType) -> Option<Vec<Detection>> {
        None
    }

    fn supports(&self, _filter_type: FilterType) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_accelerator_always_defers() {
        let accel = NullAccelerator;
        let ctx = RedactionContext::default();
        assert!(accel.get_detections(&ctx, "anything", FilterType::Email).is_none());
        assert!(!accel.supports(FilterType::Email));
    }
}
