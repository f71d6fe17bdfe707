//! One module per identifier class. Each exposes a unit struct
//! implementing [`crate::registry::Detector`] plus, where useful, a
//! standalone `scan` function the unit tests exercise directly.

pub mod address;
pub mod biometric;
pub mod credit_card;
pub mod date;
pub mod dea;
pub mod device;
pub mod email;
pub mod fax;
pub mod healthplan;
pub mod ip;
pub mod license;
pub mod mrn;
pub mod name;
pub mod npi;
pub mod phone;
pub mod relative_date;
pub mod ssn;
pub mod url;
pub mod vehicle;
pub mod zipcode;

use crate::accelerator::Detection as AccelDetection;
use crate::context::RedactionContext;
use crate::offsets::{build_utf16_index_map, byte_to_utf16, next_char_boundary, prev_char_boundary};
use crate::span::{FilterType, PostEmitFields, Span};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SPAN_ID: AtomicU64 = AtomicU64::new(1);

pub fn next_span_id() -> u64 {
    NEXT_SPAN_ID.fetch_add(1, Ordering::Relaxed)
}

/// Shared helper: builds a `Span` from a byte-offset match, converting to
/// UTF-16 offsets via a precomputed index and sampling a bounded context
/// window for the audit trail.
pub fn build_span(
    text: &str,
    utf16_table: &[(usize, u32)],
    byte_start: usize,
    byte_end: usize,
    filter_type: FilterType,
    confidence: f64,
    pattern: &'static str,
    window_chars: usize,
) -> Span {
    let left = prev_char_boundary(text, byte_start.saturating_sub(window_chars));
    let right = next_char_boundary(text, (byte_end + window_chars).min(text.len()));

    Span {
        id: next_span_id(),
        filter_type,
        text: text[byte_start..byte_end].to_string(),
        original_value: text[byte_start..byte_end].to_string(),
        character_start: byte_to_utf16(utf16_table, byte_start),
        character_end: byte_to_utf16(utf16_table, byte_end),
        confidence,
        priority: filter_type.priority_class(),
        pattern,
        context: text[left..right].to_string(),
        window: None,
        ambiguous_with: Vec::new(),
        disambiguation_score: None,
        post_emit: PostEmitFields::default(),
    }
}

/// Builds the UTF-16 index once; every detector that needs offset
/// conversion calls this at the top of `detect` rather than sharing
/// cross-detector state (keeping detectors independent, per the no
/// cross-detector-ordering guarantee).
pub fn utf16_table(text: &str) -> Vec<(usize, u32)> {
    build_utf16_index_map(text)
}

/// Drops overlapping matches from a single detector's own candidate list,
/// first-match-wins on the lower `[start, end)` — used by detectors (URL,
/// in particular) whose own pattern families can double-match the same
/// text.
pub fn dedup_first_match_wins(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by_key(|s| (s.character_start, s.character_end));
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        let overlaps_prev = out.last().map(|prev: &Span| span.character_start < prev.character_end).unwrap_or(false);
        if !overlaps_prev {
            out.push(span);
        }
    }
    out
}

/// Consults the accelerator for `filter_type`; if it returns detections,
/// wraps them into spans and reports that the portable scan should be
/// skipped (`Some`). Returns `None` when the portable scan must run.
pub fn try_accelerate(
    context: &RedactionContext,
    text: &str,
    filter_type: FilterType,
    pattern_name: &'static str,
    window_chars: usize,
) -> Option<Vec<Span>> {
    let accelerator = context.accelerator.as_ref()?;
    let detections: Vec<AccelDetection> = accelerator.get_detections(context, text, filter_type)?;
    if detections.is_empty() {
        return None;
    }
    // Accelerator detections already carry UTF-16 offsets (the FFI
    // boundary's native convention); no byte conversion needed here.
    Some(
        detections
            .into_iter()
            .map(|d| {
                let byte_start = d.character_start as usize;
                let byte_end = d.character_end as usize;
                let left = prev_char_boundary(text, byte_start.saturating_sub(window_chars).min(text.len()));
                let right = next_char_boundary(text, (byte_end + window_chars).min(text.len()));
                // The invariant `originalValue == input[start:end]` binds regardless
                // of what the accelerator reports as `text`; slice the real input
                // rather than trust the native side blindly (spec.md §4.4/§4.6).
                let original_value = text.get(byte_start..byte_end).unwrap_or(&d.text).to_string();
                Span {
                    id: next_span_id(),
                    filter_type,
                    text: d.text,
                    original_value,
                    character_start: d.character_start,
                    character_end: d.character_end,
                    confidence: d.confidence,
                    priority: filter_type.priority_class(),
                    pattern: pattern_name,
                    context: text.get(left..right).unwrap_or_default().to_string(),
                    window: None,
                    ambiguous_with: Vec::new(),
                    disambiguation_score: None,
                    post_emit: PostEmitFields::default(),
                }
            })
            .collect(),
    )
}
