//! The conflict resolver: merges the unordered union of every detector's
//! spans into a disjoint, deterministically-ordered plan.
//!
//! Algorithm (mirrors the teacher's score-then-sweep resolvers in
//! `span.rs`/`interval.rs`, but replaces their weighted composite score
//! with the stricter priority-first tie-break this system requires):
//!
//! 1. Sort by `(characterStart ASC, characterEnd DESC, priority DESC)`.
//! 2. Sweep left-to-right holding a single "current winner".
//! 3. Disjoint candidate: emit the winner, candidate becomes the new
//!    winner. Candidate fully inside winner, winner fully inside
//!    candidate, or partial overlap: tie-break decides in every case; the
//!    loser is recorded in the winner's `ambiguousWith`.
//! 4. Tie-break: priority, then length, then confidence, then earlier
//!    start, then `filterType` label as a last deterministic fallback.

use crate::span::{DisambiguationScore, Span};
use std::cmp::Ordering;

fn tie_break(a: &Span, b: &Span) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.len_utf16().cmp(&b.len_utf16()))
        .then_with(|| a.confidence.partial_cmp(&b.confidence).unwrap_or(Ordering::Equal))
        .then_with(|| b.character_start.cmp(&a.character_start)) // earlier start wins -> reverse cmp
        .then_with(|| b.filter_type.as_str().cmp(a.filter_type.as_str()))
}

/// `true` if `candidate` should replace `winner` under the tie-break order
/// (i.e. candidate is strictly greater).
fn candidate_wins(candidate: &Span, winner: &Span) -> bool {
    tie_break(candidate, winner) == Ordering::Greater
}

pub fn resolve(mut spans: Vec<Span>) -> Vec<Span> {
    if spans.is_empty() {
        return spans;
    }

    spans.sort_by(|a, b| {
        a.character_start
            .cmp(&b.character_start)
            .then_with(|| b.character_end.cmp(&a.character_end))
            .then_with(|| b.priority.cmp(&a.priority))
    });

    let mut output: Vec<Span> = Vec::with_capacity(spans.len());
    let mut iter = spans.into_iter();
    let mut winner = iter.next().expect("checked non-empty above");
    winner.disambiguation_score = Some(DisambiguationScore {
        priority: winner.priority,
        length: winner.len_utf16(),
        confidence: winner.confidence,
    });

    for mut candidate in iter {
        candidate.disambiguation_score = Some(DisambiguationScore {
            priority: candidate.priority,
            length: candidate.len_utf16(),
            confidence: candidate.confidence,
        });

        if candidate.character_start >= winner.character_end {
            // Disjoint: winner is final, candidate becomes the new winner.
            output.push(winner);
            winner = candidate;
            continue;
        }

        if winner.contains(&candidate) {
            // Candidate fully inside winner: tie-break decides, same as the
            // other containment/overlap cases, so a shorter higher-priority
            // span nested inside a longer lower-priority one still wins.
            if candidate_wins(&candidate, &winner) {
                candidate.ambiguous_with.push(winner.id);
                winner = candidate;
            } else {
                winner.ambiguous_with.push(candidate.id);
            }
            continue;
        }

        if candidate.contains(&winner) {
            // Winner fully inside candidate.
            if candidate_wins(&candidate, &winner) {
                candidate.ambiguous_with.push(winner.id);
                winner = candidate;
            } else {
                winner.ambiguous_with.push(candidate.id);
            }
            continue;
        }

        // Partial (or coincident-range) overlap: tie-break decides.
        if candidate_wins(&candidate, &winner) {
            candidate.ambiguous_with.push(winner.id);
            winner = candidate;
        } else {
            winner.ambiguous_with.push(candidate.id);
        }
    }
    output.push(winner);

    for span in &mut output {
        span.ambiguous_with.sort_unstable();
        span.ambiguous_with.dedup();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{FilterType, PostEmitFields};

    fn span(id: u64, filter_type: FilterType, start: u32, end: u32, confidence: f64) -> Span {
        Span {
            id,
            filter_type,
            text: String::new(),
            original_value: String::new(),
            character_start: start,
            character_end: end,
            confidence,
            priority: filter_type.priority_class(),
            pattern: "test",
            context: String::new(),
            window: None,
            ambiguous_with: Vec::new(),
            disambiguation_score: None,
            post_emit: PostEmitFields::default(),
        }
    }

    #[test]
    fn disjoint_spans_all_survive() {
        let spans = vec![
            span(1, FilterType::Email, 0, 5, 0.9),
            span(2, FilterType::Phone, 10, 20, 0.9),
        ];
        let resolved = resolve(spans);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn higher_priority_wins_on_containment() {
        // SSN (priority 100) fully contains a lower-priority NAME guess.
        let spans = vec![span(1, FilterType::Name, 0, 20, 0.9), span(2, FilterType::Ssn, 0, 11, 0.9)];
        let resolved = resolve(spans);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].filter_type, FilterType::Ssn);
        assert!(resolved[0].ambiguous_with.contains(&1));
    }

    #[test]
    fn output_is_disjoint() {
        let spans = vec![
            span(1, FilterType::Dea, 0, 9, 0.95),
            span(2, FilterType::Mrn, 5, 15, 0.9),
            span(3, FilterType::Date, 20, 30, 0.9),
        ];
        let resolved = resolve(spans);
        for w in resolved.windows(2) {
            assert!(w[0].character_end <= w[1].character_start);
        }
    }

    #[test]
    fn deterministic_across_input_order() {
        let a = vec![span(1, FilterType::Ssn, 0, 11, 0.9), span(2, FilterType::Name, 0, 20, 0.9)];
        let b = vec![span(2, FilterType::Name, 0, 20, 0.9), span(1, FilterType::Ssn, 0, 11, 0.9)];
        let ra = resolve(a);
        let rb = resolve(b);
        assert_eq!(ra.len(), rb.len());
        assert_eq!(ra[0].filter_type, rb[0].filter_type);
    }
}
