//! Span conflict resolution.
//!
//! Detectors report spans independently, so the same text can be claimed more
//! than once:
//!
//! ```text
//! text:     J o h n   S m i t h
//!           [PERSON 0..10 0.85 ]
//!           [NAME 0..4]
//!                     [NAME 5..10 0.6]
//! ```
//!
//! Two spans conflict when their half-open ranges share an offset. Adjacent
//! spans (`[0,4)` and `[4,8)`) do not conflict.
//!
//! Resolution visits every span once in a fixed order chosen by the
//! [`ConflictPolicy`] and keeps a span only if it does not conflict with a span
//! kept before it. The visit order never depends on hashing or on anything but
//! the input slice, so the same input always resolves the same way.
//!
//! The scan is pairwise, O(n²) in the number of spans.

use crate::DetectedSpan;
use serde::{Deserialize, Serialize};

/// Which span wins when two detections conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Higher score wins. Equal scores prefer the longer span, then the one
    /// starting first, then the one earlier in the input.
    #[default]
    HighestScore,
    /// The span earlier in the input wins, regardless of score.
    FirstSeen,
}

impl std::str::FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highest-score" => Ok(ConflictPolicy::HighestScore),
            "first-seen" => Ok(ConflictPolicy::FirstSeen),
            other => Err(format!("unknown conflict policy '{other}' (expected highest-score or first-seen)")),
        }
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Default)]
pub struct Resolution<'s> {
    /// Non-conflicting spans, ascending by `start`.
    pub kept: Vec<&'s DetectedSpan>,
    /// Spans that lost a conflict, in input order.
    pub dropped: Vec<&'s DetectedSpan>,
}

/// Reduce `spans` to a non-conflicting subset.
///
/// Spans are assumed validated (non-empty, in bounds).
pub(crate) fn resolve(spans: &[DetectedSpan], policy: ConflictPolicy) -> Resolution<'_> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    if policy == ConflictPolicy::HighestScore {
        order.sort_by(|&a, &b| {
            let (sa, sb) = (&spans[a], &spans[b]);
            sb.score
                .total_cmp(&sa.score)
                .then_with(|| sb.len().cmp(&sa.len()))
                .then_with(|| sa.start.cmp(&sb.start))
                .then_with(|| a.cmp(&b))
        });
    }

    let mut kept: Vec<usize> = Vec::with_capacity(spans.len());
    let mut dropped: Vec<usize> = Vec::new();

    for idx in order {
        let candidate = &spans[idx];
        let winner = kept.iter().copied().find(|&k| spans[k].intersects(candidate));
        match winner {
            Some(winner) => {
                tracing::trace!(
                    dropped.entity_type = %candidate.entity_type,
                    dropped.start = candidate.start,
                    dropped.end = candidate.end,
                    kept.entity_type = %spans[winner].entity_type,
                    "span conflict"
                );
                dropped.push(idx);
            }
            None => kept.push(idx),
        }
    }

    // Kept spans are disjoint and non-empty, so `start` alone orders them; the
    // index only keeps the sort total.
    kept.sort_by_key(|&i| (spans[i].start, i));
    dropped.sort_unstable();

    Resolution {
        kept: kept.into_iter().map(|i| &spans[i]).collect(),
        dropped: dropped.into_iter().map(|i| &spans[i]).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(entity_type: &str, start: usize, end: usize, score: f64) -> DetectedSpan {
        DetectedSpan::new(entity_type, start, end, score)
    }

    fn kept(spans: &[DetectedSpan], policy: ConflictPolicy) -> Vec<DetectedSpan> {
        resolve(spans, policy).kept.into_iter().cloned().collect()
    }

    #[test]
    fn non_overlapping_spans_are_kept_unchanged() {
        let spans = vec![span("LOCATION", 14, 16, 0.8), span("PERSON", 0, 4, 0.9), span("DATE", 5, 10, 0.3)];
        let out = kept(&spans, ConflictPolicy::HighestScore);
        assert_eq!(out, vec![spans[1].clone(), spans[2].clone(), spans[0].clone()]);
        assert_eq!(kept(&spans, ConflictPolicy::FirstSeen), out);
    }

    #[test]
    fn adjacent_spans_do_not_conflict() {
        let spans = vec![span("A", 0, 4, 0.5), span("B", 4, 8, 0.5)];
        assert_eq!(kept(&spans, ConflictPolicy::HighestScore).len(), 2);
    }

    #[test]
    fn equal_ranges_keep_highest_score() {
        let spans = vec![span("NAME", 0, 4, 0.5), span("PERSON", 0, 4, 0.9)];
        let res = resolve(&spans, ConflictPolicy::HighestScore);
        assert_eq!(res.kept, vec![&spans[1]]);
        assert_eq!(res.dropped, vec![&spans[0]]);
    }

    #[test]
    fn equal_ranges_keep_first_seen_under_first_seen_policy() {
        let spans = vec![span("NAME", 0, 4, 0.5), span("PERSON", 0, 4, 0.9)];
        assert_eq!(kept(&spans, ConflictPolicy::FirstSeen), vec![spans[0].clone()]);
    }

    #[test]
    fn full_tie_keeps_earlier_input_span() {
        let spans = vec![span("PERSON", 0, 4, 0.7), span("NAME", 0, 4, 0.7)];
        assert_eq!(kept(&spans, ConflictPolicy::HighestScore), vec![spans[0].clone()]);
    }

    #[test]
    fn equal_scores_prefer_longer_span() {
        let spans = vec![span("FIRST_NAME", 0, 4, 0.8), span("PERSON", 0, 10, 0.8)];
        assert_eq!(kept(&spans, ConflictPolicy::HighestScore), vec![spans[1].clone()]);
    }

    #[test]
    fn nested_spans_resolve_by_score() {
        // "John Smith": a confident full name swallows both parts.
        let spans = vec![span("NAME", 0, 4, 0.6), span("PERSON", 0, 10, 0.85), span("NAME", 5, 10, 0.6)];
        let res = resolve(&spans, ConflictPolicy::HighestScore);
        assert_eq!(res.kept, vec![&spans[1]]);
        assert_eq!(res.dropped, vec![&spans[0], &spans[2]]);

        // Under first-seen the parts win and are disjoint from each other.
        let res = resolve(&spans, ConflictPolicy::FirstSeen);
        assert_eq!(res.kept, vec![&spans[0], &spans[2]]);
        assert_eq!(res.dropped, vec![&spans[1]]);
    }

    #[test]
    fn only_conflicts_with_kept_spans_cause_rejection() {
        // B overlaps both A and C, A and C don't overlap. B loses to A, and
        // once B is gone C has nothing to conflict with.
        let spans = vec![span("A", 0, 5, 0.9), span("B", 4, 9, 0.8), span("C", 8, 12, 0.7)];
        let res = resolve(&spans, ConflictPolicy::HighestScore);
        assert_eq!(res.kept, vec![&spans[0], &spans[2]]);
        assert_eq!(res.dropped, vec![&spans[1]]);
    }

    #[test]
    fn partial_overlap_chain_under_first_seen() {
        let spans = vec![span("B", 4, 9, 0.1), span("A", 0, 5, 0.9), span("C", 8, 12, 0.7)];
        let res = resolve(&spans, ConflictPolicy::FirstSeen);
        assert_eq!(res.kept, vec![&spans[0]]);
        assert_eq!(res.dropped, vec![&spans[1], &spans[2]]);
    }

    #[test]
    fn exact_duplicates_collapse() {
        let spans = vec![span("PERSON", 0, 4, 0.9), span("PERSON", 0, 4, 0.9)];
        let res = resolve(&spans, ConflictPolicy::HighestScore);
        assert_eq!(res.kept.len(), 1);
        assert_eq!(res.dropped.len(), 1);
    }

    #[test]
    fn resolution_is_repeatable() {
        let spans = vec![
            span("A", 0, 6, 0.5),
            span("B", 3, 9, 0.5),
            span("C", 3, 9, 0.5),
            span("D", 7, 12, 0.9),
            span("E", 12, 14, 0.1),
        ];
        let first = kept(&spans, ConflictPolicy::HighestScore);
        for _ in 0..10 {
            assert_eq!(kept(&spans, ConflictPolicy::HighestScore), first);
        }
        assert_eq!(first, vec![spans[0].clone(), spans[3].clone(), spans[4].clone()]);
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("highest-score".parse::<ConflictPolicy>(), Ok(ConflictPolicy::HighestScore));
        assert_eq!("first-seen".parse::<ConflictPolicy>(), Ok(ConflictPolicy::FirstSeen));
        assert!("random".parse::<ConflictPolicy>().is_err());
    }
}
