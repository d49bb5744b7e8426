//! Diversification, ordering and finalisation of live-mode results.
//!
//! Diversification walks candidates in preliminary rank order, so the best
//! candidate of each category is never the one penalised and the outcome
//! does not depend on the order candidates arrive in.
#![expect(
    clippy::float_arithmetic,
    reason = "ranking adjusts and compares fractional scores"
)]

use std::collections::HashMap;

use crate::{Candidate, EngineSettings, Mode, RankedCandidate, ScoreBreakdown};

/// A candidate carrying its live-mode score.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Scored<'a> {
    pub(crate) candidate: &'a Candidate,
    pub(crate) score: f64,
    pub(crate) breakdown: ScoreBreakdown,
}

/// Subtract `ln(occurrences) × weight` from repeated categories.
///
/// The first candidate of each category keeps its score. Scores never drop
/// below zero.
pub(crate) fn diversify(items: &mut [Scored<'_>], weight: f64) {
    let mut seen: HashMap<&str, u32> = HashMap::new();
    for item in items.iter_mut() {
        let candidate = item.candidate;
        let count = seen.entry(candidate.category_or_other()).or_insert(0);
        *count = count.saturating_add(1);
        let penalty = f64::from(*count).ln() * weight;
        item.score = (item.score - penalty).max(0.0);
    }
}

/// Sort by priority, then score, then rating.
///
/// Scores closer than `epsilon` to the leading score of their run are ties
/// and fall back to rating. Runs are anchored on their first member so the
/// ordering is total.
pub(crate) fn order(items: &mut [Scored<'_>], epsilon: f64) {
    items.sort_by(|a, b| {
        b.candidate
            .priority
            .cmp(&a.candidate.priority)
            .then_with(|| b.score.total_cmp(&a.score))
    });

    let mut start = 0;
    while let Some(lead) = items.get(start) {
        let (priority, score) = (lead.candidate.priority, lead.score);
        let run = items
            .iter()
            .skip(start)
            .take_while(|item| item.candidate.priority == priority && score - item.score < epsilon)
            .count();
        let end = start + run.max(1);
        if let Some(tied) = items.get_mut(start..end) {
            tied.sort_by(|a, b| {
                b.candidate
                    .rating_or_zero()
                    .total_cmp(&a.candidate.rating_or_zero())
            });
        }
        start = end;
    }
}

/// Truncate and stamp rank, mode and confidence.
pub(crate) fn finalise(
    items: Vec<Scored<'_>>,
    max_results: usize,
    settings: &EngineSettings,
) -> Vec<RankedCandidate> {
    items
        .into_iter()
        .take(max_results)
        .enumerate()
        .map(|(index, item)| RankedCandidate {
            candidate: item.candidate.clone(),
            rank: index + 1,
            mode: Mode::Live,
            confidence: settings.confidence(item.score),
            score: Some(item.score),
            breakdown: Some(item.breakdown),
            note: None,
        })
        .collect()
}

/// Sort candidates by descending rating, keeping input order among equals.
pub(crate) fn by_rating(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut sorted: Vec<&Candidate> = candidates.iter().collect();
    sorted.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
    sorted
}

/// Stamp a fixed confidence and note onto candidates already in rank order.
pub(crate) fn stamp_fixed<'a, I>(
    candidates: I,
    mode: Mode,
    confidence: f64,
    note: &str,
) -> Vec<RankedCandidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| RankedCandidate {
            candidate: candidate.clone(),
            rank: index + 1,
            mode,
            confidence,
            score: None,
            breakdown: None,
            note: Some(note.to_owned()),
        })
        .collect()
}
