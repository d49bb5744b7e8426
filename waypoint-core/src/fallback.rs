//! Results for travellers who share no location.

use crate::ranking::{by_rating, stamp_fixed};
use crate::{Candidate, Mode, RankedCandidate};

const NOTE: &str = "Popular choices at this venue. \
                    Enable location or choose a vibe for personalised recommendations.";

/// The `max_results` highest-rated candidates, ties kept in input order.
pub(crate) fn top_rated(
    candidates: &[Candidate],
    max_results: usize,
    confidence: f64,
) -> Vec<RankedCandidate> {
    let ranked = by_rating(candidates);
    stamp_fixed(
        ranked.into_iter().take(max_results),
        Mode::NoLocation,
        confidence,
        NOTE,
    )
}
