//! Vibe-balanced sampling for travellers who are not on site yet.

use std::collections::HashSet;

use crate::ranking::{by_rating, stamp_fixed};
use crate::{Candidate, Mode, PreferenceTable, RankedCandidate};

/// Build a preview list of at most `max_results` candidates.
///
/// Each vibe in the table contributes up to `ceil(max_results / vibes) + 1`
/// of its best-rated matching candidates. Remaining slots are filled from
/// the highest-rated unused candidates and the whole list is re-sorted by
/// rating. No candidate id appears twice.
pub(crate) fn preview(
    table: &PreferenceTable,
    candidates: &[Candidate],
    max_results: usize,
    venue_name: &str,
    confidence: f64,
) -> Vec<RankedCandidate> {
    let vibes = table.vibes();
    let per_vibe = max_results.div_ceil(vibes.len().max(1)).saturating_add(1);
    let ranked = by_rating(candidates);

    let mut used: HashSet<u64> = HashSet::new();
    let mut picked: Vec<&Candidate> = Vec::new();
    for vibe in vibes {
        let matches = ranked
            .iter()
            .copied()
            .filter(|candidate| table.preference_score(vibe, candidate) > 0.0)
            .take(per_vibe);
        for candidate in matches {
            if used.insert(candidate.id) {
                picked.push(candidate);
            }
        }
    }
    for candidate in ranked {
        if picked.len() >= max_results {
            break;
        }
        if used.insert(candidate.id) {
            picked.push(candidate);
        }
    }

    picked.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
    picked.truncate(max_results);

    let note = format!(
        "Here's a taste of what's waiting at {venue_name}. \
         Select a vibe when you arrive for personalised picks."
    );
    stamp_fixed(picked, Mode::Preview, confidence, &note)
}
