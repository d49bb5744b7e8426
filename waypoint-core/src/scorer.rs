//! Score candidates for a traveller in live mode.
//!
//! The [`Scorer`] trait assigns a [`ScoreBreakdown`] to a
//! [`Candidate`](crate::Candidate) given a [`ScoringContext`]. The engine
//! ranks on [`ScoreBreakdown::total`] after [`Scorer::sanitise`].

use chrono::{DateTime, Utc};
use geo::Coord;

use crate::location::planar_distance;
use crate::{Candidate, EngineSettings, JourneyContext, PreferenceTable, Vibe};

/// Everything about the traveller's situation a scorer may consult.
///
/// Built once per request so every candidate is judged against the same
/// clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringContext {
    /// Vibe selected by the traveller.
    pub vibe: Vibe,
    /// Minutes until departure; negative once the deadline passed.
    pub minutes_remaining: f64,
    /// Hour of day at the venue.
    pub venue_hour: u32,
    /// Floor-plan reference point, typically the gate.
    pub reference_point: Option<Coord<f64>>,
}

impl ScoringContext {
    /// Derive the scoring context for `vibe` from the journey and `now`.
    #[must_use]
    pub fn new(vibe: Vibe, journey: &JourneyContext, now: DateTime<Utc>) -> Self {
        Self {
            vibe,
            minutes_remaining: journey.minutes_until_departure(now),
            venue_hour: journey.venue_hour(now),
            reference_point: journey.reference_point,
        }
    }
}

/// The independent terms that make up a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    /// Constant added to every candidate.
    pub base: f64,
    /// Fit between tags and the selected vibe.
    pub preference: f64,
    /// Closeness to the reference point when departure is urgent.
    pub proximity: f64,
    /// Opening hours, vibe timing rules and the departure buffer.
    pub time_compatibility: f64,
}

impl ScoreBreakdown {
    /// Sum of all terms, before clamping.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "the total is a plain sum")]
    pub fn total(&self) -> f64 {
        self.base + self.preference + self.proximity + self.time_compatibility
    }
}

/// Calculate a score for a candidate.
///
/// Implementations must be `Send + Sync` so one engine can serve many
/// threads. The method is infallible; missing candidate data must yield
/// neutral terms rather than errors.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{Candidate, ScoreBreakdown, Scorer, ScoringContext, Vibe};
///
/// struct FlatScorer;
///
/// impl Scorer for FlatScorer {
///     fn score(&self, _candidate: &Candidate, _context: &ScoringContext) -> ScoreBreakdown {
///         ScoreBreakdown { base: 1.0, ..ScoreBreakdown::default() }
///     }
/// }
///
/// let context = ScoringContext {
///     vibe: Vibe::Quick,
///     minutes_remaining: 90.0,
///     venue_hour: 12,
///     reference_point: None,
/// };
/// let breakdown = FlatScorer.score(&Candidate::new(1, "Kiosk", "retail"), &context);
/// assert_eq!(breakdown.total(), 1.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return the score terms for `candidate` in `context`.
    fn score(&self, candidate: &Candidate, context: &ScoringContext) -> ScoreBreakdown;

    /// Clamp a raw total to a finite, non-negative value.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if score.is_finite() { score.max(0.0) } else { 0.0 }
    }
}

/// Rule-table scorer driven by a [`PreferenceTable`].
#[derive(Debug, Clone)]
pub struct VibeScorer {
    table: PreferenceTable,
    settings: EngineSettings,
}

impl VibeScorer {
    /// Build a scorer from a table and engine thresholds.
    #[must_use]
    pub const fn new(table: PreferenceTable, settings: EngineSettings) -> Self {
        Self { table, settings }
    }

    /// Closeness to the reference point, only while departure is urgent.
    #[expect(
        clippy::float_arithmetic,
        reason = "proximity is a linear ratio of distances"
    )]
    fn proximity(&self, candidate: &Candidate, context: &ScoringContext) -> f64 {
        let max_distance = self.settings.proximity_max_distance;
        if context.minutes_remaining >= self.settings.urgent_minutes || max_distance <= 0.0 {
            return 0.0;
        }
        let distance = planar_distance(candidate.location, context.reference_point, max_distance);
        let ratio = ((max_distance - distance) / max_distance).max(0.0);
        ratio * self.table.weights().proximity_multiplier
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "time terms accumulate fractional points"
    )]
    fn time_compatibility(&self, candidate: &Candidate, context: &ScoringContext) -> f64 {
        let weights = self.table.weights();
        let remaining = context.minutes_remaining;
        let mut points = 0.0;

        if !candidate.is_open_at(context.venue_hour) {
            points += weights.closed_penalty;
        }
        if let Some(profile) = self.table.profile(context.vibe) {
            points += profile.timing.adjustment(candidate, remaining);
        }

        let visit = f64::from(
            candidate
                .estimated_duration_minutes
                .unwrap_or(self.settings.default_visit_minutes),
        );
        if visit > remaining - self.settings.buffer_minutes {
            points += weights.buffer_penalty;
        }
        points
    }
}

impl Scorer for VibeScorer {
    fn score(&self, candidate: &Candidate, context: &ScoringContext) -> ScoreBreakdown {
        ScoreBreakdown {
            base: self.table.weights().base_score,
            preference: self.table.preference_score(context.vibe, candidate),
            proximity: self.proximity(candidate, context),
            time_compatibility: self.time_compatibility(candidate, context),
        }
    }
}
