//! The preference relationship table: how tags relate to each vibe and how
//! much each kind of match is worth.
//!
//! The table is an immutable value handed to the engine at construction.
//! [`PreferenceTable::default`] ships the standard six vibes; venues can
//! supply their own table (for example from JSON) to tune tags per locale.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{Candidate, Vibe};

/// Points awarded or deducted by the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ScoringWeights {
    /// A tag names the selected vibe.
    pub exact_match: f64,
    /// A tag appears in the vibe's related set.
    pub related_match: f64,
    /// Added to every candidate before other terms.
    pub base_score: f64,
    /// Scales the `0.0..=1.0` proximity ratio.
    pub proximity_multiplier: f64,
    /// Informational only: no scoring or ranking rule reads this value.
    ///
    /// Repeated categories are penalised by
    /// [`RecommendationOptions::diversity_weight`](crate::RecommendationOptions::diversity_weight)
    /// instead. The field is validated and kept so stored tables round-trip
    /// unchanged.
    pub diversity_unit: f64,
    /// A tag appears in the vibe's opposing set.
    pub anti_match_penalty: f64,
    /// The candidate is closed at the current hour.
    pub closed_penalty: f64,
    /// The visit would eat into the safety buffer before departure.
    pub buffer_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_match: 10.0,
            related_match: 5.0,
            base_score: 1.0,
            proximity_multiplier: 3.0,
            diversity_unit: 2.0,
            anti_match_penalty: -3.0,
            closed_penalty: -5.0,
            buffer_penalty: -2.0,
        }
    }
}

/// A score adjustment that applies on one side of a minutes threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeAdjustment {
    /// Threshold in minutes until departure.
    pub minutes: f64,
    /// Points added when the rule fires; negative values penalise.
    pub points: f64,
}

impl TimeAdjustment {
    /// Construct an adjustment.
    #[must_use]
    pub const fn new(minutes: f64, points: f64) -> Self {
        Self { minutes, points }
    }
}

/// Bonus for short visits when time is running out.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BriefVisit {
    /// Applies while fewer than this many minutes remain.
    pub minutes: f64,
    /// Longest visit, in minutes, that still counts as brief.
    pub max_duration_minutes: u32,
    /// Points added when the rule fires.
    pub points: f64,
}

/// Vibe-specific reactions to the time left before departure.
///
/// All comparisons are strict: `rushed` fires while remaining minutes are
/// below its threshold, `leisurely` while they are above.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TimingRules {
    /// Adjustment when time is short.
    pub rushed: Option<TimeAdjustment>,
    /// Adjustment when time is plentiful.
    pub leisurely: Option<TimeAdjustment>,
    /// Bonus for quick-service candidates when time is short.
    pub quick_service: Option<TimeAdjustment>,
    /// Bonus for candidates with a short known visit length.
    pub brief_visit: Option<BriefVisit>,
}

impl TimingRules {
    /// Sum the adjustments that fire for `candidate` with `remaining`
    /// minutes left.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "adjustments accumulate fractional points"
    )]
    pub fn adjustment(&self, candidate: &Candidate, remaining: f64) -> f64 {
        let mut points = 0.0;
        if let Some(rule) = self.quick_service
            && candidate.quick_service
            && remaining < rule.minutes
        {
            points += rule.points;
        }
        if let Some(rule) = self.brief_visit
            && remaining < rule.minutes
            && candidate
                .estimated_duration_minutes
                .is_some_and(|minutes| minutes <= rule.max_duration_minutes)
        {
            points += rule.points;
        }
        if let Some(rule) = self.rushed
            && remaining < rule.minutes
        {
            points += rule.points;
        }
        if let Some(rule) = self.leisurely
            && remaining > rule.minutes
        {
            points += rule.points;
        }
        points
    }
}

/// Everything the table knows about one vibe.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct VibeProfile {
    /// Tags that earn partial credit.
    pub related: Vec<String>,
    /// Tags that conflict with the vibe.
    pub opposing: Vec<String>,
    /// Reactions to the time left before departure.
    pub timing: TimingRules,
}

impl VibeProfile {
    /// Construct a profile from related and opposing tag lists.
    pub fn new<R, O>(related: R, opposing: O) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            related: related.into_iter().map(Into::into).collect(),
            opposing: opposing.into_iter().map(Into::into).collect(),
            timing: TimingRules::default(),
        }
    }

    /// Attach timing rules.
    #[must_use]
    pub const fn with_timing(mut self, timing: TimingRules) -> Self {
        self.timing = timing;
        self
    }

    fn relates_to(&self, candidate: &Candidate) -> bool {
        self.related.iter().any(|tag| candidate.has_tag(tag))
    }

    fn opposes(&self, candidate: &Candidate) -> bool {
        self.opposing.iter().any(|tag| candidate.has_tag(tag))
    }
}

/// Errors raised when loading or checking a [`PreferenceTable`].
#[derive(Debug, Error)]
pub enum PreferenceTableError {
    /// The table lists no vibes at all.
    #[error("preference table must describe at least one vibe")]
    Empty,
    /// A scoring weight or timing threshold is not a finite number.
    #[error("preference table contains a non-finite value in {field}")]
    NonFinite {
        /// Field holding the offending value.
        field: &'static str,
    },
    /// The table could not be decoded from JSON.
    #[cfg(feature = "serde")]
    #[error("failed to decode preference table")]
    Decode {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable mapping from vibes to related tags, opposing tags and timing
/// rules, plus the scoring weights shared by all vibes.
///
/// # Examples
/// ```
/// use waypoint_core::{Candidate, PreferenceTable, Vibe};
///
/// let table = PreferenceTable::default();
/// let lounge = Candidate::new(1, "Quiet Lounge", "lounge").with_tags(["spa"]);
/// assert_eq!(table.preference_score(Vibe::Relax, &lounge), 5.0);
/// assert_eq!(table.vibes().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceTable {
    vibes: BTreeMap<Vibe, VibeProfile>,
    #[cfg_attr(feature = "serde", serde(default))]
    weights: ScoringWeights,
}

impl PreferenceTable {
    /// Build a table from explicit profiles and weights.
    ///
    /// # Errors
    /// Returns [`PreferenceTableError::Empty`] when no profiles are given and
    /// [`PreferenceTableError::NonFinite`] when a number is NaN or infinite.
    pub fn new(
        vibes: BTreeMap<Vibe, VibeProfile>,
        weights: ScoringWeights,
    ) -> Result<Self, PreferenceTableError> {
        Self { vibes, weights }.validate()
    }

    /// Decode a table from JSON and validate it.
    ///
    /// # Errors
    /// Returns [`PreferenceTableError::Decode`] for malformed JSON and the
    /// errors of [`PreferenceTable::new`] for unusable contents.
    #[cfg(feature = "serde")]
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, PreferenceTableError> {
        let table: Self = serde_json::from_reader(reader)
            .map_err(|source| PreferenceTableError::Decode { source })?;
        table.validate()
    }

    fn validate(self) -> Result<Self, PreferenceTableError> {
        if self.vibes.is_empty() {
            return Err(PreferenceTableError::Empty);
        }
        let w = &self.weights;
        let weights = [
            ("weights.exact_match", w.exact_match),
            ("weights.related_match", w.related_match),
            ("weights.base_score", w.base_score),
            ("weights.proximity_multiplier", w.proximity_multiplier),
            ("weights.diversity_unit", w.diversity_unit),
            ("weights.anti_match_penalty", w.anti_match_penalty),
            ("weights.closed_penalty", w.closed_penalty),
            ("weights.buffer_penalty", w.buffer_penalty),
        ];
        if let Some(&(field, _)) = weights.iter().find(|(_, value)| !value.is_finite()) {
            return Err(PreferenceTableError::NonFinite { field });
        }
        if self.vibes.values().any(|profile| !timing_is_finite(&profile.timing)) {
            return Err(PreferenceTableError::NonFinite {
                field: "vibes.timing",
            });
        }
        Ok(self)
    }

    /// Vibes described by the table, in presentation order.
    #[must_use]
    pub fn vibes(&self) -> Vec<Vibe> {
        self.vibes.keys().copied().collect()
    }

    /// Profile for `vibe`, if the table describes it.
    #[must_use]
    pub fn profile(&self, vibe: Vibe) -> Option<&VibeProfile> {
        self.vibes.get(&vibe)
    }

    /// Scoring weights shared by all vibes.
    #[must_use]
    pub const fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score how well `candidate`'s tags fit `vibe`.
    ///
    /// The first matching rule wins: an exact tag, then a related tag, then
    /// an opposing tag. Candidates without tags score zero.
    #[must_use]
    pub fn preference_score(&self, vibe: Vibe, candidate: &Candidate) -> f64 {
        if candidate.tags.iter().any(|tag| vibe.matches_tag(tag)) {
            return self.weights.exact_match;
        }
        let Some(profile) = self.profile(vibe) else {
            return 0.0;
        };
        if profile.relates_to(candidate) {
            self.weights.related_match
        } else if profile.opposes(candidate) {
            self.weights.anti_match_penalty
        } else {
            0.0
        }
    }
}

fn timing_is_finite(timing: &TimingRules) -> bool {
    let adjustments = [timing.rushed, timing.leisurely, timing.quick_service];
    let brief_ok = timing
        .brief_visit
        .is_none_or(|rule| rule.minutes.is_finite() && rule.points.is_finite());
    brief_ok
        && adjustments
            .iter()
            .flatten()
            .all(|rule| rule.minutes.is_finite() && rule.points.is_finite())
}

impl Default for PreferenceTable {
    fn default() -> Self {
        let vibes = BTreeMap::from([
            (
                Vibe::Relax,
                VibeProfile::new(
                    [
                        "lounge",
                        "spa",
                        "quiet",
                        "relaxation",
                        "seating",
                        "rest",
                        "wellness",
                        "massage",
                        "calm",
                    ],
                    ["loud", "crowded", "energetic", "busy", "fast-paced"],
                )
                .with_timing(TimingRules {
                    rushed: Some(TimeAdjustment::new(60.0, -3.0)),
                    leisurely: Some(TimeAdjustment::new(120.0, 2.0)),
                    ..TimingRules::default()
                }),
            ),
            (
                Vibe::Work,
                VibeProfile::new(
                    [
                        "business-center",
                        "wifi",
                        "workspace",
                        "quiet",
                        "charging",
                        "meeting-room",
                        "desk",
                        "focus",
                    ],
                    [
                        "loud",
                        "entertainment",
                        "social",
                        "distracting",
                        "no-wifi",
                        "party",
                    ],
                )
                .with_timing(TimingRules {
                    rushed: Some(TimeAdjustment::new(45.0, -4.0)),
                    leisurely: Some(TimeAdjustment::new(90.0, 3.0)),
                    ..TimingRules::default()
                }),
            ),
            (
                Vibe::Refuel,
                VibeProfile::new(
                    [
                        "restaurant",
                        "cafe",
                        "food",
                        "dining",
                        "bar",
                        "snacks",
                        "beverages",
                        "meals",
                        "fast-food",
                    ],
                    [
                        "light-snacks-only",
                        "no-food",
                        "closed-kitchen",
                        "bar",
                        "nightlife",
                        "alcohol-only",
                    ],
                ),
            ),
            (
                Vibe::Quick,
                VibeProfile::new(
                    [
                        "grab-and-go",
                        "fast-food",
                        "convenience",
                        "express",
                        "self-service",
                        "takeaway",
                        "urgent",
                    ],
                    ["slow-service", "full-service", "lengthy", "reservation-required"],
                )
                .with_timing(TimingRules {
                    quick_service: Some(TimeAdjustment::new(60.0, 5.0)),
                    brief_visit: Some(BriefVisit {
                        minutes: 90.0,
                        max_duration_minutes: 15,
                        points: 3.0,
                    }),
                    ..TimingRules::default()
                }),
            ),
            (
                Vibe::Explore,
                VibeProfile::new(
                    [
                        "entertainment",
                        "art",
                        "exhibits",
                        "culture",
                        "activities",
                        "experiences",
                        "tours",
                        "duty-free",
                        "events",
                        "pop-up",
                        "local-products",
                        "souvenirs",
                        "discover",
                    ],
                    [
                        "boring",
                        "static",
                        "closed-exhibits",
                        "no-activities",
                        "quiet-zone",
                        "business-only",
                        "restricted-access",
                    ],
                )
                .with_timing(TimingRules {
                    rushed: Some(TimeAdjustment::new(75.0, -2.0)),
                    leisurely: Some(TimeAdjustment::new(150.0, 3.0)),
                    ..TimingRules::default()
                }),
            ),
            (
                Vibe::Comfort,
                VibeProfile::new(
                    [
                        "lounge",
                        "wellness",
                        "massage",
                        "quiet",
                        "relaxation",
                        "rest-area",
                        "shower",
                        "prayer-room",
                        "family-room",
                    ],
                    ["loud", "party", "standing-only", "crowded", "rushed"],
                )
                .with_timing(TimingRules {
                    rushed: Some(TimeAdjustment::new(45.0, -2.0)),
                    leisurely: Some(TimeAdjustment::new(90.0, 2.0)),
                    ..TimingRules::default()
                }),
            ),
        ]);
        Self {
            vibes,
            weights: ScoringWeights::default(),
        }
    }
}
