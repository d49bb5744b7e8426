//! Entry point tying mode selection, scoring and ranking together.

use chrono::{DateTime, Utc};
use log::debug;

use crate::ranking::{Scored, diversify, finalise, order};
use crate::{
    Candidate, EngineSettings, JourneyContext, Mode, PreferenceTable, RecommendationOptions,
    Recommendations, Scorer, ScoringContext, Vibe, VibePrompt, VibeScorer, fallback, preview,
    select_mode,
};

/// Recommend amenities at a venue.
///
/// The engine holds an immutable preference table, numeric settings and a
/// [`Scorer`]. A single instance may serve any number of requests.
///
/// # Examples
/// ```
/// use chrono::{DateTime, Utc};
/// use waypoint_core::{
///     Candidate, JourneyContext, JourneyStage, LatLng, Mode, PreferenceTable,
///     RecommendationEngine, RecommendationOptions, Vibe,
/// };
///
/// let engine = RecommendationEngine::new(PreferenceTable::default());
/// let departure = DateTime::parse_from_rfc3339("2026-10-19T20:00:00+08:00").unwrap();
/// let now = DateTime::parse_from_rfc3339("2026-10-19T17:00:00+08:00")
///     .unwrap()
///     .with_timezone(&Utc);
/// let context =
///     JourneyContext::new("Changi T3", JourneyStage::Transit, departure).with_vibe(Vibe::Quick);
/// let venue = LatLng::new(1.3644, 103.9915);
/// let options = RecommendationOptions::default()
///     .with_user_location(venue)
///     .with_reference_location(venue);
/// let candidates = [Candidate::new(1, "Gate Espresso", "cafe").with_tags(["quick"])];
///
/// let results = engine.recommend(&context, &candidates, &options, now);
/// assert_eq!(results.mode(), Some(Mode::Live));
/// assert_eq!(results.items().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RecommendationEngine<S: Scorer = VibeScorer> {
    table: PreferenceTable,
    settings: EngineSettings,
    scorer: S,
}

impl RecommendationEngine<VibeScorer> {
    /// Engine with default settings and the table-driven scorer.
    #[must_use]
    pub fn new(table: PreferenceTable) -> Self {
        Self::with_settings(table, EngineSettings::default())
    }

    /// Engine with custom settings and the table-driven scorer.
    #[must_use]
    pub fn with_settings(table: PreferenceTable, settings: EngineSettings) -> Self {
        let scorer = VibeScorer::new(table.clone(), settings);
        Self::with_scorer(table, settings, scorer)
    }
}

impl Default for RecommendationEngine<VibeScorer> {
    fn default() -> Self {
        Self::new(PreferenceTable::default())
    }
}

impl<S: Scorer> RecommendationEngine<S> {
    /// Engine with a caller-supplied scorer.
    #[must_use]
    pub const fn with_scorer(table: PreferenceTable, settings: EngineSettings, scorer: S) -> Self {
        Self {
            table,
            settings,
            scorer,
        }
    }

    /// The preference table in use.
    #[must_use]
    pub const fn table(&self) -> &PreferenceTable {
        &self.table
    }

    /// The numeric settings in use.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Vibes a traveller may choose from.
    #[must_use]
    pub fn vibes(&self) -> Vec<Vibe> {
        self.table.vibes()
    }

    /// Resolve the mode for a request, honouring an explicit override.
    #[must_use]
    pub fn resolve_mode(&self, context: &JourneyContext, options: &RecommendationOptions) -> Mode {
        options.mode.unwrap_or_else(|| {
            select_mode(
                context,
                options.user_location,
                options.reference_location,
                self.settings.on_site_radius_m,
            )
        })
    }

    /// Produce recommendations for `candidates` at the instant `now`.
    ///
    /// Inputs are expected to have passed
    /// [`validate_request`](crate::validate_request). The call never fails;
    /// an empty list is a valid answer.
    #[must_use]
    pub fn recommend(
        &self,
        context: &JourneyContext,
        candidates: &[Candidate],
        options: &RecommendationOptions,
        now: DateTime<Utc>,
    ) -> Recommendations {
        let mode = self.resolve_mode(context, options);
        debug!(
            "recommending for {} in {mode} mode from {} candidates",
            context.venue_name,
            candidates.len()
        );
        let max_results = options.max_results;
        match mode {
            Mode::NoLocation => Recommendations::Ranked {
                mode,
                items: fallback::top_rated(
                    candidates,
                    max_results,
                    self.settings.fallback_confidence,
                ),
            },
            Mode::Preview => Recommendations::Ranked {
                mode,
                items: preview::preview(
                    &self.table,
                    candidates,
                    max_results,
                    &context.venue_name,
                    self.settings.preview_confidence,
                ),
            },
            Mode::Live => match context.selected_vibe {
                Some(vibe) => Recommendations::Ranked {
                    mode,
                    items: self.live(vibe, context, candidates, options, now),
                },
                None => {
                    debug!("no vibe selected; prompting");
                    Recommendations::VibePrompt(self.prompt(context))
                }
            },
        }
    }

    fn live(
        &self,
        vibe: Vibe,
        context: &JourneyContext,
        candidates: &[Candidate],
        options: &RecommendationOptions,
        now: DateTime<Utc>,
    ) -> Vec<crate::RankedCandidate> {
        let scoring = ScoringContext::new(vibe, context, now);
        debug!(
            "scoring for {vibe} with {:.1} minutes remaining at hour {}",
            scoring.minutes_remaining, scoring.venue_hour
        );
        let mut scored: Vec<Scored<'_>> = candidates
            .iter()
            .map(|candidate| {
                let breakdown = self.scorer.score(candidate, &scoring);
                Scored {
                    candidate,
                    score: S::sanitise(breakdown.total()),
                    breakdown,
                }
            })
            .collect();

        let epsilon = self.settings.score_tie_epsilon;
        order(&mut scored, epsilon);
        diversify(&mut scored, options.diversity_weight);
        for item in &mut scored {
            item.score = S::sanitise(item.score);
        }
        order(&mut scored, epsilon);
        finalise(scored, options.max_results, &self.settings)
    }

    fn prompt(&self, context: &JourneyContext) -> VibePrompt {
        VibePrompt {
            venue_name: context.venue_name.clone(),
            vibes: self.table.vibes(),
            message: format!(
                "You've landed at {}! How do you want to vibe this stop?",
                context.venue_name
            ),
        }
    }
}
