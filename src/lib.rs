//! Facade crate for the Waypoint amenity recommendation engine.
//!
//! This crate re-exports the core domain types so applications can depend on
//! a single crate.

#![forbid(unsafe_code)]

pub use waypoint_core::{
    BriefVisit, Candidate, DEFAULT_DIVERSITY_WEIGHT, DEFAULT_MAX_RESULTS, EngineSettings,
    JourneyContext, JourneyStage, LatLng, MAX_RATING, Mode, OperatingHours, PreferenceTable,
    PreferenceTableError, RankedCandidate, RecommendationEngine, RecommendationOptions,
    Recommendations, RequestValidationError, ScoreBreakdown, Scorer, ScoringContext,
    ScoringWeights, TimeAdjustment, TimingRules, UnknownVibe, Vibe, VibeProfile, VibePrompt,
    VibeScorer, planar_distance, select_mode, validate_request,
};
