//! Core domain types and ranking logic for the Waypoint engine.
//!
//! The engine answers one question: which amenities at a venue should a
//! traveller see, and in what order? It decides between three modes from
//! the traveller's location signals, scores candidates for a selected
//! [`Vibe`] when on site, and spreads results across categories.
//!
//! Everything here is pure. Callers pass the current instant explicitly so
//! results are reproducible.

#![forbid(unsafe_code)]

mod candidate;
mod engine;
mod fallback;
mod journey;
mod location;
mod mode;
mod options;
mod preferences;
mod preview;
mod ranking;
mod recommendation;
mod scorer;
mod settings;
mod vibe;

pub use candidate::{Candidate, MAX_RATING, OperatingHours};
pub use engine::RecommendationEngine;
pub use journey::{JourneyContext, JourneyStage};
pub use location::{LatLng, planar_distance};
pub use mode::select_mode;
pub use options::{
    DEFAULT_DIVERSITY_WEIGHT, DEFAULT_MAX_RESULTS, Mode, RecommendationOptions,
    RequestValidationError, validate_request,
};
pub use preferences::{
    BriefVisit, PreferenceTable, PreferenceTableError, ScoringWeights, TimeAdjustment,
    TimingRules, VibeProfile,
};
pub use recommendation::{RankedCandidate, Recommendations, VibePrompt};
pub use scorer::{ScoreBreakdown, Scorer, ScoringContext, VibeScorer};
pub use settings::EngineSettings;
pub use vibe::{UnknownVibe, Vibe};
