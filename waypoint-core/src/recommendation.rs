//! Payloads returned by the engine.

use crate::{Candidate, Mode, ScoreBreakdown, Vibe};

/// A candidate annotated with its place in the results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedCandidate {
    /// The amenity as supplied by the caller.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub candidate: Candidate,
    /// 1-based position in the result list.
    pub rank: usize,
    /// Mode that produced the result.
    pub mode: Mode,
    /// Result quality in `0.0..=100.0`.
    pub confidence: f64,
    /// Final score after diversification; live mode only.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub score: Option<f64>,
    /// Score terms before diversification; live mode only.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub breakdown: Option<ScoreBreakdown>,
    /// Explanation shown with preview and no-location results.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub note: Option<String>,
}

/// Prompt asking an on-site traveller to choose a vibe.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VibePrompt {
    /// Venue the traveller is at.
    pub venue_name: String,
    /// Vibes on offer, in presentation order.
    pub vibes: Vec<Vibe>,
    /// Message shown to the traveller.
    pub message: String,
}

/// Everything the engine can return.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "kebab-case")
)]
pub enum Recommendations {
    /// An ordered list of results, possibly empty.
    Ranked {
        /// Mode that produced the list.
        mode: Mode,
        /// Results in rank order.
        items: Vec<RankedCandidate>,
    },
    /// Live mode needs a vibe before it can rank.
    VibePrompt(VibePrompt),
}

impl Recommendations {
    /// Ranked items, or an empty slice for a prompt.
    #[must_use]
    pub fn items(&self) -> &[RankedCandidate] {
        match self {
            Self::Ranked { items, .. } => items,
            Self::VibePrompt(_) => &[],
        }
    }

    /// Mode of a ranked list; `None` for a prompt.
    #[must_use]
    pub const fn mode(&self) -> Option<Mode> {
        match self {
            Self::Ranked { mode, .. } => Some(*mode),
            Self::VibePrompt(_) => None,
        }
    }

    /// The prompt, if the engine asked for a vibe.
    #[must_use]
    pub const fn prompt(&self) -> Option<&VibePrompt> {
        match self {
            Self::Ranked { .. } => None,
            Self::VibePrompt(prompt) => Some(prompt),
        }
    }
}
