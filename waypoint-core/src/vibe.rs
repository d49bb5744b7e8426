//! Vibes: the moods a traveller can declare to steer ranking.
//!
//! The enum offers compile-time safety for preference lookups. Parsing is
//! case-insensitive so `"Quick"` and `"quick"` name the same vibe.
//!
//! # Examples
//! ```
//! use waypoint_core::Vibe;
//!
//! assert_eq!(Vibe::Quick.as_str(), "quick");
//! assert_eq!(Vibe::Quick.label(), "Quick");
//! assert_eq!("RELAX".parse::<Vibe>(), Ok(Vibe::Relax));
//! ```
use thiserror::Error;

/// A preference category the traveller selects.
///
/// Variant order is the order vibes are offered to travellers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase", try_from = "String")
)]
pub enum Vibe {
    /// Unwind somewhere calm.
    Relax,
    /// Find a place to get things done.
    Work,
    /// Eat and drink.
    Refuel,
    /// Grab something fast.
    Quick,
    /// Discover shops, art and culture.
    Explore,
    /// Recover with showers, lounges and quiet rooms.
    Comfort,
}

/// Error returned when a string names no known vibe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vibe '{0}'")]
pub struct UnknownVibe(pub String);

impl Vibe {
    /// Every vibe, in presentation order.
    pub const ALL: [Self; 6] = [
        Self::Relax,
        Self::Work,
        Self::Refuel,
        Self::Quick,
        Self::Explore,
        Self::Comfort,
    ];

    /// Return the vibe as a lowercase `&str`, matching how tags are written.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relax => "relax",
            Self::Work => "work",
            Self::Refuel => "refuel",
            Self::Quick => "quick",
            Self::Explore => "explore",
            Self::Comfort => "comfort",
        }
    }

    /// Return the capitalised display label shown to travellers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relax => "Relax",
            Self::Work => "Work",
            Self::Refuel => "Refuel",
            Self::Quick => "Quick",
            Self::Explore => "Explore",
            Self::Comfort => "Comfort",
        }
    }

    /// Report whether `tag` names this vibe, ignoring ASCII case.
    #[must_use]
    pub fn matches_tag(self, tag: &str) -> bool {
        tag.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl std::fmt::Display for Vibe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Vibe {
    type Err = UnknownVibe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|vibe| vibe.matches_tag(s))
            .ok_or_else(|| UnknownVibe(s.to_owned()))
    }
}

impl TryFrom<String> for Vibe {
    type Error = UnknownVibe;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
