//! Per-request options and the boundary checks applied to them.

use thiserror::Error;

use crate::{Candidate, LatLng};

/// Default number of results returned.
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Default strength of the repeated-category penalty.
pub const DEFAULT_DIVERSITY_WEIGHT: f64 = 0.3;

/// How recommendations are produced for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Mode {
    /// No device location: show popular amenities.
    NoLocation,
    /// Browsing remotely: show a balanced sample.
    Preview,
    /// On site: rank for the selected vibe.
    Live,
}

impl Mode {
    /// Return the kebab-case label carried in results.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoLocation => "no-location",
            Self::Preview => "preview",
            Self::Live => "live",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = RequestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "no-location" | "no_location" | "nolocation" => Ok(Self::NoLocation),
            "preview" => Ok(Self::Preview),
            "live" => Ok(Self::Live),
            _ => Err(RequestValidationError::UnknownMode(s.to_owned())),
        }
    }
}

/// Errors found when checking a request at the system boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestValidationError {
    /// The diversity weight was negative or not finite.
    #[error("diversity weight must be a finite, non-negative number (got {0})")]
    InvalidDiversityWeight(f64),
    /// A GPS position was out of range or not finite.
    #[error("{field} must hold a finite latitude in -90..=90 and longitude in -180..=180")]
    InvalidCoordinates {
        /// Option naming the position.
        field: &'static str,
    },
    /// A candidate's rating fell outside `0.0..=5.0`.
    #[error("candidate {id} has invalid rating {rating}")]
    InvalidRating {
        /// Candidate identifier.
        id: u64,
        /// Offending rating.
        rating: f64,
    },
    /// A candidate's floor-plan position was not finite.
    #[error("candidate {id} has a non-finite location")]
    InvalidLocation {
        /// Candidate identifier.
        id: u64,
    },
    /// A mode label was not recognised.
    #[error("unknown mode '{0}' (expected live, preview or no-location)")]
    UnknownMode(String),
}

/// Knobs a caller may set per request.
///
/// # Examples
/// ```
/// use waypoint_core::{LatLng, Mode, RecommendationOptions};
///
/// let options = RecommendationOptions::default()
///     .with_max_results(5)
///     .with_user_location(LatLng::new(1.36, 103.99))
///     .with_mode(Mode::Live);
/// assert_eq!(options.max_results, 5);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RecommendationOptions {
    /// Upper bound on returned items.
    pub max_results: usize,
    /// Strength of the repeated-category penalty.
    pub diversity_weight: f64,
    /// Device position, if known.
    pub user_location: Option<LatLng>,
    /// Venue position used to decide whether the traveller is on site.
    pub reference_location: Option<LatLng>,
    /// Force a mode instead of inferring one.
    pub mode: Option<Mode>,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            diversity_weight: DEFAULT_DIVERSITY_WEIGHT,
            user_location: None,
            reference_location: None,
            mode: None,
        }
    }
}

impl RecommendationOptions {
    /// Set the result limit.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the diversity weight.
    #[must_use]
    pub const fn with_diversity_weight(mut self, weight: f64) -> Self {
        self.diversity_weight = weight;
        self
    }

    /// Set the device position.
    #[must_use]
    pub const fn with_user_location(mut self, location: LatLng) -> Self {
        self.user_location = Some(location);
        self
    }

    /// Set the venue position.
    #[must_use]
    pub const fn with_reference_location(mut self, location: LatLng) -> Self {
        self.reference_location = Some(location);
        self
    }

    /// Force a mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Check the options before handing them to the engine.
    ///
    /// # Errors
    /// Returns [`RequestValidationError::InvalidDiversityWeight`] or
    /// [`RequestValidationError::InvalidCoordinates`].
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if !(self.diversity_weight.is_finite() && self.diversity_weight >= 0.0) {
            return Err(RequestValidationError::InvalidDiversityWeight(
                self.diversity_weight,
            ));
        }
        if let Some(location) = self.user_location {
            location.validate("user_location")?;
        }
        if let Some(location) = self.reference_location {
            location.validate("reference_location")?;
        }
        Ok(())
    }
}

/// Validate options and every candidate in one pass.
///
/// # Errors
/// Returns the first [`RequestValidationError`] encountered.
pub fn validate_request(
    options: &RecommendationOptions,
    candidates: &[Candidate],
) -> Result<(), RequestValidationError> {
    options.validate()?;
    candidates.iter().try_for_each(Candidate::validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("live", Mode::Live)]
    #[case("Preview", Mode::Preview)]
    #[case("no-location", Mode::NoLocation)]
    #[case("no_location", Mode::NoLocation)]
    fn mode_parses_labels(#[case] raw: &str, #[case] expected: Mode) {
        assert_eq!(Mode::from_str(raw), Ok(expected));
    }

    #[test]
    fn mode_rejects_unknown_label() {
        assert!(matches!(
            Mode::from_str("offline"),
            Err(RequestValidationError::UnknownMode(_))
        ));
    }

    #[test]
    fn defaults_match_documented_values() {
        let options = RecommendationOptions::default();
        assert_eq!(options.max_results, 10);
        assert!((options.diversity_weight - 0.3).abs() < f64::EPSILON);
        assert!(options.mode.is_none());
    }

    #[rstest]
    #[case(-0.1)]
    #[case(f64::INFINITY)]
    #[case(f64::NAN)]
    fn validate_rejects_bad_diversity_weight(#[case] weight: f64) {
        let options = RecommendationOptions::default().with_diversity_weight(weight);
        assert!(matches!(
            options.validate(),
            Err(RequestValidationError::InvalidDiversityWeight(_))
        ));
    }

    #[test]
    fn validate_request_reports_first_bad_candidate() {
        let candidates = [
            Candidate::new(1, "Ok", "cafe").with_rating(4.0),
            Candidate::new(2, "Bad", "cafe").with_rating(9.0),
        ];
        let err = validate_request(&RecommendationOptions::default(), &candidates)
            .expect_err("rating out of range");
        assert!(matches!(
            err,
            RequestValidationError::InvalidRating { id: 2, .. }
        ));
    }
}
