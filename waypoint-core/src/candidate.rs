use std::collections::BTreeSet;

use geo::Coord;

use crate::RequestValidationError;

/// Highest rating a candidate may carry.
pub const MAX_RATING: f64 = 5.0;

/// Daily opening window expressed as hours of the day.
///
/// A window whose `close` precedes `open` runs overnight, e.g. `22..6`.
/// Hours outside `0..=24` are malformed and treated as always open.
///
/// # Examples
/// ```
/// use waypoint_core::OperatingHours;
///
/// let overnight = OperatingHours::new(22, 6);
/// assert!(overnight.is_open_at(23));
/// assert!(overnight.is_open_at(3));
/// assert!(!overnight.is_open_at(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatingHours {
    /// Hour the amenity opens.
    pub open: u8,
    /// Hour the amenity closes.
    pub close: u8,
}

impl OperatingHours {
    /// Construct an opening window.
    #[must_use]
    pub const fn new(open: u8, close: u8) -> Self {
        Self { open, close }
    }

    /// Report whether both hours fall within `0..=24`.
    #[must_use]
    pub const fn is_well_formed(self) -> bool {
        self.open <= 24 && self.close <= 24
    }

    /// Report whether the window covers `hour`.
    ///
    /// Malformed windows are reported as open.
    #[must_use]
    pub fn is_open_at(self, hour: u32) -> bool {
        if !self.is_well_formed() {
            log::warn!(
                "ignoring malformed operating hours {}..{}",
                self.open,
                self.close
            );
            return true;
        }
        let open = u32::from(self.open);
        let close = u32::from(self.close);
        if close > open {
            hour >= open && hour < close
        } else {
            hour >= open || hour < close
        }
    }
}

/// An amenity that may be recommended to a traveller.
///
/// Only the identity, name and category are required. Every other field
/// defaults to a neutral value that neither inflates nor breaks scoring.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypoint_core::Candidate;
///
/// let cafe = Candidate::new(7, "Gate Cafe", "cafe")
///     .with_tags(["quick", "coffee"])
///     .with_location(Coord { x: 120.0, y: 40.0 })
///     .with_rating(4.5);
/// assert!(cafe.has_tag("Quick"));
/// assert_eq!(cafe.rating_or_zero(), 4.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Category label used for diversity, e.g. `"cafe"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    /// Descriptive tags matched against vibes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: BTreeSet<String>,
    /// Position on the venue floor plan.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<Coord<f64>>,
    /// Priority amenities are ranked ahead of all others.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: bool,
    /// Average rating in `0.0..=5.0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<f64>,
    /// Typical visit length in minutes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub estimated_duration_minutes: Option<u32>,
    /// Whether the amenity serves customers quickly.
    #[cfg_attr(feature = "serde", serde(default))]
    pub quick_service: bool,
    /// Daily opening window; absent or malformed means always open.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "lenient_hours")
    )]
    pub operating_hours: Option<OperatingHours>,
}

/// Decode opening hours, treating a window with a missing bound or a
/// non-integer hour as absent.
#[cfg(feature = "serde")]
fn lenient_hours<'de, D>(deserializer: D) -> Result<Option<OperatingHours>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let Some(raw) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match OperatingHours::deserialize(&raw) {
        Ok(hours) => Ok(Some(hours)),
        Err(err) => {
            log::warn!("treating malformed operating hours {raw} as always open: {err}");
            Ok(None)
        }
    }
}

impl Candidate {
    /// Construct a candidate with neutral defaults for optional fields.
    pub fn new(id: u64, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            tags: BTreeSet::new(),
            location: None,
            priority: false,
            rating: None,
            estimated_duration_minutes: None,
            quick_service: false,
            operating_hours: None,
        }
    }

    /// Replace the tag set.
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the floor-plan position.
    #[must_use]
    pub const fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Mark the candidate as a priority placement.
    #[must_use]
    pub const fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Set the rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the typical visit length.
    #[must_use]
    pub const fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration_minutes = Some(minutes);
        self
    }

    /// Flag the candidate as quick service.
    #[must_use]
    pub const fn with_quick_service(mut self, quick_service: bool) -> Self {
        self.quick_service = quick_service;
        self
    }

    /// Set the opening window.
    #[must_use]
    pub const fn with_operating_hours(mut self, hours: OperatingHours) -> Self {
        self.operating_hours = Some(hours);
        self
    }

    /// Rating with absent values treated as zero.
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Category label, substituting `"other"` for blank labels.
    #[must_use]
    pub fn category_or_other(&self) -> &str {
        let category = self.category.trim();
        if category.is_empty() { "other" } else { category }
    }

    /// Report whether any tag equals `tag`, ignoring ASCII case.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|own| own.eq_ignore_ascii_case(tag))
    }

    /// Report whether the candidate is open at `hour` of the venue's day.
    #[must_use]
    pub fn is_open_at(&self, hour: u32) -> bool {
        self.operating_hours
            .is_none_or(|hours| hours.is_open_at(hour))
    }

    /// Check the fields a caller must get right before ranking.
    ///
    /// # Errors
    /// Returns [`RequestValidationError::InvalidRating`] when the rating is
    /// not finite or lies outside `0.0..=5.0`, and
    /// [`RequestValidationError::InvalidLocation`] when a coordinate is not
    /// finite.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if let Some(rating) = self.rating
            && !(rating.is_finite() && (0.0..=MAX_RATING).contains(&rating))
        {
            return Err(RequestValidationError::InvalidRating {
                id: self.id,
                rating,
            });
        }
        if let Some(location) = self.location
            && !(location.x.is_finite() && location.y.is_finite())
        {
            return Err(RequestValidationError::InvalidLocation { id: self.id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OperatingHours::new(8, 20), 8, true)]
    #[case(OperatingHours::new(8, 20), 19, true)]
    #[case(OperatingHours::new(8, 20), 20, false)]
    #[case(OperatingHours::new(8, 20), 3, false)]
    #[case(OperatingHours::new(22, 6), 22, true)]
    #[case(OperatingHours::new(22, 6), 0, true)]
    #[case(OperatingHours::new(22, 6), 6, false)]
    #[case(OperatingHours::new(22, 6), 12, false)]
    #[case(OperatingHours::new(0, 24), 23, true)]
    #[case(OperatingHours::new(30, 6), 12, true)]
    fn hours_handle_wraparound(
        #[case] hours: OperatingHours,
        #[case] hour: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(hours.is_open_at(hour), expected);
    }

    #[test]
    fn missing_hours_mean_always_open() {
        let candidate = Candidate::new(1, "Bench", "seating");
        assert!((0..24).all(|hour| candidate.is_open_at(hour)));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(r#"{"open": 8}"#)]
    #[case(r#"{"open": -1, "close": 6}"#)]
    #[case(r#"{"open": 8.5, "close": 20}"#)]
    #[case(r#""9 to 5""#)]
    fn malformed_hours_decode_as_always_open(#[case] hours: &str) {
        let json = format!(r#"{{"id": 9, "name": "Kiosk", "operating_hours": {hours}}}"#);
        let candidate: Candidate = serde_json::from_str(&json).expect("candidate decodes");
        assert_eq!(candidate.operating_hours, None);
        assert!((0..24).all(|hour| candidate.is_open_at(hour)));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(r#"{"id": 9, "name": "Kiosk", "operating_hours": {"open": 22, "close": 6}}"#, Some(OperatingHours::new(22, 6)))]
    #[case(r#"{"id": 9, "name": "Kiosk", "operating_hours": null}"#, None)]
    #[case(r#"{"id": 9, "name": "Kiosk"}"#, None)]
    fn well_formed_hours_decode_unchanged(
        #[case] json: &str,
        #[case] expected: Option<OperatingHours>,
    ) {
        let candidate: Candidate = serde_json::from_str(json).expect("candidate decodes");
        assert_eq!(candidate.operating_hours, expected);
    }

    #[test]
    fn blank_category_reads_as_other() {
        let candidate = Candidate::new(1, "Kiosk", "  ");
        assert_eq!(candidate.category_or_other(), "other");
    }

    #[rstest]
    #[case(-0.5)]
    #[case(5.5)]
    #[case(f64::NAN)]
    fn validate_rejects_bad_ratings(#[case] rating: f64) {
        let candidate = Candidate::new(3, "Spa", "wellness").with_rating(rating);
        assert!(matches!(
            candidate.validate(),
            Err(RequestValidationError::InvalidRating { id: 3, .. })
        ));
    }

    #[test]
    fn validate_rejects_non_finite_location() {
        let candidate =
            Candidate::new(4, "Lounge", "lounge").with_location(Coord { x: f64::INFINITY, y: 0.0 });
        assert_eq!(
            candidate.validate(),
            Err(RequestValidationError::InvalidLocation { id: 4 })
        );
    }

    #[test]
    fn validate_accepts_neutral_candidate() {
        assert!(Candidate::new(5, "Gate", "gate").validate().is_ok());
    }
}
