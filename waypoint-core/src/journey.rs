//! The traveller's journey: where they are, what they are looking at and
//! when they must leave.

use chrono::{DateTime, FixedOffset, Utc};
use geo::Coord;

use crate::Vibe;

/// Stage of a multi-leg journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum JourneyStage {
    /// Leaving from the origin venue.
    Departure,
    /// Connecting through an intermediate venue.
    Transit,
    /// Arriving at the destination venue.
    Arrival,
}

/// Per-call description of the traveller's situation.
///
/// `departure_time` carries the venue's UTC offset; opening hours are read on
/// that clock.
///
/// # Examples
/// ```
/// use chrono::DateTime;
/// use waypoint_core::{JourneyContext, JourneyStage, Vibe};
///
/// let departure = DateTime::parse_from_rfc3339("2026-10-19T18:00:00+08:00").unwrap();
/// let context = JourneyContext::new("Changi T3", JourneyStage::Transit, departure)
///     .with_vibe(Vibe::Relax);
/// assert_eq!(context.selected_vibe, Some(Vibe::Relax));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JourneyContext {
    /// Vibe chosen by the traveller, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected_vibe: Option<Vibe>,
    /// Display name of the venue being viewed.
    pub venue_name: String,
    /// Stage the traveller is physically at.
    pub current_stage: JourneyStage,
    /// Stage the traveller is browsing, if different.
    #[cfg_attr(feature = "serde", serde(default))]
    pub viewing_stage: Option<JourneyStage>,
    /// Deadline by which the traveller must leave.
    pub departure_time: DateTime<FixedOffset>,
    /// Floor-plan reference point, typically the departure gate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reference_point: Option<Coord<f64>>,
}

impl JourneyContext {
    /// Construct a context with no vibe, viewing stage or reference point.
    pub fn new(
        venue_name: impl Into<String>,
        current_stage: JourneyStage,
        departure_time: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            selected_vibe: None,
            venue_name: venue_name.into(),
            current_stage,
            viewing_stage: None,
            departure_time,
            reference_point: None,
        }
    }

    /// Select a vibe.
    #[must_use]
    pub const fn with_vibe(mut self, vibe: Vibe) -> Self {
        self.selected_vibe = Some(vibe);
        self
    }

    /// Set the stage being browsed.
    #[must_use]
    pub const fn with_viewing_stage(mut self, stage: JourneyStage) -> Self {
        self.viewing_stage = Some(stage);
        self
    }

    /// Set the floor-plan reference point.
    #[must_use]
    pub const fn with_reference_point(mut self, point: Coord<f64>) -> Self {
        self.reference_point = Some(point);
        self
    }

    /// Minutes from `now` until departure; negative once the deadline passed.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "converting milliseconds into fractional minutes"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "journey-scale millisecond counts are far below 2^52"
    )]
    pub fn minutes_until_departure(&self, now: DateTime<Utc>) -> f64 {
        let remaining = self.departure_time.signed_duration_since(now);
        remaining.num_milliseconds() as f64 / 60_000.0
    }

    /// Hour of day at the venue when it is `now`.
    #[must_use]
    pub fn venue_hour(&self, now: DateTime<Utc>) -> u32 {
        use chrono::Timelike;

        now.with_timezone(self.departure_time.offset()).hour()
    }
}
