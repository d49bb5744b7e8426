//! Decide how to answer a request from the traveller's location signals.

use crate::{JourneyContext, JourneyStage, LatLng, Mode};

/// Pick the recommendation mode for a request.
///
/// Rules apply in order:
/// 1. no device location → [`Mode::NoLocation`];
/// 2. at the departure stage but browsing another stage → [`Mode::Preview`];
/// 3. within `on_site_radius_m` of the venue → [`Mode::Live`];
/// 4. otherwise → [`Mode::Preview`].
///
/// A missing venue location never counts as on site.
///
/// # Examples
/// ```
/// use chrono::DateTime;
/// use waypoint_core::{JourneyContext, JourneyStage, LatLng, Mode, select_mode};
///
/// let departure = DateTime::parse_from_rfc3339("2026-10-19T18:00:00+08:00").unwrap();
/// let context = JourneyContext::new("Changi T3", JourneyStage::Transit, departure);
/// let venue = LatLng::new(1.3644, 103.9915);
///
/// assert_eq!(select_mode(&context, None, Some(venue), 5_000.0), Mode::NoLocation);
/// assert_eq!(select_mode(&context, Some(venue), Some(venue), 5_000.0), Mode::Live);
/// ```
#[must_use]
pub fn select_mode(
    context: &JourneyContext,
    user_location: Option<LatLng>,
    reference_location: Option<LatLng>,
    on_site_radius_m: f64,
) -> Mode {
    let Some(user) = user_location else {
        return Mode::NoLocation;
    };
    if context.current_stage == JourneyStage::Departure
        && context.viewing_stage != Some(JourneyStage::Departure)
    {
        return Mode::Preview;
    }
    let on_site = reference_location
        .is_some_and(|venue| user.haversine_distance_m(venue) <= on_site_radius_m);
    if on_site { Mode::Live } else { Mode::Preview }
}
