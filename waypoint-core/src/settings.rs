//! Numeric thresholds that shape engine behaviour but are not part of the
//! per-vibe preference table.

/// Engine thresholds and fixed confidences.
///
/// # Examples
/// ```
/// use waypoint_core::EngineSettings;
///
/// let settings = EngineSettings {
///     on_site_radius_m: 2_000.0,
///     ..EngineSettings::default()
/// };
/// assert_eq!(settings.urgent_minutes, 120.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EngineSettings {
    /// Great-circle radius, in metres, within which a traveller is on site.
    pub on_site_radius_m: f64,
    /// Departures closer than this many minutes are urgent.
    pub urgent_minutes: f64,
    /// Floor-plan distance beyond which proximity earns nothing.
    pub proximity_max_distance: f64,
    /// Minutes kept free before departure.
    pub buffer_minutes: f64,
    /// Visit length assumed when a candidate does not state one.
    pub default_visit_minutes: u32,
    /// Score differences below this are ties.
    pub score_tie_epsilon: f64,
    /// Score mapped to 100% confidence.
    pub max_expected_score: f64,
    /// Confidence stamped on preview results.
    pub preview_confidence: f64,
    /// Confidence stamped on no-location results.
    pub fallback_confidence: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            on_site_radius_m: 5_000.0,
            urgent_minutes: 120.0,
            proximity_max_distance: 1_000.0,
            buffer_minutes: 30.0,
            default_visit_minutes: 30,
            score_tie_epsilon: 0.1,
            max_expected_score: 20.0,
            preview_confidence: 85.0,
            fallback_confidence: 70.0,
        }
    }
}

impl EngineSettings {
    /// Project a raw score onto `0.0..=100.0`.
    ///
    /// Non-finite inputs map to zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "confidence is a linear projection of the score"
    )]
    pub fn confidence(&self, score: f64) -> f64 {
        let confidence = score / self.max_expected_score * 100.0;
        if confidence.is_finite() {
            confidence.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}
