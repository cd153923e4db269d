//! Duration clamping and tick-count math shared by the trackers

/// Shortest duration an applied effect may have, in seconds.
pub const MIN_EFFECT_DURATION: f64 = 1.0;

/// Longest duration an applied effect may have, in seconds.
pub const MAX_EFFECT_DURATION: f64 = 300.0;

/// Clamp a duration into an arbitrary `[min, max]` range.
///
/// Out-of-range values are sanitized, not rejected; NaN collapses to the
/// minimum.
pub fn clamp_to(duration: f64, min: f64, max: f64) -> f64 {
    if duration.is_nan() {
        return min;
    }
    duration.clamp(min, max)
}

/// Clamp an authored duration into the legal `[1, 300]` second range.
pub fn clamp_duration(duration: f64) -> f64 {
    clamp_to(duration, MIN_EFFECT_DURATION, MAX_EFFECT_DURATION)
}

/// Number of ticks a periodic effect produces over its full lifetime:
/// `ceil(duration / interval)`. Zero for non-positive intervals.
pub fn expected_ticks(duration: f64, interval: f64) -> u32 {
    if interval <= 0.0 || duration <= 0.0 {
        return 0;
    }
    (duration / interval).ceil() as u32
}
