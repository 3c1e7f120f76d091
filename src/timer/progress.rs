//! Countdown arithmetic shared by the engine and its tick task

use std::time::Duration;

/// Wall-clock cadence of the tick task
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Round a duration to the nearest whole second, halves rounding up
pub fn whole_seconds(duration: Duration) -> u64 {
    let millis = duration.as_millis().saturating_add(500) / 1000;
    u64::try_from(millis).unwrap_or(u64::MAX)
}

/// Progress shown for `remaining` of `total` seconds.
///
/// Biased by one second so the indicator reaches full scale on the last tick
/// before expiry. Zero when `total` is zero.
pub fn progress(total: u64, remaining: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    let shown = total.saturating_sub(remaining).saturating_add(1);
    (shown as f32 / total as f32).min(1.0)
}
