//! Countdown tick background task

use std::sync::Arc;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tracing::debug;

use crate::timer::{engine::Shared, TICK_INTERVAL};

/// Drive one countdown run until `deadline`.
///
/// Ticks fire immediately and then once per [`TICK_INTERVAL`]; remaining time
/// is measured against the deadline rather than counted down, so a late tick
/// still reports the right value. Exits quietly once the run is superseded.
pub(crate) async fn countdown_ticker(shared: Arc<Shared>, generation: u64, deadline: Instant) {
    debug!(generation, "Starting countdown ticker");

    let mut interval = interval(TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            break;
        }
        if !shared.apply_tick(generation, left) {
            debug!(generation, "Countdown ticker superseded, exiting");
            return;
        }
        if left < TICK_INTERVAL {
            // no full interval left, wait out the remainder
            sleep_until(deadline).await;
            break;
        }
    }

    shared.finish(generation);
}
