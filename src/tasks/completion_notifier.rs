//! Completion notifier background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::state::AppState;

/// Announce finished countdowns.
///
/// With `auto_acknowledge` the signal is cleared right after the announcement,
/// otherwise it stays pending until a client acknowledges it.
pub async fn completion_notifier_task(state: Arc<AppState>, auto_acknowledge: bool) {
    info!("Starting completion notifier task");

    let mut completion = state.engine.subscribe_completion();

    while let Some(raised) = completion.next().await {
        if !raised {
            continue;
        }

        let total = state.engine.snapshot().total_seconds;
        info!(total_seconds = total, "Countdown complete");

        if auto_acknowledge {
            // not a client action, so bypass AppState tracking
            state.engine.acknowledge_completion();
        } else {
            debug!("Leaving completion pending for clients to acknowledge");
        }
    }

    debug!("Completion signal closed, notifier exiting");
}
