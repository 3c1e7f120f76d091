//! The Idle/Running countdown state machine
//!
//! ```text
//!            start(d > 0)                 deadline passed
//!   Idle ─────────────────► Running ──────────────────────► Idle (+ completion)
//!    ▲  start(0): Idle + completion  │
//!    └───────────────────────────────┘ cancel()
//! ```
//!
//! All state lives behind one mutex. Each run gets a generation number and the
//! tick task only writes while its generation is current, so `cancel` and a
//! restarting `start` invalidate the old task before they return.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{runtime::Handle, task::JoinHandle, time::Instant};
use tracing::{debug, info, warn};

use super::{progress, EngineError};
use crate::{
    state::{Observable, Phase, Subscription, TimerState},
    tasks::countdown_ticker,
};

#[derive(Debug)]
struct Run {
    generation: u64,
    phase: Phase,
    total_seconds: u64,
    remaining_seconds: u64,
    progress: f32,
    completion_pending: bool,
    task: Option<JoinHandle<()>>,
}

impl Run {
    fn snapshot(&self) -> TimerState {
        TimerState {
            phase: self.phase,
            total_seconds: self.total_seconds,
            remaining_seconds: self.remaining_seconds,
            progress: self.progress,
            completion_pending: self.completion_pending,
        }
    }

    /// Invalidate and abort the current tick task, if any
    fn stop_ticker(&mut self) {
        self.generation += 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// State shared between the engine handle and its tick task
#[derive(Debug)]
pub(crate) struct Shared {
    run: Mutex<Run>,
    phase: Observable<Phase>,
    remaining_seconds: Observable<u64>,
    progress: Observable<f32>,
    completion: Observable<bool>,
}

impl Shared {
    fn new() -> Self {
        Self {
            run: Mutex::new(Run {
                generation: 0,
                phase: Phase::Idle,
                total_seconds: 0,
                remaining_seconds: 0,
                progress: 0.0,
                completion_pending: false,
                task: None,
            }),
            phase: Observable::new(Phase::Idle),
            remaining_seconds: Observable::new(0),
            progress: Observable::new(0.0),
            completion: Observable::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Run> {
        self.run.lock().unwrap_or_else(|poisoned| {
            warn!("Countdown state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Apply one tick for `generation` with `left` until the deadline.
    ///
    /// Returns `false` when the run is no longer current and the task should
    /// stop.
    pub(crate) fn apply_tick(&self, generation: u64, left: Duration) -> bool {
        let mut run = self.lock();
        if run.generation != generation || run.phase != Phase::Running {
            return false;
        }

        let rounded = progress::whole_seconds(left);
        if rounded >= 1 {
            run.remaining_seconds = rounded;
            run.progress = progress::progress(run.total_seconds, rounded);
            debug!(remaining = rounded, progress = run.progress, "countdown tick");
            self.remaining_seconds.set(run.remaining_seconds);
            self.progress.set(run.progress);
        }
        true
    }

    /// End the run for `generation` because its deadline passed
    pub(crate) fn finish(&self, generation: u64) {
        let mut run = self.lock();
        if run.generation != generation || run.phase != Phase::Running {
            return;
        }

        info!("Countdown of {}s finished", run.total_seconds);
        // the finishing task is the one running this, dropping the handle detaches it
        run.task = None;
        run.phase = Phase::Idle;
        run.progress = 0.0;
        run.completion_pending = true;
        self.phase.set(run.phase);
        self.progress.set(run.progress);
        self.completion.set(true);
    }
}

/// Countdown engine driving one run at a time on a tokio runtime.
///
/// Observers read the state through [`snapshot`](Self::snapshot) or subscribe
/// to the individual values. Dropping the engine stops any active run.
#[derive(Debug)]
pub struct CountdownEngine {
    shared: Arc<Shared>,
    handle: Handle,
}

impl CountdownEngine {
    /// Create an idle engine on the current tokio runtime
    pub fn new() -> Result<Self, EngineError> {
        let handle = Handle::try_current().map_err(|_| EngineError::NoRuntime)?;
        Ok(Self::with_handle(handle))
    }

    /// Create an idle engine whose tick tasks run on `handle`
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            shared: Arc::new(Shared::new()),
            handle,
        }
    }

    /// Start counting down from `duration`, replacing any active run.
    ///
    /// The duration is rounded to whole seconds. A run that rounds to zero
    /// completes immediately. A duration whose deadline the clock cannot
    /// represent is refused and the engine keeps its current state.
    pub fn start(&self, duration: Duration) {
        let total_seconds = progress::whole_seconds(duration);
        let Some(deadline) = Instant::now().checked_add(Duration::from_secs(total_seconds)) else {
            warn!("Refusing countdown of {}s, deadline is out of clock range", total_seconds);
            return;
        };

        let shared = &self.shared;
        let mut run = shared.lock();

        if run.phase == Phase::Running {
            info!("Replacing active countdown of {}s", run.total_seconds);
        }
        run.stop_ticker();
        run.total_seconds = total_seconds;

        if total_seconds == 0 {
            info!("Countdown started with zero duration, completing immediately");
            run.phase = Phase::Idle;
            run.progress = 0.0;
            run.completion_pending = true;
            shared.phase.set(run.phase);
            shared.progress.set(run.progress);
            shared.completion.set(true);
            return;
        }

        info!("Starting countdown for {}s", total_seconds);
        run.phase = Phase::Running;
        run.remaining_seconds = total_seconds;
        run.progress = 0.0;
        shared.phase.set(run.phase);
        shared.remaining_seconds.set(run.remaining_seconds);
        shared.progress.set(run.progress);

        let generation = run.generation;
        // the task blocks on the lock we hold until the handle is stored
        let task = self
            .handle
            .spawn(countdown_ticker(Arc::clone(shared), generation, deadline));
        run.task = Some(task);
    }

    /// Stop the active run without raising completion. No-op while idle.
    pub fn cancel(&self) {
        let mut run = self.shared.lock();
        if run.phase != Phase::Running {
            debug!("Cancel ignored, no countdown running");
            return;
        }

        info!(
            "Cancelling countdown with {}s of {}s left",
            run.remaining_seconds, run.total_seconds
        );
        run.stop_ticker();
        run.phase = Phase::Idle;
        run.progress = 0.0;
        self.shared.phase.set(run.phase);
        self.shared.progress.set(run.progress);
    }

    /// Clear the completion signal
    pub fn acknowledge_completion(&self) {
        let mut run = self.shared.lock();
        if run.completion_pending {
            debug!("Completion acknowledged");
        }
        run.completion_pending = false;
        self.shared.completion.set(false);
    }

    /// Tear the engine down at the end of a session
    pub fn shutdown(&self) {
        let mut run = self.shared.lock();
        if run.phase == Phase::Running {
            info!("Shutting down countdown engine, abandoning active run");
            run.phase = Phase::Idle;
            run.progress = 0.0;
            self.shared.phase.set(run.phase);
            self.shared.progress.set(run.progress);
        }
        run.stop_ticker();
    }

    pub fn snapshot(&self) -> TimerState {
        self.shared.lock().snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.shared.phase.get()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.shared.remaining_seconds.get()
    }

    pub fn progress(&self) -> f32 {
        self.shared.progress.get()
    }

    pub fn completion_pending(&self) -> bool {
        self.shared.completion.get()
    }

    pub fn subscribe_phase(&self) -> Subscription<Phase> {
        self.shared.phase.subscribe()
    }

    pub fn subscribe_remaining(&self) -> Subscription<u64> {
        self.shared.remaining_seconds.subscribe()
    }

    pub fn subscribe_progress(&self) -> Subscription<f32> {
        self.shared.progress.subscribe()
    }

    pub fn subscribe_completion(&self) -> Subscription<bool> {
        self.shared.completion.subscribe()
    }
}

impl Drop for CountdownEngine {
    fn drop(&mut self) {
        self.shared.lock().stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_outside_runtime_fails() {
        assert!(matches!(CountdownEngine::new(), Err(EngineError::NoRuntime)));
    }

    #[tokio::test]
    async fn starts_idle() {
        let engine = CountdownEngine::new().unwrap();
        assert_eq!(engine.snapshot(), TimerState::new());
    }

    #[tokio::test]
    async fn stale_generation_is_ignored() {
        let engine = CountdownEngine::new().unwrap();
        engine.start(Duration::from_secs(5));
        let stale = engine.shared.lock().generation;
        engine.start(Duration::from_secs(3));

        assert!(!engine.shared.apply_tick(stale, Duration::from_secs(1)));
        engine.shared.finish(stale);

        let state = engine.snapshot();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.remaining_seconds, 3);
        assert!(!state.completion_pending);
    }

    #[tokio::test]
    async fn sub_half_second_tick_keeps_last_value() {
        let engine = CountdownEngine::new().unwrap();
        engine.start(Duration::from_secs(2));
        let generation = engine.shared.lock().generation;

        assert!(engine.shared.apply_tick(generation, Duration::from_millis(1_200)));
        assert_eq!(engine.remaining_seconds(), 1);
        assert!(engine.shared.apply_tick(generation, Duration::from_millis(300)));
        assert_eq!(engine.remaining_seconds(), 1);
        assert_eq!(engine.progress(), 1.0);
    }
}
