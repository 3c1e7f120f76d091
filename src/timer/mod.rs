//! Countdown engine module
//!
//! Turns a picked duration into a once-per-second stream of remaining time and
//! progress, and raises a one-shot completion signal when the run ends.

pub mod engine;
pub mod progress;

use thiserror::Error;

pub use engine::CountdownEngine;
pub use progress::TICK_INTERVAL;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("countdown engine must be created inside a tokio runtime")]
    NoRuntime,
}
