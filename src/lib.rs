//! Countdown Timer - a countdown engine with a duration picker
//!
//! This library provides the duration picker with keystroke validation, the
//! countdown engine that turns a picked duration into remaining-time and
//! progress updates, and an HTTP surface for driving both.

pub mod config;
pub mod state;
pub mod picker;
pub mod timer;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use picker::{DurationInput, EditOutcome, Field};
pub use timer::{CountdownEngine, EngineError};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
