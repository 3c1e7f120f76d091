//! Background tasks module
//!
//! This module contains the per-run countdown ticker and the long-lived
//! completion notifier.

pub mod completion_notifier;
pub mod countdown_ticker;

// Re-export main functions
pub use completion_notifier::completion_notifier_task;
pub(crate) use countdown_ticker::countdown_ticker;
