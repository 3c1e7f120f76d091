//! State management module
//!
//! This module contains the observable value cell, the timer snapshot and the
//! shared application state.

pub mod app_state;
pub mod observable;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, FieldView, PickerView};
pub use observable::{Observable, Subscription};
pub use timer_state::{format_readout, Phase, TimerState};
