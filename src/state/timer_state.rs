//! Timer state snapshot and phase

use serde::{Deserialize, Serialize};

/// Mode of the countdown engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
}

/// Point-in-time view of the countdown engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    /// Length of the current (or last) run in whole seconds
    pub total_seconds: u64,
    /// Last published remaining time; stale once the engine is idle
    pub remaining_seconds: u64,
    /// Fraction of the run shown as elapsed, in [0, 1]
    pub progress: f32,
    /// Set when a run finished and nobody acknowledged it yet
    pub completion_pending: bool,
}

impl TimerState {
    /// Create a new idle timer state
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            total_seconds: 0,
            remaining_seconds: 0,
            progress: 0.0,
            completion_pending: false,
        }
    }

    /// Check if a countdown is running
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Get remaining seconds if a countdown is running
    pub fn remaining_seconds(&self) -> Option<u64> {
        if self.is_active() {
            Some(self.remaining_seconds)
        } else {
            None
        }
    }

    /// Remaining time as the `HH : MM : SS` readout
    pub fn readout(&self) -> String {
        format_readout(self.remaining_seconds)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format whole seconds as `HH : MM : SS`
pub fn format_readout(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{:02} : {:02} : {:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_pads_each_component() {
        assert_eq!(format_readout(0), "00 : 00 : 00");
        assert_eq!(format_readout(90), "00 : 01 : 30");
        assert_eq!(format_readout(99 * 3600 + 59 * 60 + 59), "99 : 59 : 59");
    }

    #[test]
    fn remaining_hidden_while_idle() {
        let mut state = TimerState::new();
        state.remaining_seconds = 4;
        assert_eq!(state.remaining_seconds(), None);

        state.phase = Phase::Running;
        assert_eq!(state.remaining_seconds(), Some(4));
    }
}
