//! Main application state management

use std::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::{Phase, TimerState};
use crate::{
    picker::{DurationInput, EditOutcome, Field},
    timer::{CountdownEngine, EngineError},
};

/// Picker field as reported to clients
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub value: u32,
    pub display: String,
    pub cursor: usize,
}

/// Whole picker as reported to clients
#[derive(Debug, Clone, Serialize)]
pub struct PickerView {
    pub hours: FieldView,
    pub minutes: FieldView,
    pub seconds: FieldView,
    pub candidate_seconds: u64,
}

/// Application state shared by the HTTP handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    pub engine: CountdownEngine,
    pub picker: Mutex<DurationInput>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create the state with an idle engine and a zeroed picker
    pub fn new(port: u16, host: String) -> Result<Self, EngineError> {
        Ok(Self {
            engine: CountdownEngine::new()?,
            picker: Mutex::new(DurationInput::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        })
    }

    fn lock_picker(&self) -> Result<MutexGuard<'_, DurationInput>, String> {
        self.picker
            .lock()
            .map_err(|e| format!("Failed to lock picker: {}", e))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start a countdown from the picker's current candidate duration
    pub fn start_countdown(&self) -> Result<TimerState, String> {
        let duration = self.lock_picker()?.candidate();
        info!("Start requested with {}s picked", duration.as_secs());

        self.engine.start(duration);
        self.record_action("start");
        Ok(self.engine.snapshot())
    }

    /// Cancel the active countdown, if any
    pub fn cancel_countdown(&self) -> TimerState {
        self.engine.cancel();
        self.record_action("cancel");
        self.engine.snapshot()
    }

    /// Clear a pending completion signal
    pub fn acknowledge_completion(&self) -> TimerState {
        self.engine.acknowledge_completion();
        self.record_action("acknowledge");
        self.engine.snapshot()
    }

    /// Apply an edit to one picker field.
    ///
    /// Returns `Ok(None)` while a countdown runs, since the picker is locked
    /// for the duration of a run.
    pub fn edit_field(
        &self,
        field: Field,
        raw: &str,
        cursor: Option<usize>,
    ) -> Result<Option<(EditOutcome, PickerView)>, String> {
        if self.engine.phase() == Phase::Running {
            warn!("Picker edit for {:?} refused while counting down", field);
            return Ok(None);
        }

        let mut picker = self.lock_picker()?;
        let outcome = picker.edit(field, raw, cursor);
        let view = Self::view_of(&picker);
        drop(picker);

        self.record_action("edit");
        Ok(Some((outcome, view)))
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> TimerState {
        self.engine.snapshot()
    }

    /// Get current picker state
    pub fn get_picker(&self) -> Result<PickerView, String> {
        Ok(Self::view_of(&*self.lock_picker()?))
    }

    fn view_of(picker: &DurationInput) -> PickerView {
        let field_view = |field| {
            let input = picker.field(field);
            FieldView {
                field,
                value: input.value(),
                display: input.display(),
                cursor: input.cursor(),
            }
        };
        PickerView {
            hours: field_view(Field::Hours),
            minutes: field_view(Field::Minutes),
            seconds: field_view(Field::Seconds),
            candidate_seconds: picker.candidate().as_secs(),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
