//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    picker::{EditOutcome, Field},
    state::{PickerView, TimerState},
};

/// API response structure for timer endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
    pub readout: String,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            readout: timer.readout(),
            timer,
        }
    }

    /// Create a running response
    pub fn running(message: String, timer: TimerState) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    /// Create an idle response
    pub fn idle(message: String, timer: TimerState) -> Self {
        Self::new("idle".to_string(), message, timer)
    }

    /// Pick the status from the timer phase
    pub fn from_timer(message: String, timer: TimerState) -> Self {
        if timer.is_active() {
            Self::running(message, timer)
        } else {
            Self::idle(message, timer)
        }
    }
}

/// Body of `PUT /picker/{field}`
#[derive(Debug, Clone, Deserialize)]
pub struct FieldEditRequest {
    pub text: String,
    #[serde(default)]
    pub cursor: Option<usize>,
}

/// Result of a picker field edit
#[derive(Debug, Clone, Serialize)]
pub struct FieldEditResponse {
    pub field: Field,
    pub outcome: EditOutcome,
    pub picker: PickerView,
}

/// Status response with timer and picker information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub readout: String,
    pub picker: PickerView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
