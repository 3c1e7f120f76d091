//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    picker::Field,
    state::{AppState, PickerView},
};
use super::responses::{
    ApiResponse, FieldEditRequest, FieldEditResponse, HealthResponse, StatusResponse,
};

/// Handle POST /timer/start - Start counting down from the picked duration
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start_countdown() {
        Ok(timer) => {
            info!("Start endpoint called - {}s countdown", timer.total_seconds);
            let message = if timer.is_active() {
                format!("Countdown started for {}s", timer.total_seconds)
            } else {
                "Zero duration picked, countdown completed immediately".to_string()
            };
            Ok(Json(ApiResponse::from_timer(message, timer)))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/cancel - Stop the active countdown
pub async fn cancel_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.cancel_countdown();
    info!("Cancel endpoint called");
    Json(ApiResponse::idle("Countdown cancelled".to_string(), timer))
}

/// Handle POST /timer/acknowledge - Clear the completion signal
pub async fn acknowledge_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.acknowledge_completion();
    Json(ApiResponse::from_timer("Completion acknowledged".to_string(), timer))
}

/// Handle GET /picker - Return the picker fields
pub async fn picker_handler(State(state): State<Arc<AppState>>) -> Result<Json<PickerView>, StatusCode> {
    state.get_picker().map(Json).map_err(|e| {
        error!("Failed to read picker: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle PUT /picker/:field - Apply raw text to one picker field
pub async fn picker_edit_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<Field>,
    Json(request): Json<FieldEditRequest>,
) -> Result<Json<FieldEditResponse>, StatusCode> {
    match state.edit_field(field, &request.text, request.cursor) {
        Ok(Some((outcome, picker))) => Ok(Json(FieldEditResponse {
            field,
            outcome,
            picker,
        })),
        Ok(None) => Err(StatusCode::CONFLICT),
        Err(e) => {
            error!("Failed to edit picker field: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer and picker status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let picker = match state.get_picker() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to get picker state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let timer = state.get_timer_state();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        readout: timer.readout(),
        timer,
        picker,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
