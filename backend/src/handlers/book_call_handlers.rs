use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::error::BookingError;
use crate::handlers::book_call_dtos::{BookCallRequest, BookCallResponse};
use crate::utils::notification_template::render_notification;
use crate::AppState;

pub async fn book_call(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookCallRequest>, JsonRejection>,
) -> Result<Json<BookCallResponse>, BookingError> {
    let Json(request) = payload?;
    request.validate()?;

    info!(service = %request.service.trim(), "Call request received");
    notify_team(&state, &request).await;

    Ok(Json(BookCallResponse::received()))
}

/// Best effort: delivery problems are logged and never fail the request.
async fn notify_team(state: &AppState, request: &BookCallRequest) {
    let Some(to) = state.settings.notification_email.as_deref() else {
        warn!("Email notifications not configured, set NOTIFICATION_EMAIL to receive booking requests");
        info!(
            name = %request.name,
            email = %request.email,
            phone = ?request.phone,
            company = ?request.company,
            service = %request.service,
            message = ?request.message,
            preferred_date = ?request.preferred_date,
            timestamp = %Utc::now().to_rfc3339(),
            "New call booking request"
        );
        return;
    };

    let notification = render_notification(
        request,
        &state.settings.notification_from_email,
        to,
        Utc::now(),
    );
    match state.notifier.send(&notification).await {
        Ok(()) => info!("Booking notification sent to {}", to),
        Err(e) => error!("Error sending booking notification: {}", e),
    }
}
