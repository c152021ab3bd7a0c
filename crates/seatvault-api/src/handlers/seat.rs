//! Seat endpoints: status lookup, reserve, buy.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use seatvault_core::error::AppError;

use crate::dto::request::SeatActionRequest;
use crate::dto::response::{ApiResponse, BookingActionResponse, SeatStatusResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/seats/{seat_id}
pub async fn get_status(
    State(state): State<AppState>,
    Path(seat_id): Path<String>,
) -> ApiResult<Json<ApiResponse<SeatStatusResponse>>> {
    let status = state.booking.status(&seat_id).await?;
    Ok(Json(ApiResponse::ok(SeatStatusResponse { seat_id, status })))
}

/// POST /api/reserve
///
/// A business rejection (seat held or sold) maps to 409 CONFLICT, distinct
/// from the 400 an invalid purchase gets; the two rejection causes are
/// never merged into one signal.
pub async fn reserve(
    State(state): State<AppState>,
    Json(req): Json<SeatActionRequest>,
) -> ApiResult<Json<ApiResponse<BookingActionResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if state.booking.reserve(&req.seat_id, &req.requester_id).await? {
        Ok(Json(ApiResponse::ok(BookingActionResponse {
            status: "reserved".to_string(),
        })))
    } else {
        Err(AppError::conflict("Seat already reserved or sold").into())
    }
}

/// POST /api/buy
///
/// A business rejection (no matching active reservation) maps to 400.
pub async fn buy(
    State(state): State<AppState>,
    Json(req): Json<SeatActionRequest>,
) -> ApiResult<Json<ApiResponse<BookingActionResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if state.booking.purchase(&req.seat_id, &req.requester_id).await? {
        Ok(Json(ApiResponse::ok(BookingActionResponse {
            status: "sold".to_string(),
        })))
    } else {
        Err(AppError::validation("Reservation expired or invalid requester").into())
    }
}
