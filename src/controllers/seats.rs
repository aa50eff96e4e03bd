use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::Seat;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats", get(get_seats))
        .route("/seats/{id}", get(get_seat_pricing))
}

#[derive(Debug, Serialize)]
pub struct SeatResponse {
    pub id: i64,
    pub seat_identifier: String,
    pub seat_class: String,
    pub is_booked: bool,
}

impl From<Seat> for SeatResponse {
    fn from(seat: Seat) -> Self {
        SeatResponse {
            is_booked: seat.is_booked(),
            id: seat.id,
            seat_identifier: seat.seat_identifier,
            seat_class: seat.seat_class,
        }
    }
}

// GET /api/seats
async fn get_seats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let seats = state.repos.seats.list_all().await?;
    let payload: Vec<SeatResponse> = seats.into_iter().map(SeatResponse::from).collect();

    Ok(Json(payload))
}

#[derive(Debug, Serialize)]
struct SeatPricingResponse {
    id: i64,
    seat_identifier: String,
    seat_class: String,
    is_booked: bool,
    price: String,
}

// GET /api/seats/{id}
async fn get_seat_pricing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if id <= 0 {
        return Err(AppError::Validation(
            "path param 'id' must be a positive integer".to_string(),
        ));
    }

    let seat = state
        .repos
        .seats
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no seat found with id: {id}")))?;

    // "No price row" is a distinct outcome from a storage failure.
    let price = state
        .pricing
        .price_for_class(&seat.seat_class)
        .await?
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "pricing for class {} is not available",
                seat.seat_class
            ))
        })?;

    Ok(Json(SeatPricingResponse {
        id: seat.id,
        is_booked: seat.is_booked(),
        seat_identifier: seat.seat_identifier,
        seat_class: seat.seat_class,
        price: price.to_string(),
    }))
}
