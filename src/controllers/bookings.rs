use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::seats::SeatResponse;
use crate::error::AppError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings", get(get_user_bookings))
}

/* ---------- create booking ---------- */

#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    ids: Vec<i64>,
    name: String,
    phone_number: String,
}

#[derive(Debug, Serialize)]
struct BookingResponse {
    id: i64,
    user_id: i64,
    name: String,
    total_amount: String,
    seats: Vec<SeatResponse>,
}

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let details = state
        .booking
        .book(&req.ids, &req.name, &req.phone_number)
        .await?;

    let response = BookingResponse {
        id: details.booking.id,
        user_id: details.booking.user_id,
        total_amount: details.booking.total_amount().to_string(),
        name: details.booking.name,
        seats: details.seats.into_iter().map(SeatResponse::from).collect(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/* ---------- user bookings ---------- */

#[derive(Debug, Deserialize)]
struct UserBookingsQuery {
    #[serde(rename = "userIdentifier")]
    user_identifier: Option<String>,
}

#[derive(Debug, Serialize)]
struct UserBookingsResponse {
    id: i64,
    name: String,
    phone_number: Option<String>,
    email: Option<String>,
    bookings: Vec<BookingResponse>,
}

// GET /api/bookings?userIdentifier=<phone or email>
async fn get_user_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let identifier = params
        .user_identifier
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation("userIdentifier is not provided".to_string()))?;

    let user = state
        .repos
        .users
        .get_by_identifier(&identifier)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("no user found with identifier: {identifier}"))
        })?;

    let response = UserBookingsResponse {
        id: user.id,
        name: user.name,
        phone_number: user.phone_number,
        email: user.email,
        bookings: user
            .bookings
            .into_iter()
            .map(|b| BookingResponse {
                id: b.id,
                user_id: b.user_id,
                total_amount: b.total_amount().to_string(),
                name: b.name,
                seats: b.seats.into_iter().map(SeatResponse::from).collect(),
            })
            .collect(),
    };

    Ok(Json(response))
}
