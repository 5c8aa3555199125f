//! Booking API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{BookingDto, CreateBookingRequest, MyBookingDto, UpdateDatesRequest};
use crate::application::{BookingRequest, ReservationService};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::CurrentSession;

/// Booking handler state
#[derive(Clone)]
pub struct BookingState {
    pub reservations: Arc<ReservationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created as Pending", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid dates, guests or room selection"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Guests only, or too close to check-in"),
        (status = 404, description = "Hotel or room not found"),
        (status = 409, description = "Room not available")
    )
)]
pub async fn create_booking(
    State(state): State<BookingState>,
    CurrentSession(session): CurrentSession,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError<BookingDto>> {
    let dates = request.dates().map_err(domain_error)?;
    let booking = state
        .reservations
        .create_booking(
            &session,
            BookingRequest {
                hotel_id: request.hotel_id,
                dates,
                guests: request.guests,
                rooms: request.room_lines(),
            },
        )
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(booking.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/mine",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The guest's bookings, newest first", body = ApiResponse<Vec<MyBookingDto>>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Guests only")
    )
)]
pub async fn my_bookings(
    State(state): State<BookingState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<ApiResponse<Vec<MyBookingDto>>>, ApiError<Vec<MyBookingDto>>> {
    let views = state
        .reservations
        .my_bookings(&session)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        views.into_iter().map(MyBookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = ApiResponse<BookingDto>),
        (status = 403, description = "Neither the guest nor the hotel's admin"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError<BookingDto>> {
    let booking = state
        .reservations
        .get_booking(&session, id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}/dates",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateDatesRequest,
    responses(
        (status = 200, description = "Dates updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Check-out not after check-in"),
        (status = 403, description = "Not the guest's booking, or too close to check-in"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking is cancelled")
    )
)]
pub async fn update_booking_dates(
    State(state): State<BookingState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateDatesRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError<BookingDto>> {
    let dates = request.dates().map_err(domain_error)?;
    let booking = state
        .reservations
        .update_booking_dates(&session, id, dates)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled (repeat calls succeed)", body = ApiResponse<BookingDto>),
        (status = 403, description = "Not the guest's booking, or too close to check-in"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError<BookingDto>> {
    let booking = state
        .reservations
        .cancel_booking(&session, id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}
