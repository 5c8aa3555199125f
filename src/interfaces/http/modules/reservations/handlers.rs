//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use super::dto::{ReservationDto, ReservationQuery, UpdateStatusRequest};
use crate::application::ReservationService;
use crate::domain::BookingStatus;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::CurrentSession;
use crate::interfaces::http::modules::bookings::BookingDto;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub reservations: Arc<ReservationService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(ReservationQuery),
    responses(
        (status = 200, description = "Bookings at the admin's hotel, newest first", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Unknown status filter"),
        (status = 403, description = "Admins only")
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<ReservationQuery>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError<Vec<ReservationDto>>> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<BookingStatus>)
        .transpose()
        .map_err(domain_error)?;

    let reservations = state
        .reservations
        .list_hotel_bookings(&session, status)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}

#[utoipa::path(
    patch,
    path = "/api/v1/reservations/{id}/status",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Unknown or non-admin status"),
        (status = 403, description = "Booking belongs to another hotel"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Rooms were taken by another booking")
    )
)]
pub async fn set_reservation_status(
    State(state): State<ReservationAppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError<BookingDto>> {
    let status: BookingStatus = request.status.parse().map_err(domain_error)?;
    let booking = state
        .reservations
        .set_booking_status(&session, id, status)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}
