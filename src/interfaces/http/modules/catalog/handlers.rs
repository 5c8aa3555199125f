//! Catalog API handlers
//!
//! Reads are public. Writes need an admin session and, for anything
//! scoped to a hotel, ownership of that hotel.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AmenityDto, AmenityRequest, HotelDetailsDto, HotelDto, HotelQuery, HotelRequest, RoomDto,
    RoomQuery, RoomRequest, RoomTypeDto, RoomTypeRequest,
};
use crate::application::CatalogService;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::CurrentSession;
use crate::shared::validate_pagination;

/// Catalog handler state
#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<CatalogService>,
}

// ── Public reads ────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    tag = "Hotels",
    params(HotelQuery),
    responses(
        (status = 200, description = "Matching hotels", body = ApiResponse<PaginatedResponse<HotelDto>>)
    )
)]
pub async fn list_hotels(
    State(state): State<CatalogState>,
    Query(query): Query<HotelQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<HotelDto>>>, ApiError<PaginatedResponse<HotelDto>>> {
    let params = validate_pagination(query.page, query.limit);
    let page = state
        .catalog
        .list_hotels(query.search.as_deref(), params)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        page,
        HotelDto::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}",
    tag = "Hotels",
    params(("id" = i32, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel with rooms and amenities", body = ApiResponse<HotelDetailsDto>),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn get_hotel(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<HotelDetailsDto>>, ApiError<HotelDetailsDto>> {
    let details = state
        .catalog
        .get_hotel_details(id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/rooms",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Hotel ID"), RoomQuery),
    responses(
        (status = 200, description = "Rooms of the hotel", body = ApiResponse<Vec<RoomDto>>),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn list_rooms(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError<Vec<RoomDto>>> {
    let rooms = state
        .catalog
        .list_rooms(id, query.available.unwrap_or(false))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/amenities",
    tag = "Amenities",
    params(("id" = i32, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Amenities of the hotel", body = ApiResponse<Vec<AmenityDto>>),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn list_amenities(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<AmenityDto>>>, ApiError<Vec<AmenityDto>>> {
    let amenities = state
        .catalog
        .list_amenities(id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        amenities.into_iter().map(AmenityDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/room-types",
    tag = "Rooms",
    responses(
        (status = 200, description = "All room types", body = ApiResponse<Vec<RoomTypeDto>>)
    )
)]
pub async fn list_room_types(
    State(state): State<CatalogState>,
) -> Result<Json<ApiResponse<Vec<RoomTypeDto>>>, ApiError<Vec<RoomTypeDto>>> {
    let types = state.catalog.list_room_types().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        types.into_iter().map(RoomTypeDto::from).collect(),
    )))
}

// ── Hotels ──────────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/v1/hotels",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    request_body = HotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = ApiResponse<HotelDto>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Admin already owns a hotel"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_hotel(
    State(state): State<CatalogState>,
    CurrentSession(session): CurrentSession,
    ValidatedJson(request): ValidatedJson<HotelRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HotelDto>>), ApiError<HotelDto>> {
    let hotel = state
        .catalog
        .create_hotel(&session, request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(hotel.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/hotels/{id}",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotel ID")),
    request_body = HotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = ApiResponse<HotelDto>),
        (status = 403, description = "Not the hotel's admin"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn update_hotel(
    State(state): State<CatalogState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<HotelRequest>,
) -> Result<Json<ApiResponse<HotelDto>>, ApiError<HotelDto>> {
    let hotel = state
        .catalog
        .update_hotel(&session, id, request.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(hotel.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/hotels/{id}",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel deleted with its rooms, amenities and bookings"),
        (status = 403, description = "Not the hotel's admin"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn delete_hotel(
    State(state): State<CatalogState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError<()>> {
    state
        .catalog
        .delete_hotel(&session, id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

// ── Rooms ───────────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/v1/hotels/{id}/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotel ID")),
    request_body = RoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<RoomDto>),
        (status = 400, description = "Unknown room type or invalid price"),
        (status = 403, description = "Not the hotel's admin"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn create_room(
    State(state): State<CatalogState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomDto>>), ApiError<RoomDto>> {
    let room = state
        .catalog
        .create_room(&session, id, request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room updated", body = ApiResponse<RoomDto>),
        (status = 403, description = "Not the hotel's admin"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room is held by an active booking")
    )
)]
pub async fn update_room(
    State(state): State<CatalogState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RoomRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError<RoomDto>> {
    let room = state
        .catalog
        .update_room(&session, id, request.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deleted"),
        (status = 403, description = "Not the hotel's admin"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room is referenced by bookings")
    )
)]
pub async fn delete_room(
    State(state): State<CatalogState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError<()>> {
    state
        .catalog
        .delete_room(&session, id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

// ── Amenities ───────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/v1/hotels/{id}/amenities",
    tag = "Amenities",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotel ID")),
    request_body = AmenityRequest,
    responses(
        (status = 201, description = "Amenity created", body = ApiResponse<AmenityDto>),
        (status = 403, description = "Not the hotel's admin"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn create_amenity(
    State(state): State<CatalogState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<AmenityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AmenityDto>>), ApiError<AmenityDto>> {
    let amenity = state
        .catalog
        .create_amenity(&session, id, &request.name, &request.description)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(amenity.into()))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/amenities/{id}",
    tag = "Amenities",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Amenity ID")),
    responses(
        (status = 200, description = "Amenity deleted"),
        (status = 403, description = "Not the hotel's admin"),
        (status = 404, description = "Amenity not found")
    )
)]
pub async fn delete_amenity(
    State(state): State<CatalogState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError<()>> {
    state
        .catalog
        .delete_amenity(&session, id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

// ── Room types ──────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/v1/room-types",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    request_body = RoomTypeRequest,
    responses(
        (status = 201, description = "Room type created", body = ApiResponse<RoomTypeDto>),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Room type already exists")
    )
)]
pub async fn create_room_type(
    State(state): State<CatalogState>,
    CurrentSession(session): CurrentSession,
    ValidatedJson(request): ValidatedJson<RoomTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomTypeDto>>), ApiError<RoomTypeDto>> {
    let room_type = state
        .catalog
        .create_room_type(&session, &request.type_name, &request.description)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room_type.into()))))
}
