//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{
    AdminLoginRequest, AdminSignupRequest, GuestLoginRequest, GuestSignupRequest, LoginResponse,
    ProfileDto,
};
use crate::application::IdentityService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::CurrentSession;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/guests/signup",
    tag = "Authentication",
    request_body = GuestSignupRequest,
    responses(
        (status = 201, description = "Guest created", body = ApiResponse<ProfileDto>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn guest_signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<GuestSignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileDto>>), ApiError<ProfileDto>> {
    let profile = state
        .identity
        .signup_guest(&request.name, &request.email, &request.password)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(profile.into()))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/guests/login",
    tag = "Authentication",
    request_body = GuestLoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn guest_login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<GuestLoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError<LoginResponse>> {
    let auth = state
        .identity
        .login_guest(&request.email, &request.password)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(auth.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/admins/signup",
    tag = "Authentication",
    request_body = AdminSignupRequest,
    responses(
        (status = 201, description = "Admin created", body = ApiResponse<ProfileDto>),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn admin_signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<AdminSignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileDto>>), ApiError<ProfileDto>> {
    let profile = state
        .identity
        .signup_admin(
            &request.name,
            &request.password,
            &request.password_confirmation,
        )
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(profile.into()))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/admins/login",
    tag = "Authentication",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn admin_login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<AdminLoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError<LoginResponse>> {
    let auth = state
        .identity
        .login_admin(&request.name, &request.password)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(auth.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current principal", body = ApiResponse<ProfileDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AuthHandlerState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<ApiResponse<ProfileDto>>, ApiError<ProfileDto>> {
    let profile = state.identity.me(&session).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(profile.into())))
}
