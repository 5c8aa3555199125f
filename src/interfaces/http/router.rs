//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    http::StatusCode,
    middleware,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{CatalogService, IdentityService, ReservationService};
use crate::domain::{BookingPolicy, RepositoryProvider};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, bookings, catalog, health, reservations};

/// Shared state for every API route. Handlers extract their own slice of
/// it through `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub identity: Arc<IdentityService>,
    pub catalog: Arc<CatalogService>,
    pub reservations: Arc<ReservationService>,
    pub auth: AuthState,
    pub health: health::HealthState,
}

impl ApiState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        bcrypt_cost: u32,
        policy: BookingPolicy,
        db: Option<DatabaseConnection>,
    ) -> Self {
        Self {
            identity: Arc::new(IdentityService::new(
                Arc::clone(&repos),
                jwt_config.clone(),
                bcrypt_cost,
            )),
            catalog: Arc::new(CatalogService::new(Arc::clone(&repos))),
            reservations: Arc::new(ReservationService::new(repos, policy)),
            auth: AuthState { jwt_config },
            health: health::HealthState {
                db,
                started_at: Arc::new(Instant::now()),
            },
        }
    }
}

impl FromRef<ApiState> for auth::AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        auth::AuthHandlerState {
            identity: Arc::clone(&s.identity),
        }
    }
}

impl FromRef<ApiState> for catalog::CatalogState {
    fn from_ref(s: &ApiState) -> Self {
        catalog::CatalogState {
            catalog: Arc::clone(&s.catalog),
        }
    }
}

impl FromRef<ApiState> for bookings::BookingState {
    fn from_ref(s: &ApiState) -> Self {
        bookings::BookingState {
            reservations: Arc::clone(&s.reservations),
        }
    }
}

impl FromRef<ApiState> for reservations::ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        reservations::ReservationAppState {
            reservations: Arc::clone(&s.reservations),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        s.health.clone()
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        s.auth.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from a guest or admin login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::guest_signup,
        auth::guest_login,
        auth::admin_signup,
        auth::admin_login,
        auth::me,
        // Hotels
        catalog::list_hotels,
        catalog::get_hotel,
        catalog::create_hotel,
        catalog::update_hotel,
        catalog::delete_hotel,
        // Rooms
        catalog::list_rooms,
        catalog::create_room,
        catalog::update_room,
        catalog::delete_room,
        catalog::list_room_types,
        catalog::create_room_type,
        // Amenities
        catalog::list_amenities,
        catalog::create_amenity,
        catalog::delete_amenity,
        // Bookings
        bookings::create_booking,
        bookings::my_bookings,
        bookings::get_booking,
        bookings::update_booking_dates,
        bookings::cancel_booking,
        // Reservations
        reservations::list_reservations,
        reservations::set_reservation_status,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginatedResponse<catalog::HotelDto>,
            // Auth
            auth::GuestSignupRequest,
            auth::GuestLoginRequest,
            auth::AdminSignupRequest,
            auth::AdminLoginRequest,
            auth::ProfileDto,
            auth::LoginResponse,
            // Catalog
            catalog::HotelRequest,
            catalog::HotelDto,
            catalog::HotelDetailsDto,
            catalog::RoomRequest,
            catalog::RoomDto,
            catalog::AmenityRequest,
            catalog::AmenityDto,
            catalog::RoomTypeRequest,
            catalog::RoomTypeDto,
            // Bookings
            bookings::RoomSelection,
            bookings::CreateBookingRequest,
            bookings::UpdateDatesRequest,
            bookings::BookingDto,
            bookings::BookedRoomDto,
            bookings::MyBookingDto,
            bookings::BookedRoomDetailsDto,
            // Reservations
            reservations::UpdateStatusRequest,
            reservations::ReservationDto,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Guest and admin signup, login (JWT) and current profile"),
        (name = "Hotels", description = "Hotel search and hotel management"),
        (name = "Rooms", description = "Rooms and room types"),
        (name = "Amenities", description = "Hotel amenities"),
        (name = "Bookings", description = "Guest bookings: create, amend dates, cancel, list"),
        (name = "Reservations", description = "Admin view of the hotel's bookings and status changes"),
    ),
    info(
        title = "Hotel Booking API",
        version = "1.0.0",
        description = "REST API for searching hotels, booking rooms and managing reservations",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn route_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Route not found")),
    )
}

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus handle is given.
pub fn create_api_router(state: ApiState, metrics: Option<PrometheusHandle>) -> Router {
    let auth_state = state.auth.clone();

    // Bearer tokens are checked for every /api/v1 route. Handlers that need
    // a principal take `CurrentSession`.
    let api_routes = Router::new()
        // Auth
        .route("/api/v1/auth/guests/signup", post(auth::guest_signup))
        .route("/api/v1/auth/guests/login", post(auth::guest_login))
        .route("/api/v1/auth/admins/signup", post(auth::admin_signup))
        .route("/api/v1/auth/admins/login", post(auth::admin_login))
        .route("/api/v1/auth/me", get(auth::me))
        // Hotels
        .route(
            "/api/v1/hotels",
            get(catalog::list_hotels).post(catalog::create_hotel),
        )
        .route(
            "/api/v1/hotels/{id}",
            get(catalog::get_hotel)
                .put(catalog::update_hotel)
                .delete(catalog::delete_hotel),
        )
        .route(
            "/api/v1/hotels/{id}/rooms",
            get(catalog::list_rooms).post(catalog::create_room),
        )
        .route(
            "/api/v1/hotels/{id}/amenities",
            get(catalog::list_amenities).post(catalog::create_amenity),
        )
        // Rooms
        .route(
            "/api/v1/rooms/{id}",
            put(catalog::update_room).delete(catalog::delete_room),
        )
        .route(
            "/api/v1/room-types",
            get(catalog::list_room_types).post(catalog::create_room_type),
        )
        // Amenities
        .route(
            "/api/v1/amenities/{id}",
            delete(catalog::delete_amenity),
        )
        // Bookings
        .route("/api/v1/bookings", post(bookings::create_booking))
        .route("/api/v1/bookings/mine", get(bookings::my_bookings))
        .route(
            "/api/v1/bookings/{id}",
            get(bookings::get_booking).delete(bookings::cancel_booking),
        )
        .route(
            "/api/v1/bookings/{id}/dates",
            patch(bookings::update_booking_dates),
        )
        // Reservations
        .route("/api/v1/reservations", get(reservations::list_reservations))
        .route(
            "/api/v1/reservations/{id}/status",
            patch(reservations::set_reservation_status),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .merge(api_routes)
        .with_state(state)
        .merge(swagger_routes);

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .fallback(route_not_found)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::{seed_room_types, InMemoryRepositoryProvider};

    async fn test_app(advance_booking_days: u32) -> Router {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::default());
        seed_room_types(repos.as_ref()).await.unwrap();
        let jwt = JwtConfig {
            secret: "router-test-secret".into(),
            expiration_hours: 1,
            issuer: "hotel-booking".into(),
        };
        let state = ApiState::new(
            repos,
            jwt,
            4,
            BookingPolicy::new(advance_booking_days),
            None,
        );
        create_api_router(state, None)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn guest_token(app: &Router, email: &str) -> String {
        let (status, _) = send(
            app,
            Method::POST,
            "/api/v1/auth/guests/signup",
            None,
            Some(json!({"name": "Ann", "email": email, "password": "password1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/auth/guests/login",
            None,
            Some(json!({"email": email, "password": "password1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(app: &Router, name: &str) -> String {
        let (status, _) = send(
            app,
            Method::POST,
            "/api/v1/auth/admins/signup",
            None,
            Some(json!({
                "name": name,
                "password": "password1",
                "password_confirmation": "password1"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/auth/admins/login",
            None,
            Some(json!({"name": name, "password": "password1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Admin with a hotel and one room; returns (token, hotel id, room id).
    async fn hotel_with_room(app: &Router, admin: &str, city: &str) -> (String, i64, i64) {
        let token = admin_token(app, admin).await;
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/hotels",
            Some(&token),
            Some(json!({
                "name": format!("{} Inn", admin),
                "email": "desk@inn.example",
                "phone": "+1 555 0100",
                "city": city,
                "country": "Portugal",
                "address": "1 Harbour Road"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let hotel_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = send(
            app,
            Method::POST,
            &format!("/api/v1/hotels/{}/rooms", hotel_id),
            Some(&token),
            Some(json!({"room_type_id": 1, "room_name": "101", "price_per_night": "80.00"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let room_id = body["data"]["id"].as_i64().unwrap();
        (token, hotel_id, room_id)
    }

    fn stay(offset_days: i64, nights: i64) -> (String, String) {
        let check_in = Utc::now().date_naive() + Duration::days(offset_days);
        let check_out = check_in + Duration::days(nights);
        (check_in.to_string(), check_out.to_string())
    }

    #[tokio::test]
    async fn booking_lifecycle_end_to_end() {
        let app = test_app(0).await;
        let (admin, hotel_id, room_id) = hotel_with_room(&app, "lisbon", "Lisbon").await;
        let guest = guest_token(&app, "ann@example.com").await;
        let (check_in, check_out) = stay(10, 2);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/bookings",
            Some(&guest),
            Some(json!({
                "hotel_id": hotel_id,
                "check_in_date": check_in,
                "check_out_date": check_out,
                "guests": 2,
                "rooms": [{"room_id": room_id, "quantity": 1}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        assert_eq!(body["data"]["status"], "Pending");
        let booking_id = body["data"]["id"].as_i64().unwrap();

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/hotels/{}/rooms?available=true", hotel_id),
            None,
            None,
        )
        .await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);

        let (status, body) = send(&app, Method::GET, "/api/v1/bookings/mine", Some(&guest), None).await;
        assert_eq!(status, StatusCode::OK);
        let mine = &body["data"][0];
        assert_eq!(mine["hotel_name"], "lisbon Inn");
        assert_eq!(mine["nights"], 2);
        assert_eq!(mine["total_price"], "160.00");
        assert_eq!(mine["rooms"][0]["room_name"], "101");

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/v1/reservations/{}/status", booking_id),
            Some(&admin),
            Some(json!({"status": "Confirmed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "Confirmed");
        assert_eq!(body["data"]["check_in_date"], check_in);

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/reservations?status=confirmed",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["guest_name"], "Ann");
        assert_eq!(body["data"][0]["rooms"][0]["room_name"], "101");

        let uri = format!("/api/v1/bookings/{}", booking_id);
        let (status, body) = send(&app, Method::DELETE, &uri, Some(&guest), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "Cancelled");
        let (status, body) = send(&app, Method::DELETE, &uri, Some(&guest), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "Cancelled");

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/hotels/{}/rooms?available=true", hotel_id),
            None,
            None,
        )
        .await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_day_checkout_is_rejected() {
        let app = test_app(0).await;
        let (_, hotel_id, room_id) = hotel_with_room(&app, "porto", "Porto").await;
        let guest = guest_token(&app, "bob@example.com").await;
        let (check_in, _) = stay(5, 1);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/bookings",
            Some(&guest),
            Some(json!({
                "hotel_id": hotel_id,
                "check_in_date": check_in,
                "check_out_date": check_in,
                "guests": 1,
                "rooms": [{"room_id": room_id}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn advance_rule_forbids_late_bookings() {
        let app = test_app(3).await;
        let (_, hotel_id, room_id) = hotel_with_room(&app, "faro", "Faro").await;
        let guest = guest_token(&app, "cy@example.com").await;
        let (check_in, check_out) = stay(1, 2);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/bookings",
            Some(&guest),
            Some(json!({
                "hotel_id": hotel_id,
                "check_in_date": check_in,
                "check_out_date": check_out,
                "guests": 1,
                "rooms": [{"room_id": room_id}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/bookings",
            Some(&guest),
            Some(json!({
                "hotel_id": hotel_id,
                "check_in_date": "-262143-01-01",
                "check_out_date": "-262143-01-03",
                "guests": 1,
                "rooms": [{"room_id": room_id}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn room_edits_do_not_release_booked_rooms() {
        let app = test_app(0).await;
        let (admin, hotel_id, room_id) = hotel_with_room(&app, "braga", "Braga").await;
        let guest = guest_token(&app, "dee@example.com").await;
        let (check_in, check_out) = stay(5, 2);
        let booking = json!({
            "hotel_id": hotel_id,
            "check_in_date": check_in,
            "check_out_date": check_out,
            "guests": 1,
            "rooms": [{"room_id": room_id}]
        });

        let (status, _) =
            send(&app, Method::POST, "/api/v1/bookings", Some(&guest), Some(booking.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let room_uri = format!("/api/v1/rooms/{}", room_id);
        let (status, body) = send(
            &app,
            Method::PUT,
            &room_uri,
            Some(&admin),
            Some(json!({"room_type_id": 1, "room_name": "101", "price_per_night": "95.00"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["data"]["is_available"], false);

        let (status, _) = send(
            &app,
            Method::PUT,
            &room_uri,
            Some(&admin),
            Some(json!({
                "room_type_id": 1,
                "room_name": "101",
                "price_per_night": "95.00",
                "is_available": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let other = guest_token(&app, "eve@example.com").await;
        let (status, _) =
            send(&app, Method::POST, "/api/v1/bookings", Some(&other), Some(booking)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn protected_routes_require_a_session() {
        let app = test_app(0).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/bookings/mine", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let (status, _) = send(
            &app,
            Method::GET,
            "/api/v1/auth/me",
            Some("not-a-jwt"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/api/v1/hotels", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn roles_and_ownership_are_enforced() {
        let app = test_app(0).await;
        let (_, hotel_id, room_id) = hotel_with_room(&app, "owner", "Braga").await;
        let other_admin = admin_token(&app, "rival").await;
        let guest = guest_token(&app, "dee@example.com").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/hotels",
            Some(&guest),
            Some(json!({
                "name": "Guest Hotel",
                "email": "g@example.com",
                "phone": "1",
                "city": "X",
                "country": "Y",
                "address": "Z"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/rooms/{}", room_id),
            Some(&other_admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (check_in, check_out) = stay(4, 1);
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/bookings",
            Some(&guest),
            Some(json!({
                "hotel_id": hotel_id,
                "check_in_date": check_in,
                "check_out_date": check_out,
                "guests": 1,
                "rooms": [{"room_id": room_id}]
            })),
        )
        .await;
        let booking_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            Method::PATCH,
            &format!("/api/v1/reservations/{}/status", booking_id),
            Some(&other_admin),
            Some(json!({"status": "Denied"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let other_guest = guest_token(&app, "eve@example.com").await;
        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/bookings/{}", booking_id),
            Some(&other_guest),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn invalid_bodies_are_rejected() {
        let app = test_app(0).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/guests/signup",
            None,
            Some(json!({"name": "Ann", "email": "not-an-email", "password": "password1"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/auth/guests/login",
            None,
            Some(json!({"email": 42})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let admin = admin_token(&app, "strict").await;
        let (status, _) = send(
            &app,
            Method::GET,
            "/api/v1/reservations?status=lost",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn hotel_search_matches_city_case_insensitively() {
        let app = test_app(0).await;
        hotel_with_room(&app, "north", "Coimbra").await;
        hotel_with_room(&app, "south", "Lagos").await;

        let (status, body) = send(&app, Method::GET, "/api/v1/hotels?search=coIMBRA", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["city"], "Coimbra");

        let (_, body) = send(&app, Method::GET, "/api/v1/room-types", None, None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn health_and_unknown_routes() {
        let app = test_app(0).await;
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"]["status"], "memory");

        let (status, body) = send(&app, Method::GET, "/api/v1/nowhere", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }
}
