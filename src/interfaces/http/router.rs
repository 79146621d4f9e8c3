//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::ReservationService;
use crate::domain::RepositoryProvider;
use crate::notifications::SharedEventBus;

use super::common::ApiResponse;
use super::modules::clients::{self, ClientAppState, ClientDto, CreateClientRequest};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::notifications::{self, NotificationState};
use super::modules::reservations::{
    self, CreateReservationRequest, FullReservationRequest, FullReservationResponse,
    ReservationAppState, ReservationDto, UpdateReservationRequest,
};
use super::modules::rooms::{
    self, CreateRoomRequest, RoomAppState, RoomDto, SetRoomEnabledRequest,
};

/// Everything the HTTP layer needs. Handlers extract their own slice of it
/// via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<ReservationService>,
    pub repos: Arc<dyn RepositoryProvider>,
    pub event_bus: SharedEventBus,
    /// `None` when running on the in-memory store
    pub db: Option<DatabaseConnection>,
    pub started_at: Arc<Instant>,
}

impl FromRef<ApiState> for ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationAppState {
            service: Arc::clone(&s.service),
            event_bus: s.event_bus.clone(),
        }
    }
}

impl FromRef<ApiState> for RoomAppState {
    fn from_ref(s: &ApiState) -> Self {
        RoomAppState {
            repos: Arc::clone(&s.repos),
            service: Arc::clone(&s.service),
        }
    }
}

impl FromRef<ApiState> for ClientAppState {
    fn from_ref(s: &ApiState) -> Self {
        ClientAppState {
            repos: Arc::clone(&s.repos),
            service: Arc::clone(&s.service),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for NotificationState {
    fn from_ref(s: &ApiState) -> Self {
        NotificationState {
            event_bus: s.event_bus.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        reservations::create_reservation,
        reservations::create_full_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::update_reservation,
        reservations::cancel_reservation,
        reservations::get_reservation_document,
        rooms::list_rooms,
        rooms::create_room,
        rooms::get_room,
        rooms::set_room_enabled,
        rooms::available_rooms,
        clients::list_clients,
        clients::create_client,
        clients::get_client,
        clients::list_client_reservations,
        notifications::notification_stream,
    ),
    components(
        schemas(
            ApiResponse<bool>,
            HealthResponse,
            ComponentHealth,
            CreateReservationRequest,
            FullReservationRequest,
            UpdateReservationRequest,
            ReservationDto,
            FullReservationResponse,
            RoomDto,
            CreateRoomRequest,
            SetRoomEnabledRequest,
            ClientDto,
            CreateClientRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Reservations", description = "Booking, modification, cancellation and confirmation documents"),
        (name = "Rooms", description = "Room catalogue and availability search"),
        (name = "Clients", description = "Guest registry"),
        (name = "Notifications", description = "Server-sent reservation events"),
    ),
    info(
        title = "Hotel Back-Office API",
        version = "1.0.0",
        description = "REST API for room reservations",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn create_api_router(state: ApiState, metrics: Option<PrometheusHandle>) -> Router {
    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/full", post(reservations::create_full_reservation))
        .route(
            "/{id}",
            get(reservations::get_reservation)
                .put(reservations::update_reservation)
                .delete(reservations::cancel_reservation),
        )
        .route("/{id}/document", get(reservations::get_reservation_document));

    let room_routes = Router::new()
        .route("/", get(rooms::list_rooms).post(rooms::create_room))
        .route("/available", get(rooms::available_rooms))
        .route("/{id}", get(rooms::get_room))
        .route("/{id}/enabled", put(rooms::set_room_enabled));

    let client_routes = Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route("/{id}", get(clients::get_client))
        .route("/{id}/reservations", get(clients::list_client_reservations));

    let notification_routes =
        Router::new().route("/stream", get(notifications::notification_stream));

    let api = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/reservations", reservation_routes)
        .nest("/api/v1/rooms", room_routes)
        .nest("/api/v1/clients", client_routes)
        .nest("/api/v1/notifications", notification_routes)
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(api);

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, Response, StatusCode};
    use tower::Service;

    use crate::config::{BookingConfig, DocumentConfig};
    use crate::domain::{Client, Room};
    use crate::infrastructure::{EventBusNotifier, InMemoryRepositoryProvider, TextDocumentGenerator};
    use crate::notifications::create_event_bus;

    pub(crate) struct TestState {
        pub router: Router,
        pub room: i32,
        pub disabled_room: i32,
        pub client: i32,
        pub event_bus: SharedEventBus,
    }

    /// Router over an in-memory store holding an enabled room, a disabled
    /// room and one client.
    pub(crate) async fn test_state() -> TestState {
        let repos = Arc::new(InMemoryRepositoryProvider::default());
        let room = repos
            .rooms()
            .save(Room::new("101", "standard", 9_000))
            .await
            .unwrap();
        let mut closed = Room::new("102", "standard", 9_000);
        closed.disable();
        let closed = repos.rooms().save(closed).await.unwrap();
        let client = repos
            .clients()
            .save(Client::new("Ana", "Pérez", "ana@example.com"))
            .await
            .unwrap();

        let event_bus = create_event_bus();
        let repos: Arc<dyn RepositoryProvider> = repos;
        let service = Arc::new(ReservationService::new(
            repos.clone(),
            Arc::new(TextDocumentGenerator::new(&DocumentConfig::default())),
            Arc::new(EventBusNotifier::new(event_bus.clone())),
            BookingConfig::default(),
        ));

        let router = create_api_router(
            ApiState {
                service,
                repos,
                event_bus: event_bus.clone(),
                db: None,
                started_at: Arc::new(Instant::now()),
            },
            None,
        );

        TestState {
            router,
            room: room.id,
            disabled_room: closed.id,
            client: client.id,
            event_bus,
        }
    }

    pub(crate) async fn call(router: &Router, req: Request<Body>) -> Response<Body> {
        let mut svc = router.clone().into_service();
        svc.call(req).await.unwrap()
    }

    pub(crate) fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    pub(crate) async fn body_json(resp: Response<Body>) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn openapi_lists_reservation_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/reservations/{id}/document"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/rooms/available"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let TestState { router, .. } = test_state().await;
        let resp = call(&router, Request::get("/api/v1/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
