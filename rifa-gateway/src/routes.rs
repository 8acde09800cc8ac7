//! Axum route handlers for the rifa gateway API.
//!
//! Route segments and JSON field names (`/estado`, `/vender`, `numeros`,
//! `total_vendidos`, ...) are the wire contract of the existing frontend
//! and are kept verbatim.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use indexmap::IndexMap;
use rifa_core::TicketNumber;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    error::GatewayError,
    sessions::{bearer_token, SessionRegistry},
    store::TicketStore,
};

const INDEX_HTML: &str = include_str!("../assets/index.html");

// ── Shared state ─────────────────────────────────────────────────────────────

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState {
    /// The ticket board and its snapshot persistence.
    pub store: TicketStore,
    /// Live admin tokens.
    pub sessions: SessionRegistry,
    admin_password: String,
}

impl AppState {
    /// Bundle the store and a fresh session registry with the admin password.
    #[must_use]
    pub fn new(store: TicketStore, admin_password: String) -> Self {
        Self { store, sessions: SessionRegistry::new(), admin_password }
    }
}

type App = Arc<AppState>;

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct VenderBody {
    pub comprador: Option<String>,
}

/// Envelope for operations that only report a human-readable outcome.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct EstadoResponse {
    pub success: bool,
    /// Sale state per number, keyed `"0"` through `"99"` in numeric order.
    pub numeros: IndexMap<u8, bool>,
    pub total_vendidos: u32,
    pub disponibles: u32,
}

#[derive(Debug, Serialize)]
pub struct EstadisticasResponse {
    pub success: bool,
    pub total_numeros: u32,
    pub vendidos: u32,
    pub disponibles: u32,
    pub porcentaje_vendido: f64,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router with the given shared state.
pub fn create_router(state: App) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/estado", get(estado))
        .route("/vender/{num}", post(vender))
        .route("/admin/reset", post(reset))
        .route("/admin/estadisticas", get(estadisticas))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — the ticket grid page.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `POST /login` — verify the admin password and mint a session token.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] when no password is supplied, or
/// [`GatewayError::InvalidCredentials`] when it does not match.
pub async fn login(
    State(app): State<App>,
    body: Bytes,
) -> Result<impl IntoResponse, GatewayError> {
    let password = parse_body::<LoginBody>(&body)?
        .and_then(|b| b.password)
        .ok_or_else(|| GatewayError::InvalidRequest("password required".to_owned()))?;
    if password != app.admin_password {
        return Err(GatewayError::InvalidCredentials);
    }
    let token = app.sessions.login();
    tracing::info!("admin session opened");
    Ok(Json(LoginResponse { success: true, token }))
}

/// `POST /logout` — drop the presented admin token.
///
/// Idempotent: succeeds whether or not the token was live.
pub async fn logout(State(app): State<App>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = bearer_token(&headers) {
        if app.sessions.logout(token) {
            tracing::info!("admin session closed");
        }
    }
    Json(serde_json::json!({"success": true}))
}

/// `GET /estado` — sale state of all 100 numbers plus totals.
pub async fn estado(State(app): State<App>) -> impl IntoResponse {
    let tickets = app.store.tickets();
    let numeros: IndexMap<u8, bool> =
        tickets.iter().map(|t| (t.number.value(), t.sold)).collect();
    let stats = app.store.stats();
    Json(EstadoResponse {
        success: true,
        numeros,
        total_vendidos: stats.sold,
        disponibles: stats.available,
    })
}

/// `POST /vender/{num}` — mark a number as sold, recording the buyer if the
/// body names one.
///
/// # Errors
/// Returns a 400 envelope for a non-numeric or out-of-range number, a 409
/// envelope if the number is already sold, or a 500 envelope if the snapshot
/// write fails (the sale is rolled back).
pub async fn vender(
    State(app): State<App>,
    Path(num): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, GatewayError> {
    let raw: u16 = num
        .parse()
        .map_err(|_| GatewayError::InvalidRequest(format!("invalid ticket number '{num}'")))?;
    let number = TicketNumber::new(raw)?;
    let buyer = parse_body::<VenderBody>(&body)?
        .and_then(|b| b.comprador)
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty());

    app.store.claim(number, buyer)?;
    tracing::info!(number = %number, "ticket sold");
    Ok(Json(MessageResponse {
        success: true,
        message: format!("Número {number} vendido exitosamente"),
    }))
}

/// `POST /admin/reset` — return every number to the available state.
///
/// # Errors
/// Returns [`GatewayError::AdminRequired`] without a live admin token, or a
/// 500 envelope if the snapshot write fails (the reset is rolled back).
pub async fn reset(
    State(app): State<App>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let is_admin = bearer_token(&headers).is_some_and(|token| app.sessions.is_admin(token));
    if !is_admin {
        return Err(GatewayError::AdminRequired);
    }
    app.store.reset_all()?;
    tracing::info!("raffle reset");
    Ok(Json(MessageResponse {
        success: true,
        message: "Rifa reiniciada exitosamente".to_owned(),
    }))
}

/// `GET /admin/estadisticas` — aggregate sale counters.
pub async fn estadisticas(State(app): State<App>) -> impl IntoResponse {
    let stats = app.store.stats();
    Json(EstadisticasResponse {
        success: true,
        total_numeros: stats.total,
        vendidos: stats.sold,
        disponibles: stats.available,
        porcentaje_vendido: stats.percent_sold,
    })
}

/// Parse an optional JSON request body; an empty body is `Ok(None)`.
fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<Option<T>, GatewayError> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| GatewayError::InvalidRequest(format!("malformed JSON body: {e}")))
}

/// Fallback — unknown routes get the JSON error envelope, not plain text.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"success": false, "error": "not found"})),
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    fn test_app() -> Router {
        let store = match TicketStore::open(None) {
            Ok(s) => s,
            Err(e) => panic!("store failed to open: {e}"),
        };
        create_router(Arc::new(AppState::new(store, "secreto".to_owned())))
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[tokio::test]
    async fn health_returns_ok_with_status_field() {
        let app = test_app();
        let req = match Request::builder().uri("/health").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn index_serves_html() {
        let app = test_app();
        let req = match Request::builder().uri("/").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
    }

    #[tokio::test]
    async fn estado_lists_all_100_numbers_in_order() {
        let app = test_app();
        let req = match Request::builder().uri("/estado").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let raw = String::from_utf8_lossy(&bytes).into_owned();
        let body: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        };
        assert_eq!(body["success"], true);
        assert_eq!(body["total_vendidos"], 0);
        assert_eq!(body["disponibles"], 100);
        let numeros = match body["numeros"].as_object() {
            Some(m) => m,
            None => panic!("numeros must be an object"),
        };
        assert_eq!(numeros.len(), 100);
        // The wire encoding keeps numeric order (IndexMap), so "2" must
        // appear before "10" in the raw body.
        let pos_two = raw.find("\"2\":");
        let pos_ten = raw.find("\"10\":");
        match (pos_two, pos_ten) {
            (Some(two), Some(ten)) => assert!(two < ten, "numbers must serialize in numeric order"),
            other => panic!("expected both keys in body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_route_gets_envelope_404() {
        let app = test_app();
        let req = match Request::builder().uri("/no-such-route").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}
