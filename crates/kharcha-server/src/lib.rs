//! Kharcha Web Server
//!
//! Axum-based REST API for the Kharcha expense tracker.
//!
//! Security features:
//! - Identity from the upstream auth layer's `x-user-id` header
//!   (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Input validation (pagination limits, request size limits)
//! - Per-row ownership: every expense read/delete is scoped to the caller
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use kharcha_core::advisor::{Advisor, AdvisorBackend};
use kharcha_core::db::Database;
use kharcha_core::extract::ReceiptExtractor;

mod handlers;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Header carrying the authenticated user id, set by the upstream auth layer
const USER_ID_HEADER: &str = "x-user-id";

/// User id used when authentication is disabled (local development)
const LOCAL_USER: &str = "local";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only in production)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    /// Advisor orchestration (hosted backend optional)
    pub advisor: Advisor,
    /// Receipt extraction pipeline (regex tables compiled once)
    pub extractor: ReceiptExtractor,
}

/// Resolve the caller's user id from request headers
///
/// Falls back to the local development user; the auth middleware has already
/// rejected the request when authentication is required and the header is
/// missing.
pub(crate) fn get_user_id(headers: &HeaderMap) -> String {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| LOCAL_USER.to_string())
}

/// Authentication middleware - requires the upstream auth layer's user header
///
/// The header is trusted because the server is only reachable through the
/// auth proxy; it must not be exposed directly to the internet. Use
/// `require_auth = false` only for local development.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    let user = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match user {
        Some(user_id) => {
            info!(user = %user_id, path = %request.uri().path(), "Authenticated request");
            next.run(request).await
        }
        None => {
            warn!(path = %request.uri().path(), "Unauthorized request - missing user header");
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "error": "Authentication required"
                })),
            )
                .into_response()
        }
    }
}

/// Build the application router
pub fn create_router(
    db: Database,
    advisor: Advisor,
    extractor: ReceiptExtractor,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        advisor,
        extractor,
    });

    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Expenses
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/expenses/summary", get(handlers::spending_summary))
        .route("/expenses/:id", delete(handlers::delete_expense))
        // Category classification (form suggestion while typing)
        .route("/categories/classify", post(handlers::classify_category))
        // Receipt extraction
        .route("/receipts/extract", post(handlers::extract_receipt))
        .route("/receipts/scans", get(handlers::list_scans))
        // Advisor
        .route("/advisor/query", post(handlers::query_advisor));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        // Allow specified origins (e.g. the Vite dev server)
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    let advisor = Advisor::from_env();
    check_advisor_connection(&advisor).await;

    let extractor = ReceiptExtractor::load()
        .map_err(|e| anyhow::anyhow!("Failed to build receipt extractor: {}", e))?;

    let app = create_router(db, advisor, extractor, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log advisor backend connection status
async fn check_advisor_connection(advisor: &Advisor) {
    if !advisor.is_configured() {
        info!("ℹ️  Advisor backend not configured (set ADVISOR_API_URL and ADVISOR_API_TOKEN to enable); using local analysis");
        return;
    }

    match kharcha_core::advisor::AdvisorClient::from_env() {
        Some(client) => {
            if client.health_check().await {
                info!("✅ Advisor backend connected: {} ({})", client.host(), client.model());
            } else {
                warn!(
                    "⚠️  Advisor backend configured but not responding: {} ({})",
                    client.host(),
                    client.model()
                );
            }
        }
        None => {}
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<kharcha_core::Error> for AppError {
    fn from(err: kharcha_core::Error) -> Self {
        use kharcha_core::Error;
        match err {
            // Validation messages are written for users; show them as-is
            Error::Validation(msg) => Self::bad_request(&msg),
            Error::NotFound(msg) => Self::not_found(&msg),
            // Everything else gets a generic message; detail only in logs
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                internal: Some(other.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests;
