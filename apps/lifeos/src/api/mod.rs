//! # LifeOS HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! Public:
//! - `GET /health` - Health check
//! - `POST /api/auth/register` - Create an account and issue its token
//!
//! Everything else under `/api` requires `Authorization: Bearer <token>`:
//! profile and XP (`/api/auth/me`, `/api/user/*`), goals, tasks, habits,
//! transactions, health, learning, ideas, focus and reflections.
//!
//! ## Security Configuration
//!
//! See [`crate::config::SecurityConfig`]: allowed CORS origins and the
//! global rate limit (0 disables it).

mod auth;
mod error;
mod handlers;
mod middleware;
mod types;

pub use auth::authenticate;
pub use error::{ApiError, JsonBody};
pub use middleware::create_rate_limiter;
pub use types::{
    DeleteResponse, ErrorResponse, HealthResponse, RegisterRequest, ToggleHabitRequest, XpRequest,
};

use crate::config::SecurityConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use lifeos_core::{AccountId, AccountScope, Clock, LifeError, RedbStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request body limit.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the store and the clock requests are served by.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RedbStore>,
    pub clock: Clock,
}

impl AppState {
    /// State backed by `store` on the system clock.
    #[must_use]
    pub fn new(store: RedbStore) -> Self {
        Self::with_clock(store, Clock::System)
    }

    /// State with an explicit clock.
    #[must_use]
    pub fn with_clock(store: RedbStore, clock: Clock) -> Self {
        Self {
            store: Arc::new(store),
            clock,
        }
    }

    /// Operations on behalf of `account`, timed at this instant.
    #[must_use]
    pub fn scope(&self, account: AccountId) -> AccountScope<'_> {
        AccountScope::new(&self.store, account, &self.clock)
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer from the configured origins.
///
/// - `["*"]`: allows all origins (development only)
/// - empty: localhost only
/// - otherwise: the listed origins; unparsable entries are skipped
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    if origins.is_empty() {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        return build_localhost_cors();
    }

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
        return build_localhost_cors();
    }

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - global quota (if enabled)
/// 4. Authentication - bearer token, `/api` routes except registration
pub fn create_router(state: AppState, security: &SecurityConfig) -> Router {
    let cors = build_cors_layer(&security.cors_origins);

    let protected = Router::new()
        .route("/api/auth/me", get(handlers::account::profile_handler))
        .route(
            "/api/user/profile",
            get(handlers::account::profile_handler).patch(handlers::account::update_profile_handler),
        )
        .route("/api/user/xp", post(handlers::account::grant_xp_handler))
        .route("/api/user/stats", get(handlers::account::stats_handler))
        .route("/api/user/export", get(handlers::account::export_handler))
        // Goals
        .route(
            "/api/goals",
            get(handlers::goals::list_goals).post(handlers::goals::create_goal),
        )
        .route(
            "/api/goals/{id}",
            patch(handlers::goals::update_goal).delete(handlers::goals::delete_goal),
        )
        .route(
            "/api/goals/{id}/milestones",
            post(handlers::goals::add_milestone),
        )
        .route(
            "/api/goals/{id}/milestones/{milestone}/toggle",
            post(handlers::goals::toggle_milestone),
        )
        // Tasks
        .route(
            "/api/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route(
            "/api/tasks/{id}",
            patch(handlers::tasks::update_task).delete(handlers::tasks::delete_task),
        )
        .route("/api/tasks/{id}/toggle", post(handlers::tasks::toggle_task))
        // Habits
        .route(
            "/api/habits",
            get(handlers::habits::list_habits).post(handlers::habits::create_habit),
        )
        .route(
            "/api/habits/{id}",
            patch(handlers::habits::update_habit).delete(handlers::habits::delete_habit),
        )
        .route(
            "/api/habits/{id}/toggle",
            post(handlers::habits::toggle_habit),
        )
        // Finance
        .route(
            "/api/transactions",
            get(handlers::finance::list_transactions).post(handlers::finance::create_transaction),
        )
        .route(
            "/api/transactions/summary",
            get(handlers::finance::transaction_summary),
        )
        .route(
            "/api/transactions/{id}",
            axum::routing::delete(handlers::finance::delete_transaction),
        )
        // Health
        .route("/api/health", get(handlers::health::list_health))
        .route("/api/health/today", get(handlers::health::health_today))
        .route("/api/health/{id}", patch(handlers::health::update_health))
        .route(
            "/api/health/{id}/workouts",
            post(handlers::health::add_workout),
        )
        // Learning
        .route(
            "/api/learning",
            get(handlers::learning::list_learning).post(handlers::learning::create_learning),
        )
        .route(
            "/api/learning/{id}",
            patch(handlers::learning::update_learning).delete(handlers::learning::delete_learning),
        )
        // Ideas
        .route(
            "/api/ideas",
            get(handlers::ideas::list_ideas).post(handlers::ideas::create_idea),
        )
        .route(
            "/api/ideas/{id}",
            patch(handlers::ideas::update_idea).delete(handlers::ideas::delete_idea),
        )
        .route(
            "/api/ideas/{id}/toggle-pin",
            post(handlers::ideas::toggle_pin),
        )
        // Focus
        .route(
            "/api/focus",
            get(handlers::focus::list_focus).post(handlers::focus::create_focus),
        )
        .route("/api/focus/stats", get(handlers::focus::focus_stats))
        // Reflections
        .route(
            "/api/reflections",
            get(handlers::reflections::list_reflections)
                .post(handlers::reflections::create_reflection),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::require_account,
        ));

    let mut router = Router::new()
        .route("/health", get(handlers::account::health_handler))
        .route(
            "/api/auth/register",
            post(handlers::account::register_handler),
        )
        .merge(protected);

    if security.rate_limit > 0 {
        tracing::info!(
            "Rate limiting enabled: {} requests/second",
            security.rate_limit
        );
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(security.rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Serve the API on `addr` until Ctrl+C.
pub async fn run_server(
    addr: &str,
    state: AppState,
    security: &SecurityConfig,
) -> Result<(), LifeError> {
    let router = create_router(state, security);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| LifeError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("LifeOS HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| LifeError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
