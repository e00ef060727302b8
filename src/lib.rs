//! Registration backend for the LICENCIA P landing page.
//!
//! Two things happen here and nothing else:
//!
//! - `POST /register` validates a name/email submission, prepends it to the
//!   registration list in Redis and fires two notification emails (attendee
//!   confirmation + admin alert) through Resend.
//! - `GET /signatures` serves the public wall of signatures: id, display
//!   name and timestamp only. Email addresses never leave the store.
//!
//! The landing page itself (hero, countdown, name ticker) is a static site
//! that polls `/signatures`; it lives outside this crate.
//!
//! # Storage
//!
//! One Redis list, one JSON record per element, `LPUSH` on registration.
//! The prepend is atomic on the server, so simultaneous registrations are
//! all retained and the new list length doubles as the running total for
//! the admin alert. See [`store`] for the details.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    extract::Request,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};

use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod email;
pub mod error;
pub mod registration;
pub mod routes;
pub mod state;
pub mod store;
pub mod templates;

use routes::{
    health_handler, method_not_allowed_handler, register_handler, signatures_handler,
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    // The landing page is served from a different origin, so both routes
    // need permissive CORS. The layer also answers the OPTIONS preflights.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/register", post(register_handler))
        .route("/signatures", get(signatures_handler))
        .route("/health", get(health_handler))
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(cors)
        .layer(middleware::from_fn(options_no_content))
        .with_state(state)
}

// Every OPTIONS gets 204 with no body. tower-http answers preflights with
// 200, and a bare OPTIONS would otherwise fall through to the 405 fallback.
async fn options_no_content(request: Request, next: Next) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    let (mut parts, _) = next.run(request).await.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    parts.headers.remove(CONTENT_LENGTH);

    Response::from_parts(parts, Body::empty())
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");
    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
