//! # Apex Studio
//!
//! Server for the Apex Studio marketing site.
//!
//! Serves the static brochure pages under `public/` and exposes two JSON
//! endpoints, `/api/contact` and `/api/newsletter`. Accepted submissions are
//! validated server-side and appended to flat JSON collection files under
//! the data directory. The datasets are tiny, so each collection is a single
//! JSON array rewritten wholesale per append, serialized by a per-collection
//! mutex.
//!
//! ## Run
//!
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! Configuration is environment-only: `APEX_PORT`, `APEX_DATA_DIR`,
//! `APEX_PUBLIC_DIR`, and `APEX_ENV` (set to `production` to serve assets
//! with a one-year cache lifetime).

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        Method,
        header::{self, HeaderValue},
    },
    routing::{get, post},
};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod submissions;

use config::Config;
use routes::{
    contact_handler, contact_page, index_page, newsletter_handler, not_found, services_page,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new(Config::load());

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await.expect("Failed to bind");
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");

    println!("Server shutting down...");
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let cache = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        asset_cache_lifetime(state.config.production),
    );

    let public = &state.config.public_dir;

    Router::new()
        .route("/", get(index_page))
        .route("/services", get(services_page))
        .route("/contact", get(contact_page))
        .route("/api/contact", post(contact_handler))
        .route("/api/newsletter", post(newsletter_handler))
        .nest_service(
            "/css",
            ServiceBuilder::new()
                .layer(cache.clone())
                .service(ServeDir::new(public.join("css"))),
        )
        .nest_service(
            "/js",
            ServiceBuilder::new()
                .layer(cache)
                .service(ServeDir::new(public.join("js"))),
        )
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

fn asset_cache_lifetime(production: bool) -> HeaderValue {
    if production {
        HeaderValue::from_static("public, max-age=31536000")
    } else {
        HeaderValue::from_static("no-cache")
    }
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
