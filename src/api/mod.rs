//! HTTP handlers and router assembly

pub mod authors;
pub mod health;
pub mod home;
pub mod method_override;

use axum::{extract::Request, routing::get, Router};
use tower::{
    util::{MapRequest, MapRequestLayer},
    Layer,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::AppState;

/// Router wrapped so method overrides apply before route matching
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/authors", authors::routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Full application service, ready to serve
pub fn app(state: AppState) -> App {
    let rewrite: fn(Request) -> Request = method_override::method_override;
    MapRequestLayer::new(rewrite).layer(router(state))
}
