use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod inquiries;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The inquiry form is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .merge(inquiries::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
