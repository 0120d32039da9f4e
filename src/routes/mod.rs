//! Router assembly.

mod book;
mod common;

pub use book::book_routes;
pub use common::{common_routes, common_routes_with_ready};

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: book routes plus health/ready/version, with request tracing and a body size limit.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(book_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}
