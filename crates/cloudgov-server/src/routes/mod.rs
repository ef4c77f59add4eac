// Export route modules
pub mod prompts;
pub mod query;
pub mod tools;

use crate::state::AppState;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(query::routes(state.clone()))
        .merge(tools::routes(state.clone()))
        .merge(prompts::routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
