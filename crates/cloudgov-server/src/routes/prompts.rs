use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use cloudgov::models::prompt::Prompt;

async fn list_prompts(State(state): State<AppState>) -> Result<Json<Vec<Prompt>>, ApiError> {
    let prompts = state.prompts.list().await.map_err(|e| {
        tracing::error!("Prompt loading error: {}", e);
        e
    })?;
    Ok(Json(prompts))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/prompts", get(list_prompts))
        .with_state(state)
}
