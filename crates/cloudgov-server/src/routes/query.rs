use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use cloudgov::models::message::Message;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct QueryRequest {
    #[serde(default)]
    messages: Vec<Message>,
}

// Direct passthrough to the provider, the response body is relayed untouched
async fn query_handler(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    if request.messages.is_empty() {
        return Err(ApiError::bad_request("messages must be a non-empty array"));
    }

    let data = state
        .provider
        .complete_raw(&request.messages)
        .await
        .map_err(|e| {
            tracing::error!("/query error: {}", e);
            e
        })?;

    Ok(Json(data))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/query", post(query_handler))
        .with_state(state)
}
