use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use cloudgov::models::tool::{ToolInfo, ToolOutput};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct InvokeRequest {
    #[serde(default)]
    input: Value,
}

async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolInfo>> {
    Json(state.tools.list())
}

async fn invoke_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ToolOutput>, ApiError> {
    // Unknown ids are rejected whatever the body looks like
    if state.tools.get(&id).is_none() {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "Tool not found"));
    }

    let request: InvokeRequest = if body.is_empty() {
        InvokeRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))?
    };

    let output = state.tools.invoke(&id, &request.input).await?;
    Ok(Json(output))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tool/:id", post(invoke_tool))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app_for, body_json, completion_body};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn invoke_request(id: &str, body: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("/tool/{}", id))
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn sent_prompt(mock_server: &MockServer) -> String {
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
        payload["messages"][1]["content"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_list_tools() {
        let mock_server = MockServer::start().await;
        let app = app_for(&mock_server, None);

        let request = Request::builder()
            .uri("/tools")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!([
                {
                    "id": "get_cost_summary",
                    "title": "Get Cloud Cost Summary",
                    "description": "Summarizes AWS cost using Perplexity Sonar"
                },
                {
                    "id": "get_infra_risks",
                    "title": "Detect Infra Risks",
                    "description": "Analyzes AWS infra for risks using Sonar"
                }
            ])
        );
    }

    #[tokio::test]
    async fn test_invoke_cost_summary() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("Move idle EC2 to Savings Plans.")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let app = app_for(&mock_server, Some("test_api_key"));
        let response = app
            .oneshot(invoke_request("get_cost_summary", r#"{"input":{"ec2":100}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"result": "Move idle EC2 to Savings Plans."})
        );

        let prompt = sent_prompt(&mock_server).await;
        assert!(prompt.starts_with("Analyze the following AWS cost data"));
        assert!(prompt.contains(r#""ec2":100"#));
    }

    #[tokio::test]
    async fn test_invoke_without_body_sends_null_input() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Nothing to review.")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let app = app_for(&mock_server, Some("test_api_key"));
        let request = Request::builder()
            .uri("/tool/get_infra_risks")
            .method("POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(sent_prompt(&mock_server).await.ends_with("null"));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let app = app_for(&mock_server, Some("test_api_key"));
        for body in [r#"{"input":{"ec2":100}}"#, "not json", ""] {
            let response = app
                .clone()
                .oneshot(invoke_request("unknown_id", body))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(body_json(response).await, json!({"error": "Tool not found"}));
        }
    }

    #[tokio::test]
    async fn test_invoke_without_credential() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let app = app_for(&mock_server, None);
        let response = app
            .oneshot(invoke_request("get_infra_risks", r#"{"input":"sg-1 open on 22"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error = body_json(response).await["error"].as_str().unwrap().to_string();
        assert!(error.contains("get_infra_risks"));
        assert!(error.contains("Missing PERPLEXITY_API_KEY"));
    }

    #[tokio::test]
    async fn test_invoke_malformed_body() {
        let mock_server = MockServer::start().await;
        let app = app_for(&mock_server, Some("test_api_key"));

        let response = app
            .oneshot(invoke_request("get_cost_summary", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
