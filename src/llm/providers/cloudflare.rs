use super::InferenceProvider;
use crate::config::{RunnerConfig, Secret};
use crate::errors::{ConfigError, RunError};
use crate::llm::{ChatMessage, InferenceRequest, InferenceResponse};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Provider implementation for Cloudflare Workers AI
#[derive(Debug)]
pub struct CloudflareProvider {
    http: Client,
    /// `{api_root}/accounts/{account_id}/ai/run/`; the model is appended verbatim
    base_url: String,
    api_token: Secret,
}

impl CloudflareProvider {
    /// Creates a provider from resolved configuration
    ///
    /// # Returns
    /// * `Result<Self, RunError>` - Provider instance or error if the HTTP client cannot be built
    pub fn new(config: &RunnerConfig) -> Result<Self, RunError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::Invalid {
                field: "http client",
                value: config.api_root.clone(),
                reason: e.to_string(),
            })?;

        Ok(CloudflareProvider {
            http,
            base_url: config.run_base_url(),
            api_token: config.api_token.clone(),
        })
    }

    /// Builds the POST for `model` without sending it.
    pub fn build_request(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<reqwest::Request, RunError> {
        let url = self.endpoint(model);
        self.http
            .post(&url)
            .bearer_auth(self.api_token.expose())
            .json(&InferenceRequest::new(messages))
            .build()
            .map_err(|source| RunError::Transport { url, source })
    }
}

#[async_trait]
impl InferenceProvider for CloudflareProvider {
    fn endpoint(&self, model: &str) -> String {
        format!("{}{}", self.base_url, model)
    }

    /// Sends one request and classifies the outcome
    ///
    /// # Returns
    /// * `Ok(InferenceResponse)` - 2xx status with a JSON body, envelope untouched
    /// * `Err(RunError::Transport)` - no response received
    /// * `Err(RunError::Status)` - non-2xx status, raw body kept
    /// * `Err(RunError::Decode)` - 2xx status but the body is not JSON
    async fn run(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<InferenceResponse, RunError> {
        let request = self.build_request(model, messages)?;
        let url = request.url().to_string();
        debug!("POST {} ({} messages)", url, messages.len());

        let res = self
            .http
            .execute(request)
            .await
            .map_err(|source| RunError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|source| RunError::Transport {
                url: url.clone(),
                source,
            })?;
        info!("Workers AI answered HTTP {} for model {}", status.as_u16(), model);

        if !status.is_success() {
            warn!("Workers AI error body: {}", text);
            return Err(RunError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        match serde_json::from_str(&text) {
            Ok(body) => Ok(InferenceResponse::new(status.as_u16(), body)),
            Err(e) => Err(RunError::Decode {
                status: status.as_u16(),
                reason: e.to_string(),
                body: text,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOverrides;
    use axum::body::Bytes;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Request as seen by the stub endpoint.
    #[derive(Debug, Clone)]
    struct Captured {
        path: String,
        authorization: Option<String>,
        body: Value,
    }

    /// Starts a local endpoint answering every request with `status` and `body`.
    async fn stub_endpoint(
        status: StatusCode,
        body: &'static str,
    ) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, raw: Bytes| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(Captured {
                    path: uri.path().to_string(),
                    authorization: headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: serde_json::from_slice(&raw).unwrap_or(Value::Null),
                });
                (status, body)
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/client/v4", addr), captured)
    }

    fn config_for(api_root: &str) -> RunnerConfig {
        RunnerConfig::resolve(
            None,
            ConfigOverrides {
                account_id: Some("acc123".to_string()),
                api_token: Some("secret-token".to_string()),
                api_root: Some(api_root.to_string()),
                timeout: Some(Duration::from_secs(5)),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn scenario_messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You are a friendly assistant"),
            ChatMessage::user("Hello"),
        ]
    }

    #[test]
    fn endpoint_appends_model_verbatim() {
        let provider = CloudflareProvider::new(&config_for("https://api.cloudflare.com/client/v4")).unwrap();
        let base = "https://api.cloudflare.com/client/v4/accounts/acc123/ai/run/";
        for model in ["@cf/meta/llama-3-8b-instruct", " spaced ", "a/../b", "", "x?y=1"] {
            assert_eq!(provider.endpoint(model), format!("{}{}", base, model));
        }
    }

    #[test]
    fn built_request_carries_body_and_bearer() {
        let provider = CloudflareProvider::new(&config_for("https://api.cloudflare.com/client/v4")).unwrap();
        let request = provider
            .build_request("@cf/meta/llama-3-8b-instruct", &scenario_messages())
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://api.cloudflare.com/client/v4/accounts/acc123/ai/run/@cf/meta/llama-3-8b-instruct"
        );
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer secret-token"
        );
        let body: Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"messages": [
                {"role": "system", "content": "You are a friendly assistant"},
                {"role": "user", "content": "Hello"}
            ]})
        );
    }

    #[test]
    fn bearer_header_present_for_empty_conversation() {
        let provider = CloudflareProvider::new(&config_for("https://api.cloudflare.com/client/v4")).unwrap();
        let request = provider.build_request("m", &[]).unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer secret-token"
        );
        let body: Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(body, json!({"messages": []}));
    }

    #[tokio::test]
    async fn end_to_end_scenario_hits_model_path() {
        let (root, captured) = stub_endpoint(
            StatusCode::OK,
            r#"{"result":{"response":"Hi!"},"success":true,"errors":[],"messages":[]}"#,
        )
        .await;
        let provider = CloudflareProvider::new(&config_for(&root)).unwrap();

        let response = provider
            .run("@cf/meta/llama-3-8b-instruct", &scenario_messages())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.response_text(), Some("Hi!"));

        let seen = captured.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].path,
            "/client/v4/accounts/acc123/ai/run/@cf/meta/llama-3-8b-instruct"
        );
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer secret-token"));
        assert_eq!(
            seen[0].body,
            json!({"messages": [
                {"role": "system", "content": "You are a friendly assistant"},
                {"role": "user", "content": "Hello"}
            ]})
        );
    }

    #[tokio::test]
    async fn non_success_status_is_classified() {
        let (root, _) = stub_endpoint(
            StatusCode::UNAUTHORIZED,
            r#"{"success":false,"errors":[{"code":10000,"message":"Authentication error"}]}"#,
        )
        .await;
        let provider = CloudflareProvider::new(&config_for(&root)).unwrap();

        match provider.run("@cf/meta/llama-3-8b-instruct", &scenario_messages()).await {
            Err(RunError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Authentication error"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn error_envelope_with_2xx_is_returned_untouched() {
        let (root, _) = stub_endpoint(
            StatusCode::OK,
            r#"{"success":false,"errors":[{"message":"model overloaded"}],"result":null}"#,
        )
        .await;
        let provider = CloudflareProvider::new(&config_for(&root)).unwrap();

        let response = provider.run("m", &scenario_messages()).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.envelope_success(), Some(false));
        assert_eq!(response.error_messages(), vec!["model overloaded"]);
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_failure() {
        let (root, _) = stub_endpoint(StatusCode::OK, "<html>gateway</html>").await;
        let provider = CloudflareProvider::new(&config_for(&root)).unwrap();

        match provider.run("m", &scenario_messages()).await {
            Err(RunError::Decode { status, body, .. }) => {
                assert_eq!(status, 200);
                assert_eq!(body, "<html>gateway</html>");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider =
            CloudflareProvider::new(&config_for(&format!("http://{}/client/v4", addr))).unwrap();
        let err = provider.run("m", &scenario_messages()).await.unwrap_err();
        assert_eq!(err.kind(), crate::errors::FailureKind::Transport);
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn slow_endpoint_times_out_as_transport_failure() {
        let app = Router::new().fallback(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            (StatusCode::OK, r#"{"success":true}"#)
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = RunnerConfig {
            timeout: Duration::from_millis(100),
            ..config_for(&format!("http://{}/client/v4", addr))
        };
        let provider = CloudflareProvider::new(&config).unwrap();
        let err = provider.run("m", &scenario_messages()).await.unwrap_err();

        assert!(matches!(err, RunError::Transport { ref source, .. } if source.is_timeout()));
        assert_eq!(err.kind(), crate::errors::FailureKind::Transport);

        colored::control::set_override(false);
        let report = crate::utils::describe_failure(&err);
        assert!(report.contains("[transport]"));
        assert!(report.contains("the request timed out; raise --timeout to wait longer"));
    }
}
