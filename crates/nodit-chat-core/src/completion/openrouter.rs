//! OpenRouter (OpenAI-compatible) chat-completion client

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::error::{ProviderError, ProviderResult};
use super::traits::{CompletionClient, CompletionRequest, CompletionResponse};
use crate::logging::Logger;

/// Default OpenRouter API base URL
pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

const APP_TITLE: &str = "Nodit MCP Chat";

/// Upper bound on one completion request, including tool-heavy generations
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Non-streaming client for `POST {api_base}/chat/completions`
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_base: String,
    logger: Arc<dyn Logger>,
}

impl OpenRouterClient {
    /// Create a client against the default OpenRouter endpoint
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_api_base(DEFAULT_API_BASE, logger)
    }

    /// Create a client against a custom OpenAI-compatible base URL
    pub fn with_api_base(api_base: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            http: default_http_client(logger.as_ref()),
            api_base: api_base.into(),
            logger,
        }
    }

    /// Use a preconfigured reqwest client (timeouts, proxies)
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                self.logger.warn(&format!("[OpenRouter] Keeping previous HTTP client: {}", e));
                self.http.clone()
            });
        self.with_http_client(http)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

fn default_http_client(logger: &dyn Logger) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            logger.warn(&format!("[OpenRouter] HTTP client without timeout: {}", e));
            reqwest::Client::new()
        })
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        api_key: &str,
    ) -> ProviderResult<CompletionResponse> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::missing_api_key(self.name()));
        }

        let url = self.endpoint();
        self.logger.info(&format!(
            "[OpenRouter] POST {} model={} messages={} tools={}",
            url,
            request.model,
            request.messages.len(),
            request.tools.as_ref().map_or(0, |t| t.len())
        ));

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .header("X-Title", APP_TITLE)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                self.logger.error(&format!("[OpenRouter] Request failed: {}", e));
                ProviderError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            self.logger.error(&format!(
                "[OpenRouter] HTTP {} from completion endpoint",
                status.as_u16()
            ));
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(ProviderError::api_error(self.name(), status.as_u16(), message));
        }

        let body = response.text().await?;
        let parsed: CompletionResponse = serde_json::from_str(&body)?;

        if parsed.choices.is_empty() {
            return Err(ProviderError::invalid_response(
                self.name(),
                "response contained no choices",
            ));
        }

        self.logger.debug(&format!(
            "[OpenRouter] Received {} tool call(s)",
            parsed.first_message().map_or(0, |m| m.tool_calls.len())
        ));

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::{ChatMessage, ToolDescriptor};
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::Server) -> OpenRouterClient {
        OpenRouterClient::with_api_base(format!("{}/api/v1/", server.url()), Arc::new(NoOpLogger))
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new("openai/gpt-4o-mini", vec![ChatMessage::user("what is block 100")])
            .with_tools(vec![ToolDescriptor::new("get_block").to_function_tool()])
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/chat/completions")
            .match_header("authorization", "Bearer sk-or-test")
            .match_header("x-title", APP_TITLE)
            .match_body(Matcher::PartialJson(json!({
                "model": "openai/gpt-4o-mini",
                "messages": [{ "role": "user", "content": "what is block 100" }],
                "tools": [{
                    "type": "function",
                    "function": {
                        "name": "get_block",
                        "description": "No description available",
                        "parameters": { "type": "object", "properties": {}, "required": [] }
                    }
                }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{ "message": { "role": "assistant", "content": "Block 100 is old." } }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = client(&server).complete(&request(), "sk-or-test").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            response.first_message().unwrap().content.as_deref(),
            Some("Block 100 is old.")
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/chat/completions")
            .with_status(429)
            .with_body("Rate limit exceeded")
            .create_async()
            .await;

        let err = client(&server).complete(&request(), "sk-or-test").await.unwrap_err();

        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("Rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let err = client(&server).complete(&request(), "sk-or-test").await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/chat/completions")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let err = client(&server).complete(&request(), "sk-or-test").await.unwrap_err();
        assert!(matches!(err, ProviderError::Json(_)));
    }

    #[tokio::test]
    async fn test_blank_key_rejected_without_request() {
        let client = OpenRouterClient::new(Arc::new(NoOpLogger));
        let err = client.complete(&request(), "  ").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey { .. }));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenRouterClient::with_api_base("https://example.test/v1/", Arc::new(NoOpLogger));
        assert_eq!(client.endpoint(), "https://example.test/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Accepts the connection but never writes a response
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        let client = OpenRouterClient::with_api_base(format!("http://{}/api/v1", addr), Arc::new(NoOpLogger))
            .timeout(Duration::from_millis(200));

        let err = tokio::time::timeout(Duration::from_secs(5), client.complete(&request(), "sk-or-test"))
            .await
            .expect("request should time out on its own")
            .unwrap_err();
        match err {
            ProviderError::Http(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {:?}", other),
        }
        server.abort();
    }
}
