//! Scripted completion client for testing
//!
//! Replays a queue of responses without network access and records every
//! request it receives so tests can inspect the history that was sent.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use super::error::{ProviderError, ProviderResult};
use super::traits::{CompletionClient, CompletionRequest, CompletionResponse};
use crate::logging::Logger;

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this response
    Response(CompletionResponse),
    /// Fail with an HTTP status and body
    Status { status: u16, message: String },
    /// Fail as a network error would
    Network(String),
}

/// Mock completion client driven by a reply script
pub struct MockCompletionClient {
    script: Mutex<VecDeque<MockReply>>,
    /// Replayed forever once the script runs out
    repeat: Option<MockReply>,
    requests: Mutex<Vec<CompletionRequest>>,
    logger: Arc<dyn Logger>,
}

impl MockCompletionClient {
    pub fn new(replies: Vec<MockReply>, logger: Arc<dyn Logger>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Client that answers every request with the same text
    pub fn fixed(text: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::new(Vec::new(), logger).repeating(MockReply::Response(CompletionResponse::text(text)))
    }

    /// Reply used once the script is exhausted
    pub fn repeating(mut self, reply: MockReply) -> Self {
        self.repeat = Some(reply);
        self
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        _api_key: &str,
    ) -> ProviderResult<CompletionResponse> {
        self.requests.lock().push(request.clone());

        let reply = self.script.lock().pop_front().or_else(|| self.repeat.clone());
        self.logger.debug(&format!(
            "[MockCompletion] request #{} -> {:?}",
            self.request_count(),
            reply.as_ref().map(|r| match r {
                MockReply::Response(_) => "response",
                MockReply::Status { .. } => "status",
                MockReply::Network(_) => "network",
            })
        ));

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Status { status, message }) => {
                Err(ProviderError::api_error(self.name(), status, message))
            }
            Some(MockReply::Network(message)) => Err(ProviderError::Other(message)),
            None => Err(ProviderError::Other("mock script exhausted".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::ChatMessage;

    fn request() -> CompletionRequest {
        CompletionRequest::new("mock-model", vec![ChatMessage::user("hi")])
    }

    #[tokio::test]
    async fn test_script_then_exhausted() {
        let client = MockCompletionClient::new(
            vec![
                MockReply::Response(CompletionResponse::text("first")),
                MockReply::Status { status: 500, message: "boom".into() },
            ],
            Arc::new(NoOpLogger),
        );

        let first = client.complete(&request(), "k").await.unwrap();
        assert_eq!(first.first_message().unwrap().content.as_deref(), Some("first"));

        let second = client.complete(&request(), "k").await.unwrap_err();
        assert_eq!(second.status(), Some(500));

        assert!(client.complete(&request(), "k").await.is_err());
        assert_eq!(client.request_count(), 3);
    }

    #[tokio::test]
    async fn test_fixed_repeats() {
        let client = MockCompletionClient::fixed("same", Arc::new(NoOpLogger));
        for _ in 0..3 {
            let response = client.complete(&request(), "k").await.unwrap();
            assert_eq!(response.first_message().unwrap().content.as_deref(), Some("same"));
        }
        assert_eq!(client.requests()[0].messages[0].text(), Some("hi"));
    }
}
