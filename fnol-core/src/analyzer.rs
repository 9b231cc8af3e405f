use async_trait::async_trait;
use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::Prompt,
    providers::openrouter,
};
use serde_json::json;
use tracing::{debug, info};

use crate::error::{FnolError, Result};

pub const DEFAULT_MODEL: &str = "openai/gpt-4";
pub const TEMPERATURE: f64 = 0.2;
pub const MAX_TOKENS: u64 = 400;

/// Turns an FNOL prompt into the completion backend's free-text answer
#[async_trait]
pub trait ClaimAnalyzer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String>;
}

/// `ClaimAnalyzer` backed by an OpenRouter completion model
pub struct RigClaimAnalyzer {
    client: openrouter::Client,
    model: String,
}

impl RigClaimAnalyzer {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            client: openrouter::Client::new(api_key),
            model: model.into(),
        }
    }

    /// Same as `new`, against an OpenRouter-compatible API at `base_url`
    pub fn with_base_url(api_key: &str, model: impl Into<String>, base_url: &str) -> Result<Self> {
        let client = openrouter::Client::builder(api_key)
            .base_url(base_url)
            .build()
            .map_err(|e| FnolError::Config(format!("invalid completion client: {}", e)))?;
        Ok(Self {
            client,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn agent(&self) -> Agent<openrouter::CompletionModel> {
        // The OpenRouter provider leaves max_tokens out of the request body
        self.client
            .agent(&self.model)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .additional_params(json!({ "max_tokens": MAX_TOKENS }))
            .build()
    }
}

#[async_trait]
impl ClaimAnalyzer for RigClaimAnalyzer {
    async fn summarize(&self, prompt: &str) -> Result<String> {
        info!(model = %self.model, prompt_length = prompt.len(), "Requesting FNOL summary");

        let summary = self
            .agent()
            .prompt(prompt)
            .await
            .map_err(|e| FnolError::Completion(e.to_string()))?;

        debug!(summary_length = summary.len(), "FNOL summary received");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/v1", addr)
    }

    fn completion(content: &str) -> Value {
        json!({
            "id": "gen-1",
            "object": "chat.completion",
            "created": 1717000000,
            "model": DEFAULT_MODEL,
            "choices": [{
                "index": 0,
                "native_finish_reason": "stop",
                "finish_reason": "stop",
                "message": {"role": "assistant", "content": content}
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn test_summarize_sends_fixed_settings_and_single_user_message() {
        let reply = r#"{"risk_category": "low", "recommendations": "Take photos"}"#;
        let received: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let router = Router::new().route(
            "/api/v1/chat/completions",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    Json(completion(reply))
                }
            }),
        );
        let analyzer =
            RigClaimAnalyzer::with_base_url("sk-test", DEFAULT_MODEL, &serve(router).await)
                .unwrap();

        let summary = analyzer.summarize("Describe the loss").await.unwrap();

        assert_eq!(summary, reply);
        assert_eq!(analyzer.model(), DEFAULT_MODEL);
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let body = &received[0];
        assert_eq!(body["model"], "openai/gpt-4");
        assert_eq!(body["temperature"], json!(0.2));
        assert_eq!(body["max_tokens"], json!(400));

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"][0]["text"], "Describe the loss");
    }

    #[tokio::test]
    async fn test_summarize_surfaces_provider_error() {
        let router = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );
        let analyzer =
            RigClaimAnalyzer::with_base_url("sk-test", DEFAULT_MODEL, &serve(router).await)
                .unwrap();

        let err = analyzer.summarize("Describe the loss").await.unwrap_err();

        assert!(matches!(err, FnolError::Completion(_)));
        assert!(err.to_string().contains("rate limited"));
    }
}
