use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::json;

use super::models::{
    Assistant, ChatCompletionResponse, ChatRequest, MessageListPage, Run, Thread, ThreadMessage,
};
use super::service::LlmService;
use crate::error::{ConvoError, Result};

/// `LlmService` implementation over the OpenAI HTTP API.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// `base_url` is the API base ending in `/v1`.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                ConvoError::ConfigError(format!("Invalid authorization header: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // The assistants/threads/runs surface requires the beta opt-in header.
        headers.insert("OpenAI-Beta", HeaderValue::from_static("assistants=v2"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ConvoError::ApiError { status, message })
    }
}

#[async_trait]
impl LlmService for OpenAiClient {
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletionResponse> {
        let response = self
            .http
            .post(self.url("/chat/completions"))
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_thread(&self) -> Result<Thread> {
        let response = self
            .http
            .post(self.url("/threads"))
            .json(&json!({}))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_thread_message(&self, thread_id: &str, content: &str) -> Result<ThreadMessage> {
        let response = self
            .http
            .post(self.url(&format!("/threads/{}/messages", thread_id)))
            .json(&json!({ "role": "user", "content": content }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_thread_messages(&self, thread_id: &str) -> Result<MessageListPage> {
        let response = self
            .http
            .get(self.url(&format!("/threads/{}/messages", thread_id)))
            .query(&[("order", "asc")])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        let response = self
            .http
            .get(self.url(&format!("/assistants/{}", assistant_id)))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_assistant_model(&self, assistant_id: &str, model: &str) -> Result<Assistant> {
        let response = self
            .http
            .post(self.url(&format!("/assistants/{}", assistant_id)))
            .json(&json!({ "model": model }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        instructions: Option<&str>,
    ) -> Result<Run> {
        let mut body = json!({ "assistant_id": assistant_id });
        if let Some(extra) = instructions {
            body["additional_instructions"] = json!(extra);
        }
        let response = self
            .http
            .post(self.url(&format!("/threads/{}/runs", thread_id)))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let response = self
            .http
            .get(self.url(&format!("/threads/{}/runs/{}", thread_id, run_id)))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
