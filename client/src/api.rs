use anyhow::{Context, Result};
use moviebot_shared::{ChatRequest, ChatResponse};
use reqwest::Client;

/// Thin client for the chat backend. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// One exchange: post the text, parse the reply payload.
    ///
    /// The HTTP status is deliberately not inspected: an error-shaped body
    /// fails schema parsing and surfaces exactly like a transport failure.
    pub async fn send_message(&self, text: &str) -> Result<ChatResponse> {
        let url = format!("{}/api/message", self.base_url);
        let request = ChatRequest {
            text: text.to_string(),
        };

        let res = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to chat server")?;

        let response = res
            .json::<ChatResponse>()
            .await
            .context("Failed to parse chat server response")?;

        Ok(response)
    }
}
