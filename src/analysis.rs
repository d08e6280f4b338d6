use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::config::AnalysisConfig;

pub const SYSTEM_PROMPT: &str = "You are a stock market analysis assistant.";
pub const MAX_TOKENS: u32 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    frequency_penalty: f32,
    max_tokens: u32,
    n: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

pub fn build_prompt(stock_name: &str) -> String {
    format!("Give me a detailed analysis of the stock: {}", stock_name)
}

pub struct AnalysisClient {
    client: Client,
    config: AnalysisConfig,
}

impl AnalysisClient {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Single chat completion asking for an analysis of `stock_name`.
    pub async fn analyze_stock(&self, stock_name: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(stock_name),
                },
            ],
            frequency_penalty: 0.0,
            max_tokens: MAX_TOKENS,
            n: 1,
            temperature: 0.0,
        };

        let url = self.completions_url();
        log::debug!("Chat completion request to {} for {}", url, stock_name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Completion API returned {}: {}", status, body));
        }

        let response: ChatResponse = response.json().await?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("Completion API returned no choices"))
    }
}
