use anyhow::{anyhow, Result};
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.screener.in";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_LLM_BASE_URL: &str = "https://cloud.olakrutrim.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "Meta-Llama-3-8B-Instruct";
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:5000";

#[derive(Clone, Debug)]
pub struct ScreenerConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub output_dir: PathBuf,
}

impl ScreenerConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SCREENER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| anyhow!("Invalid SCREENER_BASE_URL {}: {}", base_url, e))?;

        let user_agent = std::env::var("SCREENER_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let output_dir = PathBuf::from(
            std::env::var("SCREENER_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()),
        );

        Ok(Self {
            base_url: with_trailing_slash(base_url),
            user_agent,
            output_dir,
        })
    }

    pub fn set_base_url(&mut self, base_url: Url) {
        self.base_url = with_trailing_slash(base_url);
    }

    /// Page holding every primary section for `symbol`.
    pub fn company_url(&self, symbol: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("company/{}/", symbol))?)
    }

    /// Peer comparison fragment, keyed by the warehouse id scraped from the company page.
    pub fn peers_url(&self, warehouse_id: &str) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("api/company/{}/peers/", warehouse_id))?)
    }
}

/// `Url::join` replaces the last segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub server_addr: String,
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string());

        let model =
            std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());

        let server_addr =
            std::env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());

        Ok(Self {
            api_key,
            base_url,
            model,
            server_addr,
        })
    }
}
