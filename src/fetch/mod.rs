use anyhow::{anyhow, Result};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT,
};
use reqwest::Client;
use url::Url;

use crate::core::config::ScreenerConfig;

const PAGE_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Source of the two markup documents a run needs.
#[async_trait::async_trait]
pub trait Fetcher {
    /// Company page for an upper-cased stock symbol.
    async fn company_page(&self, symbol: &str) -> Result<String>;

    /// Peer comparison fragment for the warehouse id scraped from the company page.
    async fn peers(&self, symbol: &str, warehouse_id: &str) -> Result<String>;
}

#[async_trait::async_trait]
impl<'a, T: Fetcher + Sync + ?Sized> Fetcher for &'a T {
    async fn company_page(&self, symbol: &str) -> Result<String> {
        (**self).company_page(symbol).await
    }

    async fn peers(&self, symbol: &str, warehouse_id: &str) -> Result<String> {
        (**self).peers(symbol, warehouse_id).await
    }
}

pub struct HttpFetcher {
    client: Client,
    config: ScreenerConfig,
}

impl HttpFetcher {
    /// Both fetches share one cookie store, like a browser session.
    pub fn new(config: ScreenerConfig) -> Result<Self> {
        let client = Client::builder().gzip(true).cookie_store(true).build()?;
        Ok(Self { client, config })
    }

    pub fn with_client(client: Client, config: ScreenerConfig) -> Self {
        Self { client, config }
    }

    fn page_headers(&self) -> Result<HeaderMap> {
        let referer = self.config.base_url.as_str();
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.config.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static(PAGE_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(REFERER, HeaderValue::from_str(referer)?);
        headers.insert(
            HeaderName::from_static("upgrade-insecure-requests"),
            HeaderValue::from_static("1"),
        );
        Ok(headers)
    }

    fn api_headers(&self, company_url: &Url) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.config.user_agent)?);
        headers.insert(REFERER, HeaderValue::from_str(company_url.as_str())?);
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        Ok(headers)
    }

    async fn get_text(&self, url: &Url, headers: HeaderMap) -> Result<String> {
        log::debug!("Fetching URL: {}", url);

        let response = self.client.get(url.as_str()).headers(headers).send().await?;

        log::debug!("Response status: {}", response.status());

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch {} with status code: {}",
                url,
                response.status()
            ));
        }

        let content = response.text().await?;
        log::debug!("Received content length: {}", content.len());
        Ok(content)
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn company_page(&self, symbol: &str) -> Result<String> {
        let url = self.config.company_url(symbol)?;
        let headers = self.page_headers()?;
        self.get_text(&url, headers).await
    }

    async fn peers(&self, symbol: &str, warehouse_id: &str) -> Result<String> {
        let company_url = self.config.company_url(symbol)?;
        let url = self.config.peers_url(warehouse_id)?;
        let headers = self.api_headers(&company_url)?;
        self.get_text(&url, headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn answer_one(listener: &TcpListener, response: &str) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).to_lowercase()
    }

    #[tokio::test]
    async fn test_peers_request_reuses_session_cookies() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let page = "<html><body></body></html>";
            let first = format!(
                "HTTP/1.1 200 OK\r\nSet-Cookie: csrftoken=abc; Path=/\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                page.len(),
                page
            );
            answer_one(&listener, &first).await;

            let fragment = "<table></table>";
            let second = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                fragment.len(),
                fragment
            );
            answer_one(&listener, &second).await
        });

        let config = ScreenerConfig {
            base_url: Url::parse(&format!("http://{}/", addr)).unwrap(),
            ..ScreenerConfig::default()
        };
        let fetcher = HttpFetcher::new(config).unwrap();
        fetcher.company_page("TCS").await.unwrap();
        fetcher.peers("TCS", "6599230").await.unwrap();

        let peers_request = server.await.unwrap();
        assert!(peers_request.starts_with("get /api/company/6599230/peers/ "));
        assert!(peers_request.contains("cookie: csrftoken=abc"));
    }

    #[test]
    fn test_api_headers_refer_to_company_page() {
        let fetcher = HttpFetcher::with_client(Client::new(), ScreenerConfig::default());
        let company_url = fetcher.config.company_url("INFY").unwrap();
        let headers = fetcher.api_headers(&company_url).unwrap();
        assert_eq!(
            headers.get(REFERER).unwrap(),
            "https://www.screener.in/company/INFY/"
        );
        assert_eq!(headers.get("x-requested-with").unwrap(), "XMLHttpRequest");
    }

    #[test]
    fn test_page_headers() {
        let fetcher = HttpFetcher::with_client(Client::new(), ScreenerConfig::default());
        let headers = fetcher.page_headers().unwrap();
        assert_eq!(headers.get(USER_AGENT).unwrap(), "Mozilla/5.0");
        assert_eq!(headers.get(REFERER).unwrap(), "https://www.screener.in/");
    }
}
