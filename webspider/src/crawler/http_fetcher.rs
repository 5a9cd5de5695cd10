use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{Fetcher, SpiderConfig, SpiderError};

/// [`Fetcher`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http_client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { http_client })
    }

    pub fn from_config(config: &SpiderConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.request_timeout, &config.user_agent)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<u16, SpiderError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|err| SpiderError::from_reqwest(url, &err))?;

        let status = response.status().as_u16();
        response
            .bytes()
            .await
            .map_err(|err| SpiderError::from_reqwest(url, &err))?;

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;
    use crate::ErrorKind;

    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetch_returns_status() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
        )
        .await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5), "TestBot/1.0").unwrap();

        assert_eq!(fetcher.fetch(&url).await, Ok(200));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_fetch_error() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5), "TestBot/1.0").unwrap();

        assert_eq!(fetcher.fetch(&url).await, Ok(404));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let fetcher = HttpFetcher::new(Duration::from_secs(5), "TestBot/1.0").unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Connect);
        assert_eq!(err.url, "http://127.0.0.1:1/");
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let fetcher = HttpFetcher::new(Duration::from_millis(200), "TestBot/1.0").unwrap();
        let err = fetcher.fetch(&format!("http://{}/", addr)).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Timeout);
    }
}
