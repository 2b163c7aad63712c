use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::FetchError;

pub const SEARCH_HOST: &str = "search.lyrics.astraweb.com";
pub const SEARCH_PORT: u16 = 80;
pub const DISPLAY_HOST: &str = "display.lyrics.astraweb.com";
pub const DISPLAY_PORT: u16 = 2000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosts and ports of the search and lyrics display services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub search_host: String,
    pub search_port: u16,
    pub display_host: String,
    pub display_port: u16,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search_host: SEARCH_HOST.to_string(),
            search_port: SEARCH_PORT,
            display_host: DISPLAY_HOST.to_string(),
            display_port: DISPLAY_PORT,
        }
    }
}

impl Endpoints {
    /// Public URL of a search page, e.g. `http://search.lyrics.astraweb.com/?word=a+b`.
    pub fn search_url(&self, path: &str) -> String {
        if self.search_port == 80 {
            format!("http://{}{path}", self.search_host)
        } else {
            format!("http://{}:{}{path}", self.search_host, self.search_port)
        }
    }

    /// Public URL of a lyrics display page. The port is always spelled out.
    pub fn display_url(&self, locator: &str) -> String {
        format!("http://{}:{}{locator}", self.display_host, self.display_port)
    }
}

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpPage {
    pub status: u16,
    pub body: String,
}

impl HttpPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network access used by [`crate::LyricsFetcher`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `path` from `host:port` over HTTP.
    async fn fetch(&self, host: &str, port: u16, path: &str) -> Result<HttpPage, FetchError>;

    /// Send `request` verbatim over TCP and return everything the peer writes back.
    ///
    /// Nothing in the reply is interpreted; status line and headers stay in the body.
    async fn fetch_raw(&self, host: &str, port: u16, request: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by reqwest for HTTP and a plain TCP socket for raw requests.
pub struct NetFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl NetFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lyrics-astraweb/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl PageFetcher for NetFetcher {
    async fn fetch(&self, host: &str, port: u16, path: &str) -> Result<HttpPage, FetchError> {
        let url = format!("http://{host}:{port}{path}");
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "Received HTTP response");

        Ok(HttpPage { status, body })
    }

    async fn fetch_raw(&self, host: &str, port: u16, request: &str) -> Result<String, FetchError> {
        tracing::debug!(host, port, request = request.trim_end(), "Raw request");

        let exchange = async {
            let mut stream = TcpStream::connect((host, port)).await?;
            stream.write_all(request.as_bytes()).await?;
            stream.flush().await?;

            let mut reply = Vec::new();
            stream.read_to_end(&mut reply).await?;
            Ok::<_, std::io::Error>(reply)
        };

        let reply = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| FetchError::Timeout {
                host: host.to_string(),
                port,
            })??;
        tracing::debug!(bytes = reply.len(), "Received raw reply");

        Ok(String::from_utf8_lossy(&reply).into_owned())
    }
}
