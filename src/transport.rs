//! The seam between a prepared request and the wire.

use std::collections::HashSet;
use std::future::Future;
use std::sync::OnceLock;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName};
use url::Url;

use crate::api::Method;
use crate::error::RequestFailure;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

const REDACTED: &str = "<redacted>";

static SHARED: OnceLock<ReqwestTransport> = OnceLock::new();

/// A fully merged request, ready to send.
#[derive(Debug, Clone)]
pub struct Outgoing {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    pub secrets: HashSet<HeaderName>,
}

impl Outgoing {
    /// Header pairs safe to log: values of secret headers are replaced.
    pub fn redacted_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| {
                let value = if self.secrets.contains(name) {
                    REDACTED.to_string()
                } else {
                    String::from_utf8_lossy(value.as_bytes()).into_owned()
                };
                (name.as_str().to_string(), value)
            })
            .collect()
    }
}

/// Raw reply, before status checks and JSON decoding.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub reason: String,
    pub url: String,
    pub body: Bytes,
}

pub trait Transport {
    fn send(&self, rq: &Outgoing) -> impl Future<Output = Result<Reply, RequestFailure>> + Send;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, RequestFailure> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()?;
        Ok(ReqwestTransport { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }

    /// Process-wide transport, built on first use so the connection pool is reused.
    pub fn shared() -> Result<&'static ReqwestTransport, RequestFailure> {
        if let Some(transport) = SHARED.get() {
            return Ok(transport);
        }
        let transport = Self::new()?;
        Ok(SHARED.get_or_init(|| transport))
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, rq: &Outgoing) -> Result<Reply, RequestFailure> {
        let mut builder = self
            .client
            .request(rq.method.into(), rq.url.clone())
            .headers(rq.headers.clone());
        if let Some(body) = &rq.body {
            builder = builder.json(body);
        }

        let res = builder.send().await?;
        let status = res.status();
        let url = res.url().to_string();
        let body = res.bytes().await?;

        Ok(Reply {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            url,
            body,
        })
    }
}
