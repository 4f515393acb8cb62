//! This is module documentation for api
//!
//! A small builder for one-shot calls against a JSON REST API.
//! Every call ends in an [`Rs`]: the builder may fail while it is being
//! configured, but executing a request never returns an error.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::Result;
use crate::error::{MethodError, RequestFailure};
use crate::transport::{Outgoing, Reply, ReqwestTransport, Transport};

/// Reported by [`Rs::status_code`] when a failure carried no HTTP status.
pub const UNKNOWN_STATUS: u16 = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = MethodError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(MethodError(s.to_string())),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Rs {
    /// 2xx reply. `data` is `None` when the body was empty.
    Success { status: u16, data: Option<Value> },
    /// Anything else. `status` is `None` when no response was received.
    Failure { status: Option<u16>, message: String },
}

impl Rs {
    pub fn failure<S>(status: Option<u16>, message: S) -> Self
    where
        S: Into<String>,
    {
        Rs::Failure {
            status,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Rs::Success { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Rs::Success { status, .. } => Some(*status),
            Rs::Failure { status, .. } => *status,
        }
    }

    /// HTTP status, with [`UNKNOWN_STATUS`] standing in when none was received.
    pub fn status_code(&self) -> u16 {
        self.status().unwrap_or(UNKNOWN_STATUS)
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Rs::Success { data, .. } => data.as_ref(),
            Rs::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Rs::Success { .. } => None,
            Rs::Failure { message, .. } => Some(message),
        }
    }

    pub fn into_result(self) -> Result<Option<Value>> {
        match self {
            Rs::Success { data, .. } => Ok(data),
            Rs::Failure { message, .. } => Err(anyhow::anyhow!(message)),
        }
    }
}

impl From<RequestFailure> for Rs {
    fn from(value: RequestFailure) -> Self {
        Rs::failure(value.status(), value.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Rq {
    url: Url,
    method: Method,
    headers: Option<HeaderMap>,
    secrets: HashSet<HeaderName>,
    params: Vec<(String, String)>,
    payload: Option<Value>,
    credential: Option<String>,
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn header_name(name: &[u8]) -> std::result::Result<HeaderName, RequestFailure> {
    HeaderName::from_bytes(name).map_err(|err| RequestFailure::Header {
        name: String::from_utf8_lossy(name).into_owned(),
        message: err.to_string(),
    })
}

fn header_value(name: &HeaderName, value: &str) -> std::result::Result<HeaderValue, RequestFailure> {
    HeaderValue::from_str(value).map_err(|err| RequestFailure::Header {
        name: name.to_string(),
        message: err.to_string(),
    })
}

impl Rq {
    pub fn new<S>(url: S) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let url = Url::parse(url.as_ref()).map_err(RequestFailure::from)?;
        Ok(Rq {
            url,
            method: Method::default(),
            headers: None,
            secrets: HashSet::new(),
            params: Vec::new(),
            payload: None,
            credential: None,
        })
    }

    pub fn from_static(url: &'static str) -> Result<Self> {
        Self::new(url)
    }

    /// Appends `uri` to the path of the base url.
    pub fn uri<S>(mut self, uri: S) -> Self
    where
        S: AsRef<str>,
    {
        let path = format!(
            "{}/{}",
            self.url.path().trim_end_matches('/'),
            uri.as_ref().trim_start_matches('/')
        );
        self.url.set_path(&path);
        self
    }

    pub fn method<S>(mut self, method: S) -> Result<Self>
    where
        S: AsRef<str>,
    {
        self.method = method.as_ref().parse()?;
        Ok(self)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Replaces the whole header set. The default JSON pair is not added.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn add_header<V>(mut self, name: &[u8], value: V) -> Result<Self>
    where
        V: AsRef<str>,
    {
        let name = header_name(name)?;
        let value = header_value(&name, value.as_ref())?;
        self.headers.get_or_insert_with(HeaderMap::new).insert(name, value);
        Ok(self)
    }

    /// Like [`Rq::add_header`], but the value never shows up in logs.
    pub fn add_secret_header<V>(self, name: &[u8], value: V) -> Result<Self>
    where
        V: AsRef<str>,
    {
        let secret = header_name(name)?;
        let mut rq = self.add_header(name, value)?;
        rq.secrets.insert(secret);
        Ok(rq)
    }

    pub fn with_json(mut self) -> Self {
        let headers = self.headers.get_or_insert_with(HeaderMap::new);
        headers.extend(default_headers());
        self
    }

    pub fn bearer<S>(mut self, credential: S) -> Self
    where
        S: Into<String>,
    {
        self.credential = Some(credential.into());
        self
    }

    pub fn add_params<K, V>(mut self, params: Vec<(K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn load_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn apply_if<T, F>(self, val: Option<T>, fun: F) -> Self
    where
        F: FnOnce(Self, T) -> Self,
    {
        if let Some(val) = val {
            fun(self, val)
        } else {
            self
        }
    }

    /// Merges defaults, credential and query into the request that goes on the wire.
    pub fn prepare(&self) -> std::result::Result<Outgoing, RequestFailure> {
        let mut headers = self.headers.clone().unwrap_or_else(default_headers);
        let mut secrets = self.secrets.clone();

        // sent verbatim; only the empty string means "no credential"
        if let Some(credential) = self.credential.as_deref().filter(|c| !c.is_empty()) {
            let value = header_value(&AUTHORIZATION, &format!("Bearer {credential}"))?;
            headers.insert(AUTHORIZATION, value);
            secrets.insert(AUTHORIZATION);
        }

        let mut url = self.url.clone();
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }

        Ok(Outgoing {
            method: self.method,
            url,
            headers,
            body: self.payload.clone(),
            secrets,
        })
    }

    /// Executes with the process-wide [`ReqwestTransport`].
    pub async fn apply(&self) -> Rs {
        match ReqwestTransport::shared() {
            Ok(transport) => self.apply_with(transport).await,
            Err(err) => err.into(),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(method = %self.method))]
    pub async fn apply_with<T>(&self, transport: &T) -> Rs
    where
        T: Transport,
    {
        let rq = match self.prepare() {
            Ok(rq) => rq,
            Err(err) => return err.into(),
        };

        tracing::debug!(url = %rq.url, "Request URL");
        tracing::debug!(headers = ?rq.redacted_headers(), "Request headers");

        let outcome = match transport.send(&rq).await {
            Ok(reply) => decode(reply),
            Err(err) => Err(err),
        };

        match outcome {
            Ok((status, data)) => {
                tracing::debug!(status, "Request succeeded");
                Rs::Success { status, data }
            }
            Err(err) => {
                tracing::warn!(status = ?err.status(), error = %err, "Request failed");
                err.into()
            }
        }
    }
}

fn decode(reply: Reply) -> std::result::Result<(u16, Option<Value>), RequestFailure> {
    if !(200..300).contains(&reply.status) {
        return Err(RequestFailure::Status {
            status: reply.status,
            reason: reply.reason,
            url: reply.url,
        });
    }

    if reply.body.iter().all(u8::is_ascii_whitespace) {
        return Ok((reply.status, None));
    }

    serde_json::from_slice(&reply.body)
        .map(|data| (reply.status, Some(data)))
        .map_err(|source| RequestFailure::Json {
            status: reply.status,
            source,
        })
}

/// One request in a single call: default JSON headers unless `headers` is given,
/// bearer credential on top, JSON `body` if any.
pub async fn execute(
    url: &str,
    method: Method,
    headers: Option<HeaderMap>,
    body: Option<Value>,
    credential: Option<&str>,
) -> Rs {
    match ReqwestTransport::shared() {
        Ok(transport) => execute_with(transport, url, method, headers, body, credential).await,
        Err(err) => err.into(),
    }
}

pub async fn execute_with<T>(
    transport: &T,
    url: &str,
    method: Method,
    headers: Option<HeaderMap>,
    body: Option<Value>,
    credential: Option<&str>,
) -> Rs
where
    T: Transport,
{
    let rq = match Rq::new(url) {
        Ok(rq) => rq,
        Err(err) => return Rs::failure(None, err.to_string()),
    };
    rq.with_method(method)
        .apply_if(headers, Rq::headers)
        .apply_if(body, Rq::load_payload)
        .apply_if(credential, Rq::bearer)
        .apply_with(transport)
        .await
}
