//! Failure types shared by the request builder and the transports.

use thiserror::Error;

/// Everything that can go wrong between building a request and decoding its reply.
///
/// Network errors, TLS errors, 4xx and 5xx replies all land here; callers only
/// ever see them flattened into an [`Rs::Failure`](crate::api::Rs).
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("{status} {reason} for url: {url}")]
    Status {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("invalid JSON in response body: {source}")]
    Json {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid header {name}: {message}")]
    Header { name: String, message: String },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl RequestFailure {
    /// HTTP status attached to the failure, when there was a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestFailure::Transport(err) => err.status().map(|s| s.as_u16()),
            RequestFailure::Status { status, .. } | RequestFailure::Json { status, .. } => {
                Some(*status)
            }
            RequestFailure::Header { .. } | RequestFailure::Url(_) => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported HTTP method: {0}")]
pub struct MethodError(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("{var} is not a valid url: {message}")]
    InvalidUrl { var: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failure_keeps_code() {
        let err = RequestFailure::Status {
            status: 404,
            reason: "Not Found".into(),
            url: "https://api.example.com/test".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "404 Not Found for url: https://api.example.com/test"
        );
    }

    #[test]
    fn construction_failures_have_no_status() {
        let err = RequestFailure::Header {
            name: "x bad".into(),
            message: "invalid HTTP header name".into(),
        };
        assert_eq!(err.status(), None);

        let err: RequestFailure = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.status(), None);
    }

    #[test]
    fn json_failure_keeps_code() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = RequestFailure::Json {
            status: 200,
            source,
        };
        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().starts_with("invalid JSON in response body"));
    }
}
