use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AtlasError>;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: Value },

    #[error("unexpected upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unable to build the upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("cannot build an upstream path from {0:?}")]
    InvalidPath(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AtlasError {
    /// JSON payload handed back to the dashboard for this error.
    ///
    /// Upstream failures forward the monitoring API's own error body untouched.
    pub fn body(&self) -> Value {
        match self {
            AtlasError::Upstream { body, .. } => body.clone(),
            other => serde_json::json!({ "error": other.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_error_forwards_body() {
        let upstream = json!({ "detail": "Cluster not found", "errorCode": "CLUSTER_NOT_FOUND" });
        let err = AtlasError::Upstream {
            status: 404,
            body: upstream.clone(),
        };
        assert_eq!(err.body(), upstream);
    }

    #[test]
    fn other_errors_wrap_message() {
        let err = AtlasError::InvalidRequest("missing field `range`".to_string());
        assert_eq!(
            err.body(),
            json!({ "error": "invalid request: missing field `range`" })
        );
    }
}
