use thiserror::Error;

/// Every failure the client can hit. The chat screen collapses all of them
/// into one fallback reply; the variants exist so the log says what went wrong.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{endpoint} returned HTTP {status}")]
    Http { endpoint: String, status: u16 },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("{0} replied without an `answer` or `reply` field")]
    EmptyReply(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger setup failed: {0}")]
    Logging(String),
}

pub type PlatformResult<T> = Result<T, PlatformError>;

impl PlatformError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        PlatformError::Config(msg.into())
    }

    pub fn decode_error(msg: impl Into<String>) -> Self {
        PlatformError::Decode(msg.into())
    }

    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        PlatformError::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// HTTP status of the failed call, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            PlatformError::Http { status, .. } => Some(*status),
            PlatformError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        PlatformError::Decode(err.to_string())
    }
}

impl From<flexi_logger::FlexiLoggerError> for PlatformError {
    fn from(err: flexi_logger::FlexiLoggerError) -> Self {
        PlatformError::Logging(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_reports_status() {
        let err = PlatformError::Http {
            endpoint: "http://a/api/chat".to_string(),
            status: 502,
        };
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "http://a/api/chat returned HTTP 502");
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err: PlatformError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, PlatformError::Decode(_)));
        assert_eq!(err.status(), None);
    }
}
