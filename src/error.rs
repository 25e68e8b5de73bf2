use thiserror::Error;

/// Errors surfaced by the request/fetch/orchestration path.
///
/// Lookups over a fetched response never produce these; a missing axis or an
/// unknown time code is an ordinary `None`/fallback result.
#[derive(Debug, Error)]
pub enum EstatError {
    /// Missing app id, area code, statistics id, or an empty series list.
    #[error("configuration error: {0}")]
    Config(String),

    /// The service answered, but reported a non-zero `RESULT.STATUS`.
    #[error("e-Stat API error (status {code}): {message}")]
    ApiStatus { code: i64, message: String },

    /// Network, DNS, or HTTP-level failure. `body` keeps whatever the server
    /// sent back so the caller can show it.
    #[error("request failed: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    /// The response arrived but was not a `getStatsData` document.
    #[error("decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl EstatError {
    /// Response body attached to a transport or decode failure, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            EstatError::Transport { body, .. } => body.as_deref(),
            EstatError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EstatError>;
