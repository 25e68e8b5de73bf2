//! Synchronous client for the **e-Stat API (REST 3.0, JSON)** `getStatsData` endpoint.
//!
//! One call to [`Client::fetch`] is one outbound GET. There is no retry and no
//! pagination; a failure is returned to the caller as-is.
//!
//! ### Notes
//! - The service always answers HTTP 200 for application-level problems and
//!   reports them in `GET_STATS_DATA.RESULT.STATUS`; any non-zero status becomes
//!   [`EstatError::ApiStatus`] with the service's own message.
//! - HTTP-level failures become [`EstatError::Transport`] and keep the response
//!   body, if there was one.
//!
//! Typical usage:
//! ```no_run
//! # use estat_rs::{Client, config::{SettingsBuilder, ConfigLayer, SeriesSpec}, request};
//! let settings = SettingsBuilder::new()
//!     .merge(ConfigLayer {
//!         app_id: Some("YOUR_APP_ID".into()),
//!         area_code: Some("13101".into()),
//!         stats_data: Some(vec![SeriesSpec::new("0000020201").category("A1101")]),
//!         ..Default::default()
//!     })
//!     .build()?;
//! let req = request::request_for(&settings, &settings.series()[0])?;
//! let envelope = Client::new()?.fetch(&req)?;
//! println!("{} observations", envelope.observation_count());
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::error::{EstatError, Result};
use crate::models::ApiEnvelope;
use crate::request::StatsRequest;
use log::{debug, info, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Anything that can turn a request descriptor into a validated envelope.
///
/// [`Client`] is the network implementation; the pipeline only depends on this.
pub trait Fetch {
    fn fetch(&self, request: &StatsRequest) -> Result<ApiEnvelope>;
}

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Client with transport defaults (no overall timeout).
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Client with an optional request timeout. When set it bounds both the
    /// connect phase and the whole request; otherwise transport defaults apply.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = HttpClient::builder()
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("estat_rs/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout {
            builder = builder.connect_timeout(t).timeout(t);
        }
        let http = builder.build().map_err(|e| EstatError::Transport {
            message: format!("build http client: {e}"),
            status: None,
            body: None,
        })?;
        Ok(Self { http })
    }

    /// Perform the GET, decode the envelope and check its status.
    pub fn fetch(&self, request: &StatsRequest) -> Result<ApiEnvelope> {
        info!("GET {}", request.display_url());
        debug!(
            "statsDataId={} cdArea={} cdCat01={:?} cdTimeFrom={:?}",
            request.statistics_id(),
            request.param("cdArea").unwrap_or_default(),
            request.param("cdCat01").unwrap_or_default(),
            request.param("cdTimeFrom").unwrap_or_default(),
        );

        let resp = self
            .http
            .get(&request.url)
            .query(&request.params)
            .send()
            .map_err(|e| {
                warn!("transport error for {}: {}", request.statistics_id(), e);
                EstatError::Transport {
                    message: e.to_string(),
                    status: e.status().map(|s| s.as_u16()),
                    body: None,
                }
            })?;

        let status = resp.status();
        let body = resp.text().map_err(|e| EstatError::Transport {
            message: format!("read response body: {e}"),
            status: Some(status.as_u16()),
            body: None,
        })?;

        if !status.is_success() {
            warn!("HTTP {} for {}", status, request.statistics_id());
            return Err(EstatError::Transport {
                message: format!("request failed with HTTP {status}"),
                status: Some(status.as_u16()),
                body: Some(body),
            });
        }

        let envelope = parse_envelope(&body)?;
        check_status(envelope).inspect_err(|e| warn!("{e}"))
    }
}

impl Fetch for Client {
    fn fetch(&self, request: &StatsRequest) -> Result<ApiEnvelope> {
        Client::fetch(self, request)
    }
}

/// Decode a response body into an [`ApiEnvelope`] without judging its status.
pub fn parse_envelope(body: &str) -> Result<ApiEnvelope> {
    serde_json::from_str(body).map_err(|source| EstatError::Decode {
        source,
        body: body.to_string(),
    })
}

/// Fail with [`EstatError::ApiStatus`] iff `RESULT.STATUS` is non-zero.
///
/// A zero status passes even if the dataset or other fields are missing.
pub fn check_status(envelope: ApiEnvelope) -> Result<ApiEnvelope> {
    let result = envelope.status();
    if result.code != 0 {
        return Err(EstatError::ApiStatus {
            code: result.code,
            message: result.message.clone().unwrap_or_default(),
        });
    }
    Ok(envelope)
}
