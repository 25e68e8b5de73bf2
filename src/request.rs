//! Maps a configured series onto the `getStatsData` parameter set.
//!
//! Nothing here talks to the network; the service itself is the judge of
//! whether an id or code exists.

use crate::config::{SeriesSpec, Settings};
use crate::error::{EstatError, Result};
use crate::models::StatsQuery;
use reqwest::Url;

/// Production endpoint root (JSON flavour of REST API 3.0).
pub const DEFAULT_BASE_URL: &str = "https://api.e-stat.go.jp/rest/3.0/app/json";

/// Fully-qualified request: endpoint plus ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

impl StatsRequest {
    /// Value of a query parameter by its wire name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn statistics_id(&self) -> &str {
        self.param("statsDataId").unwrap_or_default()
    }

    /// URL with query string, `appId` masked. Meant for logs only.
    pub fn display_url(&self) -> String {
        let params = self.params.iter().map(|(k, v)| {
            let v = if *k == "appId" { "***" } else { v.as_str() };
            (*k, v)
        });
        match Url::parse_with_params(&self.url, params) {
            Ok(u) => u.to_string(),
            Err(_) => self.url.clone(),
        }
    }
}

fn non_empty(opt: Option<&str>) -> Option<String> {
    opt.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn require(value: &str, what: &str) -> Result<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(EstatError::Config(format!("{what} must not be empty")));
    }
    Ok(v.to_string())
}

/// Combine shared settings with one series override into a [`StatsQuery`].
pub fn build_query(settings: &Settings, series: &SeriesSpec) -> Result<StatsQuery> {
    Ok(StatsQuery {
        statistics_id: require(&series.statistics_id, "statistics id")?,
        area_code: require(settings.area_code(), "area code")?,
        category_code: non_empty(series.category_code.as_deref()),
        time_from: non_empty(series.time_from.as_deref()),
        meta_flag: settings.meta_flag(),
        count_flag: settings.count_flag(),
        lang: settings.lang(),
    })
}

/// Turn a query into the request descriptor for `{base_url}/getStatsData`.
///
/// Parameter order is fixed: appId, statsDataId, cdArea, metaGetFlg,
/// cntGetFlg, lang, cdCat01, cdTimeFrom. The two optional filters are sent as
/// empty strings when unset, which the service reads as "no filter".
pub fn build_request(app_id: &str, base_url: &str, query: &StatsQuery) -> Result<StatsRequest> {
    let app_id = require(app_id, "app id")?;
    let statistics_id = require(&query.statistics_id, "statistics id")?;
    let area_code = require(&query.area_code, "area code")?;

    let params = vec![
        ("appId", app_id),
        ("statsDataId", statistics_id),
        ("cdArea", area_code),
        ("metaGetFlg", query.meta_flag.as_param().to_string()),
        ("cntGetFlg", query.count_flag.as_param().to_string()),
        ("lang", query.lang.as_param().to_string()),
        ("cdCat01", query.category_code.clone().unwrap_or_default()),
        ("cdTimeFrom", query.time_from.clone().unwrap_or_default()),
    ];

    Ok(StatsRequest {
        url: format!("{}/getStatsData", base_url.trim_end_matches('/')),
        params,
    })
}

/// Shorthand for [`build_query`] followed by [`build_request`].
pub fn request_for(settings: &Settings, series: &SeriesSpec) -> Result<StatsRequest> {
    let query = build_query(settings, series)?;
    build_request(settings.app_id(), settings.base_url(), &query)
}
