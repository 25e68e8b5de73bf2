//! Layered configuration: built-in defaults, then a JSON config file, then
//! command-line values. Each layer only overrides what it actually sets.
//! [`SettingsBuilder::build`] produces the immutable [`Settings`] the rest of
//! the crate works from.

use crate::error::EstatError;
use crate::models::{Flag, Lang};
use crate::request::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "estat.config.json";

/// Per-series override: which table to fetch and optional filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    #[serde(rename = "statsId", alias = "statisticsId")]
    pub statistics_id: String,
    #[serde(
        rename = "cdCat01",
        alias = "categoryCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category_code: Option<String>,
    #[serde(
        rename = "cdTimeFrom",
        alias = "timeFrom",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_from: Option<String>,
}

impl SeriesSpec {
    pub fn new(statistics_id: impl Into<String>) -> Self {
        Self {
            statistics_id: statistics_id.into(),
            category_code: None,
            time_from: None,
        }
    }

    pub fn category(mut self, code: impl Into<String>) -> Self {
        self.category_code = Some(code.into());
        self
    }

    pub fn time_from(mut self, time: impl Into<String>) -> Self {
        self.time_from = Some(time.into());
        self
    }
}

/// Split a comma- or semicolon-separated id list into series sharing the
/// same optional filters. Blank items are dropped.
pub fn series_from_id_list(
    ids: &str,
    category: Option<&str>,
    time_from: Option<&str>,
) -> Vec<SeriesSpec> {
    ids.split([',', ';'])
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| SeriesSpec {
            statistics_id: id.to_string(),
            category_code: category.map(str::to_string),
            time_from: time_from.map(str::to_string),
        })
        .collect()
}

/// One configuration layer. Every field is optional; unset fields fall
/// through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLayer {
    pub app_id: Option<String>,
    #[serde(alias = "municipalityId")]
    pub area_code: Option<String>,
    pub lang: Option<Lang>,
    pub meta_get_flg: Option<Flag>,
    pub cnt_get_flg: Option<Flag>,
    pub base_url: Option<String>,
    pub output: Option<PathBuf>,
    pub stats_data: Option<Vec<SeriesSpec>>,
}

impl ConfigLayer {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parse config JSON")
    }
}

/// Read the config file layer.
///
/// With an explicit path the file must exist. Without one, [`DEFAULT_CONFIG_FILE`]
/// in the current directory is used if present, otherwise an empty layer.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigLayer> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = std::env::current_dir()
                .context("resolve current directory")?
                .join(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(ConfigLayer::default());
            }
            default
        }
    };

    info!("loading config from {}", path.display());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    ConfigLayer::from_json_str(&text).with_context(|| format!("in {}", path.display()))
}

/// Resolved, read-only options for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    app_id: String,
    area_code: String,
    meta_flag: Flag,
    count_flag: Flag,
    lang: Lang,
    base_url: String,
    output_dir: PathBuf,
    series: Vec<SeriesSpec>,
}

impl Settings {
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn area_code(&self) -> &str {
        &self.area_code
    }

    pub fn meta_flag(&self) -> Flag {
        self.meta_flag
    }

    pub fn count_flag(&self) -> Flag {
        self.count_flag
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn series(&self) -> &[SeriesSpec] {
        &self.series
    }
}

/// Accumulates layers in order; later merges win.
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    acc: ConfigLayer,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `layer` on top of everything merged so far.
    pub fn merge(mut self, layer: ConfigLayer) -> Self {
        let acc = &mut self.acc;
        if layer.app_id.is_some() {
            acc.app_id = layer.app_id;
        }
        if layer.area_code.is_some() {
            acc.area_code = layer.area_code;
        }
        if layer.lang.is_some() {
            acc.lang = layer.lang;
        }
        if layer.meta_get_flg.is_some() {
            acc.meta_get_flg = layer.meta_get_flg;
        }
        if layer.cnt_get_flg.is_some() {
            acc.cnt_get_flg = layer.cnt_get_flg;
        }
        if layer.base_url.is_some() {
            acc.base_url = layer.base_url;
        }
        if layer.output.is_some() {
            acc.output = layer.output;
        }
        if layer.stats_data.is_some() {
            acc.stats_data = layer.stats_data;
        }
        self
    }

    /// Fill defaults and validate. Fails when app id, area code, or the
    /// series list is missing, before anything touches the network.
    pub fn build(self) -> std::result::Result<Settings, EstatError> {
        let acc = self.acc;
        let app_id = acc
            .app_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EstatError::Config("app id is required".into()))?;
        let area_code = acc
            .area_code
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EstatError::Config("area (municipality) code is required".into()))?;
        let series = acc.stats_data.unwrap_or_default();
        if series.is_empty() {
            return Err(EstatError::Config(format!(
                "no statistics configured; add a \"statsData\" list to {DEFAULT_CONFIG_FILE}"
            )));
        }

        Ok(Settings {
            app_id,
            area_code,
            meta_flag: acc.meta_get_flg.unwrap_or(Flag::Y),
            count_flag: acc.cnt_get_flg.unwrap_or(Flag::N),
            lang: acc.lang.unwrap_or(Lang::J),
            base_url: acc.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            output_dir: acc.output.unwrap_or_else(|| PathBuf::from("./output")),
            series,
        })
    }
}
