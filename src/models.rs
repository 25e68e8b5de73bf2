use crate::schema::{
    OneOrMany, TextNode, de_i64_from_string_or_number, de_opt_u64_from_string_or_number,
    de_string_from_string_or_number,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// `Y`/`N` switch used by several request parameters. Spelled the same,
/// upper case, in the config file and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Flag {
    #[value(name = "Y")]
    Y,
    #[value(name = "N")]
    N,
}

impl Flag {
    pub fn as_param(&self) -> &'static str {
        match self {
            Flag::Y => "Y",
            Flag::N => "N",
        }
    }
}

/// Response language: `J` (Japanese) or `E` (English).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Lang {
    #[value(name = "J")]
    J,
    #[value(name = "E")]
    E,
}

impl Lang {
    pub fn as_param(&self) -> &'static str {
        match self {
            Lang::J => "J",
            Lang::E => "E",
        }
    }
}

/// One logical `getStatsData` query. Built once per configured series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsQuery {
    pub statistics_id: String,
    pub area_code: String,
    pub category_code: Option<String>,
    pub time_from: Option<String>,
    pub meta_flag: Flag,
    pub count_flag: Flag,
    pub lang: Lang,
}

/// Top-level `getStatsData` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(rename = "GET_STATS_DATA")]
    pub body: StatsDataBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDataBody {
    #[serde(rename = "RESULT")]
    pub result: ResultStatus,
    #[serde(rename = "PARAMETER", default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Value>,
    #[serde(
        rename = "STATISTICAL_DATA",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<StatisticalDataset>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `RESULT` block. `code == 0` means success; anything else, negative
/// included, is a service-reported failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultStatus {
    #[serde(rename = "STATUS", deserialize_with = "de_i64_from_string_or_number")]
    pub code: i64,
    #[serde(rename = "ERROR_MSG", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "DATE", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalDataset {
    #[serde(rename = "RESULT_INF", default, skip_serializing_if = "Option::is_none")]
    pub result_meta: Option<ResultMeta>,
    #[serde(rename = "TABLE_INF", default, skip_serializing_if = "Option::is_none")]
    pub table_info: Option<TableInfo>,
    #[serde(rename = "CLASS_INF", default, skip_serializing_if = "Option::is_none")]
    pub class_inf: Option<ClassInf>,
    #[serde(rename = "DATA_INF", default, skip_serializing_if = "Option::is_none")]
    pub data_inf: Option<DataInf>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result-count metadata (`RESULT_INF`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMeta {
    #[serde(
        rename = "TOTAL_NUMBER",
        default,
        deserialize_with = "de_opt_u64_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<u64>,
    #[serde(
        rename = "FROM_NUMBER",
        default,
        deserialize_with = "de_opt_u64_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub from: Option<u64>,
    #[serde(
        rename = "TO_NUMBER",
        default,
        deserialize_with = "de_opt_u64_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub to: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "STAT_NAME", default, skip_serializing_if = "Option::is_none")]
    pub stat_name: Option<TextNode>,
    #[serde(
        rename = "STATISTICS_NAME",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub statistics_name: Option<TextNode>,
    #[serde(rename = "TITLE", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TextNode>,
    #[serde(rename = "MAIN_CATEGORY", default, skip_serializing_if = "Option::is_none")]
    pub main_category: Option<TextNode>,
    #[serde(rename = "SUB_CATEGORY", default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<TextNode>,
    #[serde(
        rename = "STATISTICS_NAME_SPEC",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name_spec: Option<StatisticsNameSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableInfo {
    pub fn statistics_name(&self) -> Option<&str> {
        self.statistics_name.as_ref().map(TextNode::text)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().map(TextNode::text)
    }

    pub fn main_category(&self) -> Option<&str> {
        self.main_category.as_ref().map(TextNode::text)
    }

    pub fn sub_category(&self) -> Option<&str> {
        self.sub_category.as_ref().map(TextNode::text)
    }

    pub fn tabulation_category(&self) -> Option<&str> {
        self.name_spec
            .as_ref()
            .and_then(|s| s.tabulation_category.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsNameSpec {
    #[serde(
        rename = "TABULATION_CATEGORY",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tabulation_category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `CLASS_INF`: the classification axes of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInf {
    #[serde(rename = "CLASS_OBJ", default)]
    pub axes: OneOrMany<ClassAxis>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One classification axis (`cat01`, `area`, `time`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAxis {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "CLASS", default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<OneOrMany<ClassEntry>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClassAxis {
    /// Coded entries; empty when the axis carried no `CLASS` element.
    pub fn entries(&self) -> &[ClassEntry] {
        self.entries.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEntry {
    #[serde(rename = "@code", default)]
    pub code: String,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@level", default)]
    pub level: String,
    #[serde(rename = "@unit", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "@parentCode", default, skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `DATA_INF`: notes plus the observation values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataInf {
    #[serde(rename = "VALUE", default, skip_serializing_if = "Option::is_none")]
    pub values: Option<OneOrMany<Observation>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One data point. Axis codes other than time (`@tab`, `@cat01`, `@area`,
/// ...) stay in `codes` keyed by their attribute name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "@time", default)]
    pub time: String,
    #[serde(rename = "@unit", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Raw cell text. Usually numeric, but the service uses markers such as
    /// `-` or `***` for suppressed or missing cells.
    #[serde(rename = "$", default, deserialize_with = "de_string_from_string_or_number")]
    pub value: String,
    #[serde(flatten)]
    pub codes: BTreeMap<String, Value>,
}

impl Observation {
    /// Code this observation carries for axis `axis_id`.
    pub fn code(&self, axis_id: &str) -> Option<&str> {
        if axis_id == "time" {
            return Some(self.time.as_str());
        }
        self.codes
            .get(&format!("@{axis_id}"))
            .and_then(Value::as_str)
    }

    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Numeric ordering key of the time code; `None` sorts below every number.
    pub fn time_key(&self) -> Option<u64> {
        self.time.trim().parse::<u64>().ok()
    }
}

impl ApiEnvelope {
    pub fn status(&self) -> &ResultStatus {
        &self.body.result
    }

    pub fn dataset(&self) -> Option<&StatisticalDataset> {
        self.body.data.as_ref()
    }

    pub fn table_info(&self) -> Option<&TableInfo> {
        self.dataset().and_then(|d| d.table_info.as_ref())
    }

    /// All classification axes, in response order.
    pub fn classifications(&self) -> &[ClassAxis] {
        self.dataset()
            .and_then(|d| d.class_inf.as_ref())
            .map(|c| c.axes.as_slice())
            .unwrap_or(&[])
    }

    /// The observation node, if the response carried one.
    pub fn observations(&self) -> Option<&OneOrMany<Observation>> {
        self.dataset()
            .and_then(|d| d.data_inf.as_ref())
            .and_then(|d| d.values.as_ref())
    }

    pub fn observation_count(&self) -> usize {
        self.observations().map(OneOrMany::len).unwrap_or(0)
    }

    pub fn result_meta(&self) -> Option<&ResultMeta> {
        self.dataset().and_then(|d| d.result_meta.as_ref())
    }
}
