#![allow(dead_code)]

use estat_rs::ApiEnvelope;

pub const CAT_AXIS: &str = r#"{
  "@id": "cat01",
  "@name": "A Population and households",
  "CLASS": {"@code": "A1101", "@name": "A1101_Total population", "@level": "1", "@unit": "person"}
}"#;

pub const AREA_AXIS: &str = r#"{
  "@id": "area",
  "@name": "Area",
  "CLASS": {"@code": "13101", "@name": "Tokyo Chiyoda-ku", "@level": "2", "@parentCode": "13000"}
}"#;

pub const TIME_AXIS: &str = r#"{
  "@id": "time",
  "@name": "Fiscal year",
  "CLASS": [
    {"@code": "2000100000", "@name": "2000", "@level": "1"},
    {"@code": "2010100000", "@name": "2010", "@level": "1"},
    {"@code": "2020100000", "@name": "2020", "@level": "1"}
  ]
}"#;

pub const VALUES_2000_2010_2020: &str = r#"[
  {"@tab": "00001", "@cat01": "A1101", "@area": "13101", "@time": "2010100000", "@unit": "person", "$": "47115"},
  {"@tab": "00001", "@cat01": "A1101", "@area": "13101", "@time": "2020100000", "@unit": "person", "$": "66680"},
  {"@tab": "00001", "@cat01": "A1101", "@area": "13101", "@time": "2000100000", "@unit": "person", "$": "36035"}
]"#;

/// A successful `getStatsData` body with the given `CLASS_OBJ` and `VALUE` nodes.
pub fn ok_body(class_obj: &str, values: &str, total: usize) -> String {
    format!(
        r#"{{
  "GET_STATS_DATA": {{
    "RESULT": {{"STATUS": 0, "ERROR_MSG": "Completed successfully.", "DATE": "2024-05-01T10:00:00.000+09:00"}},
    "PARAMETER": {{"LANG": "E", "STATS_DATA_ID": "0000020201", "DATA_FORMAT": "J"}},
    "STATISTICAL_DATA": {{
      "RESULT_INF": {{"TOTAL_NUMBER": {total}, "FROM_NUMBER": 1, "TO_NUMBER": {total}}},
      "TABLE_INF": {{
        "@id": "0000020201",
        "STAT_NAME": {{"@code": "00200502", "$": "System of Social and Demographic Statistics"}},
        "STATISTICS_NAME": "Statistical Observations of Municipalities",
        "TITLE": {{"@no": "0000020201", "$": "A Population and households"}},
        "MAIN_CATEGORY": {{"@code": "99", "$": "Other"}},
        "SUB_CATEGORY": {{"@code": "99", "$": "Other"}},
        "STATISTICS_NAME_SPEC": {{"TABULATION_CATEGORY": "Municipal data"}}
      }},
      "CLASS_INF": {{"CLASS_OBJ": {class_obj}}},
      "DATA_INF": {{"NOTE": {{"@char": "***", "$": "not available"}}, "VALUE": {values}}}
    }}
  }}
}}"#
    )
}

/// Standard three-axis body with observations at 2000, 2010 and 2020.
pub fn full_body() -> String {
    ok_body(
        &format!("[{CAT_AXIS}, {AREA_AXIS}, {TIME_AXIS}]"),
        VALUES_2000_2010_2020,
        3,
    )
}

pub fn error_body(status: i64, message: &str) -> String {
    format!(
        r#"{{"GET_STATS_DATA": {{"RESULT": {{"STATUS": {status}, "ERROR_MSG": "{message}", "DATE": "2024-05-01T10:00:00.000+09:00"}}, "PARAMETER": {{"LANG": "E"}}}}}}"#
    )
}

pub fn envelope(body: &str) -> ApiEnvelope {
    serde_json::from_str(body).unwrap()
}
