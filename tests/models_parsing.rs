mod common;

use common::*;
use estat_rs::api::{check_status, parse_envelope};
use estat_rs::{ApiEnvelope, EstatError};

#[test]
fn parse_full_response() {
    let env = envelope(&full_body());
    assert_eq!(env.status().code, 0);

    let table = env.table_info().unwrap();
    assert_eq!(table.id, "0000020201");
    assert_eq!(
        table.statistics_name(),
        Some("Statistical Observations of Municipalities")
    );
    assert_eq!(table.title(), Some("A Population and households"));
    assert_eq!(table.main_category(), Some("Other"));
    assert_eq!(table.tabulation_category(), Some("Municipal data"));

    let ids: Vec<&str> = env.classifications().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["cat01", "area", "time"]);
    // cat01 had a lone CLASS object
    assert_eq!(env.classifications()[0].entries().len(), 1);
    assert_eq!(env.classifications()[2].entries().len(), 3);

    assert_eq!(env.observation_count(), 3);
    let first = &env.observations().unwrap().as_slice()[0];
    assert_eq!(first.time, "2010100000");
    assert_eq!(first.code("cat01"), Some("A1101"));
    assert_eq!(first.code("area"), Some("13101"));
    assert_eq!(first.code("time"), Some("2010100000"));
    assert_eq!(first.unit.as_deref(), Some("person"));
    assert_eq!(first.numeric_value(), Some(47_115.0));

    let meta = env.result_meta().unwrap();
    assert_eq!((meta.total, meta.from, meta.to), (Some(3), Some(1), Some(3)));
}

#[test]
fn raw_capture_reserializes_without_loss() {
    let body = full_body();
    let original: serde_json::Value = serde_json::from_str(&body).unwrap();
    let env: ApiEnvelope = serde_json::from_str(&body).unwrap();
    let back = serde_json::to_value(&env).unwrap();
    assert_eq!(back, original);
}

#[test]
fn single_class_obj_and_single_value_are_accepted() {
    let body = ok_body(
        TIME_AXIS,
        r#"{"@time": "2020100000", "$": "-"}"#,
        1,
    );
    let env = envelope(&body);
    assert_eq!(env.classifications().len(), 1);
    assert_eq!(env.classifications()[0].id, "time");
    let obs = env.observations().unwrap();
    assert_eq!(obs.len(), 1);
    // suppressed cell marker is kept verbatim, but is not a number
    assert_eq!(obs.as_slice()[0].value, "-");
    assert_eq!(obs.as_slice()[0].numeric_value(), None);
    assert_eq!(obs.as_slice()[0].code("cat01"), None);
}

#[test]
fn status_and_counters_accept_strings() {
    let body = r#"{"GET_STATS_DATA": {
        "RESULT": {"STATUS": "0"},
        "STATISTICAL_DATA": {"RESULT_INF": {"TOTAL_NUMBER": "12", "FROM_NUMBER": "1", "TO_NUMBER": "12"}}
    }}"#;
    let env = parse_envelope(body).unwrap();
    assert_eq!(env.status().code, 0);
    assert_eq!(env.result_meta().unwrap().total, Some(12));
}

#[test]
fn status_error_iff_nonzero_code() {
    let ok = parse_envelope(r#"{"GET_STATS_DATA": {"RESULT": {"STATUS": 0}}}"#).unwrap();
    // zero passes even with no dataset at all
    let ok = check_status(ok).unwrap();
    assert!(ok.dataset().is_none());
    assert_eq!(ok.observation_count(), 0);

    let bad = parse_envelope(&error_body(100, "The application ID is not specified.")).unwrap();
    match check_status(bad) {
        Err(EstatError::ApiStatus { code, message }) => {
            assert_eq!(code, 100);
            assert_eq!(message, "The application ID is not specified.");
        }
        other => panic!("expected ApiStatus, got {other:?}"),
    }
}

#[test]
fn non_envelope_body_is_a_decode_error() {
    let err = parse_envelope("<html>maintenance</html>").unwrap_err();
    assert!(matches!(err, EstatError::Decode { .. }));
    assert_eq!(err.response_body(), Some("<html>maintenance</html>"));
}

#[test]
fn negative_status_is_an_api_error() {
    let env = parse_envelope(&error_body(-1, "internal error")).unwrap();
    assert_eq!(env.status().code, -1);
    match check_status(env) {
        Err(EstatError::ApiStatus { code, message }) => {
            assert_eq!(code, -1);
            assert_eq!(message, "internal error");
        }
        other => panic!("expected ApiStatus, got {other:?}"),
    }

    let as_string = parse_envelope(r#"{"GET_STATS_DATA": {"RESULT": {"STATUS": "-1"}}}"#);
    assert!(matches!(
        as_string.and_then(check_status),
        Err(EstatError::ApiStatus { code: -1, .. })
    ));
}
