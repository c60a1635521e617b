//! Tests for error classification and the caller-facing error report.

use tracing::Level;
use vedrfolnir::response::{SUCCESS_MESSAGE, UNKNOWN_ERROR_MESSAGE};
use vedrfolnir::{Condition, ErrorReport, ServerResponse, VedrfolnirError, Weather};

fn upstream_failure(attempts: u32) -> VedrfolnirError {
    VedrfolnirError::UpstreamFailure {
        method: "GET".into(),
        path: "/data/2.5/weather".into(),
        attempts,
    }
}

#[test]
fn domain_error_messages() {
    assert_eq!(VedrfolnirError::BadRequest.to_string(), "bad request");
    assert_eq!(VedrfolnirError::Unauthorized.to_string(), "unauthorized");
    assert_eq!(
        VedrfolnirError::NotFound {
            query: "q=Atlantis".into()
        }
        .to_string(),
        "not found. query: q=Atlantis"
    );
    assert_eq!(
        upstream_failure(5).to_string(),
        "failed GET /data/2.5/weather. retry:5"
    );
}

#[test]
fn status_codes() {
    assert_eq!(VedrfolnirError::BadRequest.status_code(), 400);
    assert_eq!(VedrfolnirError::Unauthorized.status_code(), 401);
    assert_eq!(
        VedrfolnirError::NotFound { query: String::new() }.status_code(),
        404
    );
    assert_eq!(upstream_failure(5).status_code(), 502);
    assert_eq!(upstream_failure(0).status_code(), 502);
    assert_eq!(VedrfolnirError::Cache("down".into()).status_code(), 500);
    assert_eq!(VedrfolnirError::Decode("eof".into()).status_code(), 500);
}

#[test]
fn severity_splits_at_500() {
    assert_eq!(VedrfolnirError::BadRequest.severity(), Level::INFO);
    assert_eq!(VedrfolnirError::Unauthorized.severity(), Level::INFO);
    assert_eq!(upstream_failure(5).severity(), Level::ERROR);
    assert_eq!(VedrfolnirError::Cache("down".into()).severity(), Level::ERROR);
}

#[test]
fn report_keeps_domain_messages() {
    let report = ErrorReport::from_error(&VedrfolnirError::NotFound {
        query: "q=Atlantis".into(),
    });
    assert_eq!(report.status, 404);
    assert_eq!(report.body.message, "not found. query: q=Atlantis");
    assert!(report.body.payload.is_none());

    let report = ErrorReport::from(&upstream_failure(5));
    assert_eq!(report.status, 502);
    assert_eq!(report.body.message, "failed GET /data/2.5/weather. retry:5");
}

#[test]
fn report_hides_internal_detail() {
    let err = VedrfolnirError::Cache("NOAUTH Authentication required, host 10.0.0.5".into());
    let report = ErrorReport::from_error(&err);

    assert_eq!(report.status, 500);
    assert_eq!(report.body.message, UNKNOWN_ERROR_MESSAGE);
}

#[test]
fn success_envelope_shape() {
    let weather = Weather::new("Seoul").with_condition(Condition::new("Clear", "clear sky"));
    let json = serde_json::to_value(ServerResponse::success(vec![weather])).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "message": SUCCESS_MESSAGE,
            "payload": [{
                "city": "Seoul",
                "conditions": [{ "condition": "Clear", "description": "clear sky" }]
            }]
        })
    );
}

#[test]
fn error_envelope_has_null_payload() {
    let report = ErrorReport::from_error(&VedrfolnirError::BadRequest);
    let json = serde_json::to_value(&report.body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "message": "bad request", "payload": null })
    );
}
