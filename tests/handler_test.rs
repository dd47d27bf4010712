//! Tests for request orchestration and the byte-level ingress contract.

mod common;

use std::sync::Arc;

use labscore::{
    HealthReport, LabInfo, ModelInfo, ModelState, RequestHandler, ResponseEnvelope,
    ResponseFormatter, ScoreError, Status,
};
use serde_json::json;

use common::{seeded_model, tiny_handler};

#[test]
fn score_scenario_end_to_end() {
    let handler = tiny_handler();
    let reply = handler.handle(br#"{"data":[{"feature_0":1.0}]}"#);
    assert_eq!(reply.status, 200);
    assert!(reply.is_success());

    let envelope: ResponseEnvelope = reply.decode().unwrap();
    assert_eq!(envelope.status, Status::Success);
    assert_eq!(envelope.count, 1);
    assert_eq!(envelope.predictions[0].predicted_class(), Some("up"));
    assert_eq!(envelope.predictions[0].confidence(), Some(0.5));
}

#[test]
fn bare_integer_is_a_400_error_envelope() {
    let handler = tiny_handler();
    let reply = handler.handle(b"42");
    assert_eq!(reply.status, 400);
    assert!(!reply.is_success());

    let envelope: ResponseEnvelope = reply.decode().unwrap();
    assert_eq!(envelope.status, Status::Error);
    assert_eq!(envelope.count, 0);
    assert!(envelope.message.unwrap().contains("number"));
}

#[test]
fn undecodable_body_is_a_400_error_envelope() {
    let handler = tiny_handler();
    let reply = handler.handle(b"{\"data\": [");
    assert_eq!(reply.status, 400);

    let envelope: ResponseEnvelope = reply.decode().unwrap();
    assert_eq!(envelope.status, Status::Error);
    assert!(envelope.message.unwrap().starts_with("JSON error"));
}

#[test]
fn partial_failures_stay_successful() {
    let handler = tiny_handler();
    let reply = handler.handle(br#"[{"feature_0": 2.0}, "oops", {"feature_0": "x"}]"#);
    assert_eq!(reply.status, 200);

    let envelope: ResponseEnvelope = reply.decode().unwrap();
    assert_eq!(envelope.status, Status::Success);
    assert_eq!(envelope.count, 3);
    assert_eq!(envelope.failed_items(), 2);
    assert!(envelope.predictions[0].is_success());
}

#[test]
fn out_of_range_number_fails_only_its_item() {
    let handler = tiny_handler();
    let reply = handler.handle(br#"{"data": [{"feature_0": 1.0}, {"feature_0": 1e400}]}"#);
    assert_eq!(reply.status, 200);

    let envelope: ResponseEnvelope = reply.decode().unwrap();
    assert_eq!(envelope.status, Status::Success);
    assert_eq!(envelope.count, 2);
    assert_eq!(envelope.failed_items(), 1);
    assert_eq!(envelope.predictions[0].predicted_class(), Some("up"));

    let error = envelope.predictions[1].error().unwrap();
    assert!(error.contains("feature_0"), "{error}");
    assert!(error.contains("out of range"), "{error}");
}

#[test]
fn single_mapping_request() {
    let handler = tiny_handler();
    let reply = handler.handle(br#"{"feature_0": -3.0}"#);
    let envelope: ResponseEnvelope = reply.decode().unwrap();
    assert_eq!(envelope.count, 1);
    assert_eq!(envelope.predictions[0].predicted_class(), Some("down"));
}

#[test]
fn all_missing_features_score_to_bias() {
    let model = seeded_model(5);
    let bias = model.params().unwrap().bias.to_vec();
    let handler = RequestHandler::new(Arc::new(model));

    let envelope = handler.score(json!({"data": [{}]})).unwrap();
    assert_eq!(envelope.predictions[0].scores(), Some(bias.as_slice()));
}

#[test]
fn score_propagates_shape_errors() {
    let handler = tiny_handler();
    let err = handler.score(json!(null)).unwrap_err();
    assert!(matches!(err, ScoreError::InvalidInputShape { .. }));
}

#[test]
fn unloaded_model_is_a_503() {
    let handler = RequestHandler::new(Arc::new(ModelState::default()));
    let reply = handler.handle(br#"{"feature_0": 1.0}"#);
    assert_eq!(reply.status, 503);

    let envelope: ResponseEnvelope = reply.decode().unwrap();
    assert_eq!(envelope.status, Status::Error);
    assert!(envelope.message.unwrap().contains("not loaded"));
}

#[test]
fn custom_lab_info_reaches_the_wire() {
    let lab = LabInfo {
        source: "Bench".into(),
        workflow: "none".into(),
        purpose: "tests".into(),
    };
    let handler = RequestHandler::with_formatter(
        Arc::clone(tiny_handler().predictor()),
        ResponseFormatter::new(lab.clone()),
    );
    let envelope: ResponseEnvelope = handler.handle(b"[]").decode().unwrap();
    assert_eq!(envelope.lab_info, lab);
    assert_eq!(envelope.count, 0);
}

#[test]
fn encode_failure_is_still_an_envelope() {
    struct Unencodable;

    impl serde::Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot encode"))
        }
    }

    let handler = tiny_handler();
    let reply = handler.reply(200, &Unencodable);
    assert_eq!(reply.status, 500);

    let envelope: ResponseEnvelope = reply.decode().unwrap();
    assert_eq!(envelope.status, Status::Error);
    assert_eq!(envelope.count, 0);
    assert!(envelope.predictions.is_empty());
    assert_eq!(envelope.lab_info, LabInfo::default());
    assert!(!envelope.timestamp.is_empty());
    assert!(envelope.message.unwrap().contains("encode"));
}

// ============================================================================
// Probes
// ============================================================================

#[test]
fn health_probe_reports_identity() {
    let handler = tiny_handler();
    let reply = handler.health();
    assert_eq!(reply.status, 200);

    let health: HealthReport = reply.decode().unwrap();
    assert_eq!(health.status, "ok");
    assert!(health.model_loaded);
    assert_eq!(health.model_name, "tiny");
    assert_eq!(health.model_version, "0.1.0");
    assert!(health.version.starts_with(labscore::PKG_VERSION));
}

#[test]
fn health_probe_answers_when_unloaded() {
    let handler = RequestHandler::new(Arc::new(ModelState::default()));
    let reply = handler.health();
    assert_eq!(reply.status, 200);

    let health: HealthReport = reply.decode().unwrap();
    assert!(!health.model_loaded);
}

#[test]
fn info_probe() {
    let handler = tiny_handler();
    let reply = handler.info();
    assert_eq!(reply.status, 200);

    let info: ModelInfo = reply.decode().unwrap();
    assert!(info.is_loaded);
    assert_eq!(info.features_count, Some(1));
    assert_eq!(info.classes, Some(vec!["up".to_string(), "down".to_string()]));

    let raw: serde_json::Value = reply.decode().unwrap();
    assert!(raw.get("description").is_some());
}

#[test]
fn info_probe_nulls_when_unloaded() {
    let handler = RequestHandler::new(Arc::new(ModelState::default()));
    let raw: serde_json::Value = handler.info().decode().unwrap();
    assert_eq!(raw["is_loaded"], false);
    assert!(raw["features_count"].is_null());
    assert!(raw["classes"].is_null());
}

#[test]
fn handler_is_shareable_across_threads() {
    let handler = Arc::new(tiny_handler());
    let threads: Vec<_> = (0..4)
        .map(|i| {
            let handler = Arc::clone(&handler);
            std::thread::spawn(move || {
                let body = format!(r#"{{"feature_0": {i}}}"#);
                handler.handle(body.as_bytes()).status
            })
        })
        .collect();
    for t in threads {
        assert_eq!(t.join().unwrap(), 200);
    }
}
