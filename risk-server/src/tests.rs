//! Router tests - full request path with a fixed-output classifier

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use dropout_core::logic::features::layout::{layout_hash, FEATURE_VERSION};
use dropout_core::{
    Advisor, Classifier, EncodedFeatureVector, InferenceError, ModelMetadata, CLASS_COUNT,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{build_state, config::Config, create_router, AppState, StartupError};

/// Returns the same answer for every row; counts calls
struct StaticClassifier {
    label: i64,
    probabilities: [f32; CLASS_COUNT],
    calls: AtomicUsize,
    metadata: ModelMetadata,
}

impl StaticClassifier {
    fn new(label: i64, probabilities: [f32; CLASS_COUNT]) -> Self {
        Self {
            label,
            probabilities,
            calls: AtomicUsize::new(0),
            metadata: ModelMetadata {
                model_path: "models/static.onnx".to_string(),
                input_name: "float_input".to_string(),
                label_output: "label".to_string(),
                probability_output: "probabilities".to_string(),
                loaded_at: chrono::Utc::now(),
            },
        }
    }
}

impl Classifier for StaticClassifier {
    fn name(&self) -> &str {
        "static-test-model"
    }

    fn predict(&self, row: &EncodedFeatureVector) -> Result<i64, InferenceError> {
        assert_eq!(row.as_slice().len(), 17);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label)
    }

    fn predict_proba(&self, _row: &EncodedFeatureVector) -> Result<[f32; CLASS_COUNT], InferenceError> {
        Ok(self.probabilities)
    }

    fn metadata(&self) -> Option<&ModelMetadata> {
        Some(&self.metadata)
    }

    fn inference_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst) as u64
    }
}

fn app_with(classifier: Arc<StaticClassifier>) -> Router {
    create_router(AppState {
        classifier,
        advisor: Arc::new(Advisor::Disabled),
    })
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    raw_request(uri, "application/json", body.to_string())
}

fn form_request(body: &str) -> Request<Body> {
    raw_request("/predict", "application/x-www-form-urlencoded", body.to_string())
}

fn raw_request(uri: &str, content_type: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_index_renders_form() {
    let app = app_with(Arc::new(StaticClassifier::new(0, [0.8, 0.15, 0.05])));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Student Information"));
    assert!(html.contains(r#"name="g3""#));
}

#[tokio::test]
async fn test_api_predict_high_risk() {
    let classifier = Arc::new(StaticClassifier::new(2, [0.1, 0.25, 0.65]));
    let app = app_with(classifier.clone());

    let response = app
        .oneshot(json_request("/api/v1/predict", json!({"age": 18, "failures": 3})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();

    assert_eq!(body["risk"], "High Risk");
    assert_eq!(body["class_index"], 2);
    assert_eq!(body["severity"], "error");
    assert_eq!(body["confidence"], 65.0);
    assert_eq!(body["probabilities"][0]["risk"], "Low Risk");
    assert_eq!(body["probabilities"][2]["risk"], "High Risk");
    assert_eq!(body["recommendations_enabled"], false);
    assert!(body["recommendation"].is_null());

    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_api_rejects_out_of_range() {
    let classifier = Arc::new(StaticClassifier::new(0, [0.9, 0.05, 0.05]));
    let app = app_with(classifier.clone());

    let response = app
        .oneshot(json_request("/api/v1/predict", json!({"age": 40})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Out of range: age");
    assert_eq!(body["status"], 400);

    // rejected before reaching the model
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_class_is_server_error() {
    let app = app_with(Arc::new(StaticClassifier::new(4, [0.3, 0.3, 0.4])));

    let response = app
        .oneshot(json_request("/api/v1/predict", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_form_submit_renders_result() {
    let app = app_with(Arc::new(StaticClassifier::new(1, [0.3, 0.55, 0.15])));

    let form = "age=17&gender=Female&region=Rural&family_income=15000\
        &parental_education=Higher+Education&distance_from_school=5.0\
        &absences=5&failures=0&study_time_category=1&g1=10&g2=10&g3=10\
        &internet_access=Yes&family_support=No&school_support=Yes&activities=Yes";

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;

    assert!(html.contains("Prediction Result"));
    assert!(html.contains("alert-warning"));
    assert!(html.contains("⚠️ Medium Risk (55.0%)"));
    assert!(html.contains("Risk Probability"));
    assert!(html.contains("Gemini API key not found. AI recommendations disabled."));
    // submitted values survive the re-render
    assert!(html.contains(r#"<option value="Higher Education" selected>"#));
}

#[tokio::test]
async fn test_form_validation_error_is_html() {
    let app = app_with(Arc::new(StaticClassifier::new(0, [0.9, 0.05, 0.05])));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("g1=25"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_string(response).await;
    assert!(html.contains("400: Out of range: g1"));
}

#[tokio::test]
async fn test_schema_endpoint() {
    let app = app_with(Arc::new(StaticClassifier::new(0, [1.0, 0.0, 0.0])));

    let response = app
        .oneshot(Request::builder().uri("/api/v1/schema").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["feature_count"], 17);
    assert_eq!(body["feature_names"][9], "Gender_Male");
    assert_eq!(body["hash"], layout_hash());
}

#[tokio::test]
async fn test_health_reports_model_and_advisor() {
    let classifier = Arc::new(StaticClassifier::new(0, [1.0, 0.0, 0.0]));
    let app = app_with(classifier.clone());

    let response = app
        .clone()
        .oneshot(json_request("/api/v1/predict", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "static-test-model");
    assert_eq!(body["recommendations_enabled"], false);

    let info = &body["model_info"];
    assert_eq!(info["model_path"], "models/static.onnx");
    assert_eq!(info["input_name"], "float_input");
    assert_eq!(info["label_output"], "label");
    assert_eq!(info["probability_output"], "probabilities");
    assert!(info["loaded_at"].is_string());

    // one request, one forward pass
    assert_eq!(body["inference_count"], 1);
}

#[tokio::test]
async fn test_nan_distance_rejected_on_both_routes() {
    let classifier = Arc::new(StaticClassifier::new(0, [0.9, 0.05, 0.05]));
    let app = app_with(classifier.clone());

    let response = app
        .clone()
        .oneshot(form_request("distance_from_school=NaN"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("400: Out of range: distance_from_school"));

    // JSON has no NaN literal; a value past f32 range parses as infinity
    let response = app
        .oneshot(json_request("/api/v1/predict", json!({"distance_from_school": 1e300})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Out of range: distance_from_school");

    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_json_gets_error_body() {
    let app = app_with(Arc::new(StaticClassifier::new(0, [0.9, 0.05, 0.05])));

    let response = app
        .oneshot(json_request("/api/v1/predict", json!({"gender": "Other"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("gender"));
}

#[tokio::test]
async fn test_malformed_form_gets_error_page() {
    let app = app_with(Arc::new(StaticClassifier::new(0, [0.9, 0.05, 0.05])));

    let response = app.oneshot(form_request("age=300")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_string(response).await;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("alert-error"));
}

#[tokio::test]
async fn test_schema_checks_client_layout() {
    let app = app_with(Arc::new(StaticClassifier::new(0, [1.0, 0.0, 0.0])));
    let get = |uri: String| Request::builder().uri(uri).body(Body::empty()).unwrap();

    let response = app
        .clone()
        .oneshot(get(format!("/api/v1/schema?version={}&hash={}", FEATURE_VERSION, layout_hash())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(format!("/api/v1/schema?version={}&hash=1", FEATURE_VERSION)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Feature layout mismatch"));

    let response = app
        .oneshot(get("/api/v1/schema?version=1".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_missing_model_halts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        model_path: dir.path().join("xgboost_model.onnx").display().to_string(),
        ..Config::default()
    };

    let result = build_state(&config);
    let err = result.err().expect("startup must fail without a model");
    assert!(matches!(err, StartupError::ModelMissing(_)));
    assert!(err.to_string().ends_with("xgboost_model.onnx not found in project folder"));
}

#[test]
fn test_recommendations_flag_follows_api_key() {
    let mut config = Config::default();
    assert!(!config.recommendations_enabled());
    config.advisor.api_key = Some("k".to_string());
    assert!(config.recommendations_enabled());
    tokio_test::assert_ok!(Advisor::from_config(config.advisor.clone()));
}
