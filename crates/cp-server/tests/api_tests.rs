//! End-to-end API tests against the in-process axum app.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use cp_catalog::Catalog;
use cp_config::{AppConfig, ConfigManager};
use cp_encoder::FeatureSchema;
use cp_model::PriceModel;
use cp_server::{build_app, AppState};

const SAMPLE_CSV: &str = "\
Location,Brand,Model,Car Type,Color,Number of Owners,Fuel Type,Transmission Type,Previous Accidents,Service History,Insurance Type
Delhi,Toyota,Fortuner,SUV,White,1 owner,Diesel,Automatic,No,Yes,Comprehensive
Mumbai,Toyota,Corolla,Sedan,Silver,2 owner,Petrol,Manual,No,Yes,Third-Party
Delhi,Tata,Nexon,SUV,Blue,1 owner,Petrol,Manual,Yes,No,Comprehensive
Pune,Toyota,Fortuner,SUV,Grey,1 owner,Diesel,Automatic,No,Yes,Comprehensive
";

const SCHEMA_JSON: &str = r#"{
    "version": "test-1",
    "features": [
        {"kind": "numeric", "name": "Year"},
        {"kind": "numeric", "name": "Odometer Reading (km)"},
        {"kind": "numeric", "name": "Engine Capacity (L)"},
        {"kind": "one_hot", "group": "Brand", "category": "Tata"},
        {"kind": "one_hot", "group": "Brand", "category": "Toyota"},
        {"kind": "one_hot", "group": "Model", "category": "Corolla"},
        {"kind": "one_hot", "group": "Model", "category": "Fortuner"},
        {"kind": "one_hot", "group": "Model", "category": "Nexon"},
        {"kind": "one_hot", "group": "Transmission Type", "category": "Manual"},
        {"kind": "one_hot", "group": "Fuel Type", "category": "Diesel"}
    ],
    "baselines": {
        "Brand": ["Audi"],
        "Transmission Type": ["Automatic"],
        "Fuel Type": ["Electric", "Petrol"]
    }
}"#;

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Zero weights plus a constant bias make the expected price independent of
/// the input, which keeps the happy-path assertion exact.
fn write_model_fixture(dir: &Path) {
    let weight = [0.0f32; 10];
    let weight_bytes = f32_bytes(&weight);
    let bias_bytes = f32_bytes(&[500_000.0]);
    let views = vec![
        (
            "regressor.weight",
            safetensors::tensor::TensorView::new(
                safetensors::Dtype::F32,
                vec![1, weight.len()],
                &weight_bytes,
            )
            .unwrap(),
        ),
        (
            "regressor.bias",
            safetensors::tensor::TensorView::new(safetensors::Dtype::F32, vec![1], &bias_bytes)
                .unwrap(),
        ),
    ];
    let serialized = safetensors::serialize(views, &None).unwrap();
    std::fs::write(dir.join("model.safetensors"), serialized).unwrap();
    std::fs::write(
        dir.join("model.json"),
        r#"{"version": "test-1", "feature_count": 10, "target_transform": "none"}"#,
    )
    .unwrap();
}

fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    write_model_fixture(dir.path());

    let catalog = Catalog::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
    let schema = FeatureSchema::from_json(SCHEMA_JSON).unwrap();
    let model = PriceModel::load(dir.path()).unwrap();
    model.validate_schema(&schema).unwrap();

    let config_manager = ConfigManager::new(
        AppConfig::default(),
        PathBuf::from("unused-settings.yaml"),
    );

    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(schema),
        Arc::new(model),
        Arc::new(config_manager),
    );
    (dir, build_app(state, true))
}

async fn body_json(body: Body) -> serde_json::Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn full_payload() -> serde_json::Value {
    serde_json::json!({
        "location": "Delhi",
        "brand": "Toyota",
        "model": "Fortuner",
        "car_type": "SUV",
        "color": "White",
        "number_of_owners": "1 owner",
        "fuel_type": "Diesel",
        "transmission_type": "Automatic",
        "previous_accidents": "No",
        "service_history": "Yes",
        "insurance_type": "Comprehensive",
        "year": 2019,
        "odometer_km": 45000,
        "engine_capacity_l": 2.8
    })
}

fn post_predict(payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_form_page_renders_with_theme() {
    let (_guard, app) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains(r#"data-theme="light""#));
}

#[tokio::test]
async fn test_options_full_domain() {
    let (_guard, app) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/options")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response.into_body()).await;
    let brands = json["options"]["Brand"].as_array().unwrap();
    assert_eq!(brands.len(), 2);
    let locations = json["options"]["Location"].as_array().unwrap();
    assert_eq!(locations.len(), 3);
}

#[tokio::test]
async fn test_options_cascade_narrows_models() {
    let (_guard, app) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/options?brand=Tata")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response.into_body()).await;
    let models = json["options"]["Model"].as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0], "Nexon");
    // Location stays full-domain regardless of the cascade.
    assert_eq!(json["options"]["Location"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_options_drops_stale_model() {
    let (_guard, app) = test_app();

    // Model=Fortuner is stale once Brand=Tata; options must not be filtered
    // by it.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/options?brand=Tata&model=Fortuner")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_json(response.into_body()).await;
    let models = json["options"]["Model"].as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0], "Nexon");
}

#[tokio::test]
async fn test_predict_happy_path() {
    let (_guard, app) = test_app();

    let response = app.oneshot(post_predict(&full_payload())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["price"], 500_000.0);
    assert_eq!(json["currency"], "INR");
    assert!(json.get("warnings").is_none());
}

#[tokio::test]
async fn test_predict_odometer_below_range_is_400() {
    let (_guard, app) = test_app();

    let mut payload = full_payload();
    payload["odometer_km"] = serde_json::json!(4999);

    let response = app.oneshot(post_predict(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"]["type"], "invalid_request_error");
    assert_eq!(json["error"]["param"], "odometer_km");
}

#[tokio::test]
async fn test_predict_boundary_odometer_accepted() {
    let (_guard, app) = test_app();

    let mut payload = full_payload();
    payload["odometer_km"] = serde_json::json!(200_000);

    let response = app.oneshot(post_predict(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_predict_missing_model_is_422() {
    let (_guard, app) = test_app();

    let mut payload = full_payload();
    payload.as_object_mut().unwrap().remove("model");

    let response = app.oneshot(post_predict(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"]["type"], "incomplete_selection");
    assert!(json["error"]["message"].as_str().unwrap().contains("Model"));
}

#[tokio::test]
async fn test_predict_stale_cascade_is_sanitized_then_rejected() {
    let (_guard, app) = test_app();

    // Tata + Fortuner never co-occur; sanitize clears Model and the encode
    // step reports the hole instead of silently mis-encoding.
    let mut payload = full_payload();
    payload["brand"] = serde_json::json!("Tata");

    let response = app.oneshot(post_predict(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_predict_unknown_color_warns_but_succeeds() {
    let (_guard, app) = test_app();

    // A fuel the schema has no slot or baseline for must surface as a
    // warning while the estimate still goes through.
    let mut payload = full_payload();
    payload["fuel_type"] = serde_json::json!("CNG");

    let response = app.oneshot(post_predict(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response.into_body()).await;
    let warnings = json["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].as_str().unwrap().contains("Fuel Type=CNG"));
}

#[tokio::test]
async fn test_health_snapshot() {
    let (_guard, app) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["catalog_records"], 4);
    assert_eq!(json["model_version"], "test-1");
    assert_eq!(json["feature_count"], 10);
}
