//! Integration tests for REST API endpoints
//!
//! These tests build a real Console (rule engine or mock LLM) and drive the
//! router end to end.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sentinel_sdk::{ConsoleBuilder, LlmConfig};
use sentinel_server::api::create_router;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const BLOCK_REPLY: &str = r#"{"riskScore": 93, "riskLevel": "Critical", "isFraud": true,
    "anomalies": ["Amount Outlier"], "modelConfidence": 0.9,
    "explanation": "Far above usual spend", "recommendedAction": "BLOCK"}"#;

fn rule_engine_app() -> Router {
    let console = ConsoleBuilder::new()
        .use_rule_engine()
        .with_login_delay(Duration::ZERO)
        .build()
        .unwrap();
    create_router(Arc::new(console))
}

fn mock_llm_app(reply: &str) -> Router {
    let console = ConsoleBuilder::new()
        .with_llm(LlmConfig {
            mock_response: Some(reply.to_string()),
            ..LlmConfig::mock()
        })
        .with_login_delay(Duration::ZERO)
        .build()
        .unwrap();
    create_router(Arc::new(console))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn login(app: &Router) {
    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({"email": "demo@sentinelai.com", "password": "demo123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Poll until the transaction leaves pending/analyzing
async fn wait_for_terminal(app: &Router, id: &str) -> Value {
    for _ in 0..100 {
        let response = app
            .clone()
            .oneshot(get(&format!("/dashboard/transactions/{}", id)))
            .await
            .unwrap();
        let tx = body_json(response).await;
        if !matches!(tx["status"].as_str(), Some("pending") | Some("analyzing")) {
            return tx;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("transaction {} never reached a terminal status", id);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = rule_engine_app();
    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["classifier"], "rules");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_protected_routes_redirect_to_login() {
    let app = rule_engine_app();

    for uri in ["/dashboard", "/audit", "/rules", "/dashboard/transactions/tx_1"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), "/login");
    }

    let response = app
        .clone()
        .oneshot(post_json("/dashboard/simulate", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_unknown_path_redirects_to_dashboard() {
    let app = rule_engine_app();
    let response = app.oneshot(get("/settings")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_wrong_method_redirects_to_dashboard() {
    let app = rule_engine_app();

    let response = app.clone().oneshot(get("/logout")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = rule_engine_app();
    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({"email": "demo@sentinelai.com", "password": "letmein"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["status"], 401);

    let status = body_json(app.oneshot(get("/login")).await.unwrap()).await;
    assert_eq!(status, json!({"authenticated": false}));
}

#[tokio::test]
async fn test_login_and_logout_gate_the_dashboard() {
    let app = rule_engine_app();
    login(&app).await;

    let response = app.clone().oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let dashboard = body_json(response).await;
    assert_eq!(dashboard["user"]["name"], "Demo User");
    assert_eq!(dashboard["summary"]["transactionCount"], 0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_manual_submission_fills_defaults_and_is_analyzed() {
    let app = mock_llm_app(BLOCK_REPLY);
    login(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/dashboard/transactions",
            json!({"amount": 1500.0, "merchant": "", "location": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let pending = body_json(response).await;
    assert_eq!(pending["merchant"], "Unknown Merchant");
    assert_eq!(pending["location"], "Unknown Location");
    assert_eq!(pending["status"], "pending");
    assert_eq!(pending["type"], "ONLINE");

    let id = pending["id"].as_str().unwrap().to_string();
    let tx = wait_for_terminal(&app, &id).await;
    assert_eq!(tx["status"], "blocked");
    assert_eq!(tx["riskScore"], 93.0);
    assert_eq!(tx["recommendedAction"], "BLOCK");
}

#[tokio::test]
async fn test_invalid_manual_submission() {
    let app = rule_engine_app();
    login(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/dashboard/transactions",
            json!({"amount": -5.0, "merchant": "Fnac", "location": "Paris"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/dashboard/transactions")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("JSON syntax error"));
}

#[tokio::test]
async fn test_simulate_and_audit() {
    let app = rule_engine_app();
    login(&app).await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(post_json("/dashboard/simulate", json!({"safe": true})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        ids.push(body_json(response).await["id"].as_str().unwrap().to_string());
    }
    for id in &ids {
        let tx = wait_for_terminal(&app, id).await;
        // Safe amounts stay under every rule threshold
        assert_eq!(tx["status"], "cleared");
    }

    let audit = body_json(app.clone().oneshot(get("/audit?status=cleared")).await.unwrap()).await;
    assert_eq!(audit["transactions"].as_array().unwrap().len(), 3);
    assert_eq!(audit["stats"]["cleared"], 3);

    let audit = body_json(app.clone().oneshot(get("/audit?status=blocked")).await.unwrap()).await;
    assert!(audit["transactions"].as_array().unwrap().is_empty());

    let search = format!("/audit?search={}", ids[0].to_uppercase());
    let audit = body_json(app.clone().oneshot(get(&search)).await.unwrap()).await;
    assert_eq!(audit["transactions"][0]["id"], ids[0].as_str());

    let dashboard = body_json(app.clone().oneshot(get("/dashboard")).await.unwrap()).await;
    assert_eq!(dashboard["summary"]["riskBands"], json!({"low": 3, "medium": 0, "high": 0}));

    let response = app.oneshot(get("/audit?status=shredded")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_transaction() {
    let app = rule_engine_app();
    login(&app).await;

    let response = app.oneshot(get("/dashboard/transactions/tx_missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rules_listing_and_toggle() {
    let app = rule_engine_app();
    login(&app).await;

    let rules = body_json(app.clone().oneshot(get("/rules")).await.unwrap()).await;
    assert_eq!(rules["rules"].as_array().unwrap().len(), 4);
    assert_eq!(rules["models"].as_array().unwrap().len(), 4);
    assert_eq!(rules["rules"][2]["enabled"], false);

    let response = app
        .clone()
        .oneshot(post_json("/rules/r3/toggle", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["enabled"], true);

    let response = app
        .oneshot(post_json("/rules/r42/toggle", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
