mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{json_request, spawn_app, FakeProvider, SAMPLE_CSV};
use wms_backend::shared::llm::LlmError;

#[tokio::test]
async fn test_answer_returned_from_provider() {
    let provider = FakeProvider::answering("Golden Apple has 7 units.");
    let app = spawn_app(provider.clone()).await;

    let (status, body) = app
        .post_json(
            "/api/ai-query",
            json!({ "question": "What is the total for Golden Apple?", "csvText": SAMPLE_CSV }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Golden Apple has 7 units.");
    assert!(body.get("analysis").is_none());

    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let prompt = &calls[0].last().unwrap().content;
    assert!(prompt.contains(SAMPLE_CSV));
    assert!(prompt.contains("What is the total for Golden Apple?"));
}

#[tokio::test]
async fn test_missing_or_blank_fields_are_rejected() {
    let provider = FakeProvider::answering("unused");
    let app = spawn_app(provider.clone()).await;

    for body in [
        json!({ "csvText": SAMPLE_CSV }),
        json!({ "question": "Totals?" }),
        json!({ "question": "   ", "csvText": SAMPLE_CSV }),
        json!({ "question": "Totals?", "csvText": "" }),
    ] {
        let (status, response) = app.post_json("/api/ai-query", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response["error"],
            "Missing `question` or `csvText` in request body."
        );
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let provider = FakeProvider::answering("unused");
    let app = spawn_app(provider.clone()).await;

    let (status, body) = app
        .send(json_request("POST", "/api/ai-query", "{not json".into()))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_hides_details() {
    let provider = FakeProvider::failing(LlmError::AuthError("invalid api key sk-123".into()));
    let app = spawn_app(provider).await;

    let (status, body) = app
        .post_json(
            "/api/ai-query",
            json!({ "question": "Totals?", "csvText": SAMPLE_CSV }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_body_over_limit_is_413() {
    let provider = FakeProvider::answering("unused");
    let app = spawn_app(provider.clone()).await;

    let csv_text = "x".repeat(5 * 1024 * 1024 + 1);
    let body = json!({ "question": "Totals?", "csvText": csv_text }).to_string();
    let (status, _) = app
        .send(json_request("POST", "/api/ai-query", body))
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_csv_routes_share_the_ai_query_limit() {
    let app = spawn_app(FakeProvider::answering("ok")).await;

    // 3 MB: больше стандартных 2 MB axum, но в пределах 5 MB
    let rows = "SKU-1,1\n".repeat(400_000);
    let csv_text = format!("SKU,Quantity\n{}", rows);
    assert!(csv_text.len() > 3 * 1024 * 1024);

    let (status, analytics) = app
        .post_json("/api/analytics/msku", json!({ "csvText": csv_text }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics["summary"]["total_rows"], 400_000);

    let (status, _) = app
        .post_json(
            "/api/ai-query",
            json!({ "question": "Totals?", "csvText": csv_text }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Пустые строки пропускаются парсером: тело больше 2 MB (в JSON `\n`
    // занимает два байта), данных нет
    let blank_csv = format!("SKU,Quantity\n{}", "\n".repeat(1_200_000));
    let (status, body) = app
        .post_json("/api/upload", json!({ "csvText": blank_csv }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data to save");

    let (status, mapped) = app
        .post_json("/api/sku-mapping/apply", json!({ "csvText": blank_csv }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mapped["rows"], json!([]));

    let oversized = "x".repeat(5 * 1024 * 1024 + 1);
    for uri in ["/api/upload", "/api/analytics/msku", "/api/sku-mapping/apply"] {
        let (status, _) = app.post_json(uri, json!({ "csvText": oversized })).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{}", uri);
    }
}

#[tokio::test]
async fn test_advanced_mode_returns_analysis() {
    let reply = "Totals:\n```json\n{\"type\":\"chart\",\"data\":[{\"MSKU\":\"Golden Apple\",\"total\":7}]}\n```";
    let app = spawn_app(FakeProvider::answering(reply)).await;

    let (status, body) = app
        .post_json(
            "/api/ai-query",
            json!({ "question": "Chart totals", "csvText": SAMPLE_CSV, "displayMode": "advanced" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["type"], "chart");
    assert_eq!(body["analysis"]["content"], "Totals:");
}

#[tokio::test]
async fn test_history_records_and_clears() {
    let app = spawn_app(FakeProvider::answering("ok")).await;

    for question in ["first", "second"] {
        let (status, _) = app
            .post_json(
                "/api/ai-query",
                json!({ "question": question, "csvText": SAMPLE_CSV }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, history) = app.get("/api/ai-query/history").await;
    assert_eq!(status, StatusCode::OK);
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["question"], "second");

    let (status, _) = app
        .send(
            axum::http::Request::delete("/api/ai-query/history")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, history) = app.get("/api/ai-query/history").await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn test_templates_listed() {
    let app = spawn_app(FakeProvider::answering("ok")).await;
    let (status, body) = app.get("/api/ai-query/templates").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.as_array().unwrap().is_empty());
}
