//! Integration tests for the HTTP API, driven through the router without a
//! listening socket. No upstream sources are configured, so every request
//! is answered from the fallback record set.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use permit_office::{build_router, AppState, ServiceConfig};
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn test_router() -> Router {
    let config = ServiceConfig {
        assets_dir: "missing-assets-dir".to_string(),
        ..Default::default()
    };
    build_router(Arc::new(AppState::new(config)))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec(), headers)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn parse(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn root_lists_endpoints() {
    let (status, body, _) = get(test_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&body);
    assert_eq!(json["name"], "Permit Office Service");
    assert!(json["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "/permits/{id}/pdf"));
}

#[tokio::test]
async fn health_reports_count_and_provenance() {
    let (status, body, _) = get(test_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&body);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "permit-office");
    assert_eq!(json["recordCount"], 13);
    assert_eq!(json["provenance"], "fallback");
}

#[tokio::test]
async fn permits_returns_full_record_set() {
    let (status, body, _) = get(test_router(), "/permits").await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&body);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 13);
    assert_eq!(json["permits"].as_array().unwrap().len(), 13);
    assert_eq!(json["permits"][0]["permitNumber"], "PR/PTA/2025/10/13459");
}

#[tokio::test]
async fn permit_by_id_round_trips_wire_names() {
    let (status, body, _) = get(test_router(), "/permits/1").await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&body);
    assert_eq!(json["permit"]["id"], 1);
    assert_eq!(json["permit"]["type"], "Permanent Residence");
    assert_eq!(json["permit"]["issueDate"], "2025-10-13");
}

#[tokio::test]
async fn unknown_permit_is_a_json_404() {
    let (status, body, _) = get(test_router(), "/permits/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json = parse(&body);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Permit not found");
}

#[tokio::test]
async fn permit_pdf_downloads_with_typed_filename() {
    let (status, body, headers) = get(test_router(), "/permits/1/pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");

    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("Permanent_Residence"));
    assert!(disposition.contains("13459"));
    assert_eq!(&body[..5], b"%PDF-");
}

#[tokio::test]
async fn pdf_for_unknown_permit_is_404_not_500() {
    let (status, _, _) = get(test_router(), "/permits/999/pdf").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn permit_qr_is_a_png() {
    let (status, body, headers) = get(test_router(), "/permits/1/qr").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(&body[..4], &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn verify_returns_signature_and_status() {
    let (status, body, _) = get(test_router(), "/permits/1/verify").await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&body);
    let verification = &json["verification"];
    assert_eq!(verification["reference"], "PR/PTA/2025/10/13459");
    assert_eq!(verification["type"], "Permanent Residence");
    assert_eq!(verification["status"], "VALID");
    assert_eq!(verification["qrUrl"], "/permits/1/qr");
    // HMAC-SHA256 in hex.
    let signature = verification["signature"].as_str().unwrap();
    assert_eq!(signature.len(), 64);
    assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn verify_document_serves_a_branded_page() {
    let (status, body, headers) = get(test_router(), "/permits/1/verify-document").await;
    assert_eq!(status, StatusCode::OK);
    let content_type = headers[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("DOCUMENT VALID"));
    assert!(html.contains("Muhammad Mohsin"));
    assert!(html.contains("/permits/1/qr"));
}

#[tokio::test]
async fn verify_document_miss_is_an_html_page() {
    let (status, body, headers) = get(test_router(), "/permits/999/verify-document").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let content_type = headers[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    assert!(String::from_utf8(body).unwrap().contains("Document Not Found"));
}

#[tokio::test]
async fn validate_known_number() {
    let (status, json) = post_json(
        test_router(),
        "/validate",
        json!({ "permitNumber": "PR/PTA/2025/10/13458" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["valid"], true);
    assert_eq!(json["permit"]["id"], 2);
}

#[tokio::test]
async fn validate_unknown_number_is_not_an_error() {
    let (status, json) = post_json(
        test_router(),
        "/validate",
        json!({ "permitNumber": "PR/NOPE/0000" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["valid"], false);
    assert_eq!(json["message"], "Permit not found");
}

#[tokio::test]
async fn validate_missing_number_is_invalid() {
    let (status, json) = post_json(test_router(), "/validate", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], false);
}

#[tokio::test]
async fn generate_pdf_renders_posted_records() {
    let response = test_router()
        .oneshot(
            Request::post("/generate-pdf")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "permitData": {
                            "id": 500,
                            "type": "General Work Permit",
                            "name": "Posted Holder",
                            "permitNumber": "WP/POST/2026/01/0001",
                            "issueDate": "2026-01-10",
                            "expiryDate": "2031-01-10"
                        }
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("General_Work_Permit"));
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..5], b"%PDF-");
}

#[tokio::test]
async fn generate_pdf_without_data_is_a_400() {
    let (status, json) = post_json(test_router(), "/generate-pdf", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No permit data provided");
}

#[tokio::test]
async fn undefined_routes_fall_through_to_404() {
    let (status, body, _) = get(test_router(), "/no-such-route").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse(&body)["success"], false);
}
