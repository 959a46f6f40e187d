//! End-to-end API tests.
//!
//! Drives the full router against a temporary SQLite database, exercising
//! the validation, duplicate-detection, and pagination behavior of the
//! configuration API.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use docmine::repository::{migrate, DbContext};
use docmine::server::{create_router, AppState};

async fn setup_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db_url = db_path.display().to_string();

    migrate::run_migrations(&db_url).await.unwrap();

    let ctx = DbContext::from_url(&db_url);
    let app = create_router(AppState::from_context(ctx), &[]);
    (app, dir)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_source(app: &Router, source_id: &str) {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/api/v1/sources",
            serde_json::json!({
                "source_id": source_id,
                "source_name": "Test Source",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn source_normalization_round_trip() {
    let (app, _dir) = setup_app().await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources",
            serde_json::json!({
                "source_id": "cr-supreme",
                "source_name": "Supreme Court",
                "country_code": "cri",
                "primary_language": "ES",
                "secondary_languages": ["EN", "Fr"],
                "phase": 2,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["country_code"], "CRI");

    // Normalization is applied exactly once per write: reads return the
    // same normalized attributes every time.
    for _ in 0..2 {
        let (status, fetched) = send(&app, get_request("/api/v1/sources/cr-supreme")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["country_code"], "CRI");
        assert_eq!(fetched["primary_language"], "es");
        assert_eq!(
            fetched["secondary_languages"],
            serde_json::json!(["en", "fr"])
        );
        assert_eq!(fetched["phase"], 2);
        assert_eq!(fetched["is_active"], true);
        assert_eq!(fetched["total_documents_processed"], 0);
    }
}

#[tokio::test]
async fn duplicate_source_id_conflicts() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "dup").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources",
            serde_json::json!({ "source_id": "dup", "source_name": "Again" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn bad_country_code_rejected() {
    let (app, _dir) = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources",
            serde_json::json!({
                "source_id": "bad-cc",
                "source_name": "Bad",
                "country_code": "C1",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn source_config_partial_update() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "patchme").await;

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            "/api/v1/sources/patchme/config",
            serde_json::json!({ "phase": 4, "avg_accuracy": 0.93 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["phase"], 4);
    assert_eq!(updated["avg_accuracy"], 0.93);
    // Omitted fields retain prior values
    assert_eq!(updated["source_name"], "Test Source");

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/v1/sources/missing/config",
            serde_json::json!({ "phase": 2 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_field_name_conflicts_regardless_of_attributes() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/fields",
            serde_json::json!({ "field_name": "case_number", "is_required": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Same name with different optional attributes still conflicts
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/fields",
            serde_json::json!({
                "field_name": "case_number",
                "field_category": "metadata",
                "confidence_threshold": 0.5,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn renaming_field_to_own_name_is_not_a_conflict() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/fields",
            serde_json::json!({ "field_name": "case_number" }),
        ),
    )
    .await;
    let field_id = created["field_id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/v1/fields/{}", field_id),
            serde_json::json!({ "field_name": "case_number" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["field_name"], "case_number");
}

#[tokio::test]
async fn renaming_field_to_taken_name_conflicts() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/fields",
            serde_json::json!({ "field_name": "case_number" }),
        ),
    )
    .await;
    let (_, other) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/fields",
            serde_json::json!({ "field_name": "party_name" }),
        ),
    )
    .await;
    let other_id = other["field_id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/v1/fields/{}", other_id),
            serde_json::json!({ "field_name": "case_number" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_field_name_is_a_validation_error() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/fields",
            serde_json::json!({ "field_display_name": "No internal name" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn listing_fields_for_missing_source_is_404_not_empty() {
    let (app, _dir) = setup_app().await;

    let (status, body) = send(&app, get_request("/api/v1/sources/ghost/fields")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
    assert!(body["message"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn field_pagination_counts() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "paged").await;

    let n = 5;
    for i in 0..n {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/sources/paged/fields",
                serde_json::json!({
                    "field_name": format!("field_{}", i),
                    "display_order": i,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // items == max(0, min(L, N - O)), total == N regardless of L/O
    for (limit, offset, expected) in [(2, 0, 2usize), (2, 4, 1), (50, 5, 0), (50, 0, 5)] {
        let (status, body) = send(
            &app,
            get_request(&format!(
                "/api/v1/sources/paged/fields?limit={}&offset={}",
                limit, offset
            )),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), expected);
        assert_eq!(body["total"], n);
        assert_eq!(body["limit"], limit);
        assert_eq!(body["offset"], offset);
    }
}

#[tokio::test]
async fn field_pagination_bounds_enforced() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "paged").await;

    for uri in [
        "/api/v1/sources/paged/fields?limit=0",
        "/api/v1/sources/paged/fields?limit=101",
        "/api/v1/sources/paged/fields?offset=-1",
    ] {
        let (status, body) = send(&app, get_request(uri)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(body["error"], "ValidationError");
    }
}

#[tokio::test]
async fn field_category_filter() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/fields",
            serde_json::json!({ "field_name": "case_number", "field_category": "metadata" }),
        ),
    )
    .await;
    send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/fields",
            serde_json::json!({
                "field_name": "party_name",
                "field_category": "parties",
                "is_required": true,
            }),
        ),
    )
    .await;

    let (status, body) =
        send(&app, get_request("/api/v1/sources/court/fields?category=parties")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["field_name"], "party_name");

    let (_, body) = send(
        &app,
        get_request("/api/v1/sources/court/fields?is_required=false"),
    )
    .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["field_name"], "case_number");
}

#[tokio::test]
async fn field_lifecycle_end_to_end() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "FIELD_TEST").await;

    // Create
    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/FIELD_TEST/fields",
            serde_json::json!({
                "field_name": "case_number",
                "is_required": true,
                "confidence_threshold": 0.9,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_required"], true);
    assert_eq!(created["confidence_threshold"], 0.9);
    let field_id = created["field_id"].as_str().unwrap().to_string();

    // List
    let (status, listed) = send(&app, get_request("/api/v1/sources/FIELD_TEST/fields")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["total"], 1);

    // Get
    let (status, fetched) =
        send(&app, get_request(&format!("/api/v1/fields/{}", field_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["field_name"], "case_number");

    // Update display name
    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/v1/fields/{}", field_id),
            serde_json::json!({ "field_display_name": "Case Number" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["field_display_name"], "Case Number");

    let (_, fetched) = send(&app, get_request(&format!("/api/v1/fields/{}", field_id))).await;
    assert_eq!(fetched["field_display_name"], "Case Number");
    assert_eq!(fetched["field_name"], "case_number");

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/fields/{}", field_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Subsequent get is a 404
    let (status, _) = send(&app, get_request(&format!("/api/v1/fields/{}", field_id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_field_id_is_422_not_404() {
    let (app, _dir) = setup_app().await;

    let (status, body) = send(&app, get_request("/api/v1/fields/not-a-uuid")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Invalid UUID format"));

    // A well-formed id that resolves to nothing is a 404
    let (status, _) = send(
        &app,
        get_request("/api/v1/fields/b9c7f320-9d3e-4a4e-8a11-2f1f6a3f7d10"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_defaults_applied_on_create() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/profiles",
            serde_json::json!({ "profile_name": "default" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["pdf_extraction_method"], "pdfplumber");
    assert_eq!(created["segmentation_method"], "section_based");
    assert_eq!(created["segment_size_tokens"], 3000);
    assert_eq!(created["segment_overlap_tokens"], 200);
    assert_eq!(created["ocr_threshold"], 0.8);
    assert_eq!(created["max_retries"], 2);
    assert_eq!(created["version"], 1);

    let (status, listed) = send(&app, get_request("/api/v1/sources/court/profiles")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_profile_name_conflicts() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    let body = serde_json::json!({ "profile_name": "default" });
    let (status, _) = send(
        &app,
        json_request("POST", "/api/v1/sources/court/profiles", body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = send(
        &app,
        json_request("POST", "/api/v1/sources/court/profiles", body),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(response["message"].as_str().unwrap().contains("default"));
}

#[tokio::test]
async fn segment_overlap_must_be_less_than_size() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    // Equality is rejected too, and the failure names both fields
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/profiles",
            serde_json::json!({
                "profile_name": "bad",
                "segment_size_tokens": 100,
                "segment_overlap_tokens": 100,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "ValidationError");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("segment_overlap_tokens (100)"));
    assert!(message.contains("segment_size_tokens (100)"));
    let fields: Vec<&str> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"segment_overlap_tokens"));
    assert!(fields.contains(&"segment_size_tokens"));

    // The rule also applies when only one side is provided and the other
    // comes from defaults (overlap defaults to 200)
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/profiles",
            serde_json::json!({ "profile_name": "bad2", "segment_size_tokens": 150 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn profile_for_missing_source_is_404() {
    let (app, _dir) = setup_app().await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/ghost/profiles",
            serde_json::json!({ "profile_name": "default" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rule_lifecycle() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/rules",
            serde_json::json!({
                "rule_name": "collapse_whitespace",
                "pattern": "\\s+",
                "replacement": " ",
                "is_regex": true,
                "priority": 10,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["priority"], 10);
    let rule_id = created["rule_id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, get_request("/api/v1/sources/court/rules")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, fetched) = send(&app, get_request(&format!("/api/v1/rules/{}", rule_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["rule_name"], "collapse_whitespace");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/rules/{}", rule_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get_request(&format!("/api/v1/rules/{}", rule_id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rule_requires_pattern() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/rules",
            serde_json::json!({ "rule_name": "no_pattern" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn template_name_version_uniqueness() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    let v1 = serde_json::json!({
        "template_name": "extract_parties",
        "prompt_text": "List the parties named in this judgment.",
        "language_code": "ES",
    });
    let (status, created) = send(
        &app,
        json_request("POST", "/api/v1/sources/court/templates", v1.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["version"], 1);
    assert_eq!(created["language_code"], "es");
    assert_eq!(created["usage_count"], 0);

    // Same name + version conflicts
    let (status, _) = send(
        &app,
        json_request("POST", "/api/v1/sources/court/templates", v1),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Same name, new version is fine
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/templates",
            serde_json::json!({
                "template_name": "extract_parties",
                "prompt_text": "List the parties named in this judgment (v2).",
                "version": 2,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listed) = send(&app, get_request("/api/v1/sources/court/templates")).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn template_requires_prompt_text() {
    let (app, _dir) = setup_app().await;
    create_source(&app, "court").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/sources/court/templates",
            serde_json::json!({ "template_name": "empty" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
