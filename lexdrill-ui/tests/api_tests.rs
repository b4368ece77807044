//! Integration tests for the lexdrill-ui API endpoints
//!
//! Each test drives the real router over a tempdir-backed document store:
//! section/word CRUD with its cascades, the mistake ledger, the legacy
//! word-list start, and the token-addressed session surface.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use lexdrill_ui::sessions::SessionRegistry;
use lexdrill_ui::store::DocumentStore;
use lexdrill_ui::{build_router, AppState};

/// Test helper: router over a fresh tempdir-backed store.
/// The TempDir must stay alive for the duration of the test.
fn setup_app() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    let app = app_for(&dir);
    (app, dir)
}

/// Test helper: router over an existing data folder (for reopen tests)
fn app_for(dir: &tempfile::TempDir) -> axum::Router {
    let store = DocumentStore::open(dir.path().join("lexdrill.json"))
        .expect("Should open document store");
    let sessions = SessionRegistry::new(Duration::from_secs(60));
    build_router(AppState::new(store, sessions))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = extract_json(response.into_body()).await;
    (status, body)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_endpoint_reports_module_and_version() {
    let (app, _dir) = setup_app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "lexdrill-ui");
    assert!(body["version"].is_string());
}

// =============================================================================
// Sections
// =============================================================================

#[tokio::test]
async fn section_lifecycle() {
    let (app, _dir) = setup_app();

    let (status, _) = send(&app, json_request("POST", "/sections", json!({"section": "A"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/sections")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": "A", "count": 0}]));

    // Idempotent re-create
    let (status, body) = send(&app, json_request("POST", "/sections", json!({"section": "A"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    let (_, body) = send(&app, get("/sections")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn blank_section_id_is_rejected() {
    let (app, _dir) = setup_app();

    let (status, body) = send(&app, json_request("POST", "/sections", json!({"section": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("section id"));

    // Missing field behaves like an empty one
    let (status, _) = send(&app, json_request("POST", "/sections", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_an_absent_section_is_a_no_op() {
    let (app, _dir) = setup_app();

    let (status, body) = send(
        &app,
        json_request("DELETE", "/sections", json!({"section": "missing"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

// =============================================================================
// Vocabulary
// =============================================================================

#[tokio::test]
async fn word_lifecycle_and_last_write_wins() {
    let (app, _dir) = setup_app();

    let add = |term: &str, translation: &str| {
        json_request(
            "POST",
            "/vocab",
            json!({"section": "A", "chinese": term, "english": translation}),
        )
    };

    let (status, _) = send(&app, add("猫", "cat")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, add("猫", "kitty")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/vocab/A")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"猫": "kitty"}));

    // Section count reflects the single entry
    let (_, body) = send(&app, get("/sections")).await;
    assert_eq!(body, json!([{"id": "A", "count": 1}]));

    let (status, _) = send(
        &app,
        json_request("DELETE", "/vocab", json!({"section": "A", "chinese": "猫"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, get("/vocab/A")).await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn add_word_rejects_missing_fields() {
    let (app, _dir) = setup_app();

    let (status, body) = send(
        &app,
        json_request("POST", "/vocab", json!({"section": "A", "chinese": "猫"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn listing_an_absent_section_yields_an_empty_mapping() {
    let (app, _dir) = setup_app();
    let (status, body) = send(&app, get("/vocab/nothing")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

// =============================================================================
// Mistakes
// =============================================================================

#[tokio::test]
async fn adding_a_word_preseeds_a_zero_counter() {
    let (app, _dir) = setup_app();

    send(
        &app,
        json_request("POST", "/vocab", json!({"section": "A", "chinese": "猫", "english": "cat"})),
    )
    .await;

    let (status, body) = send(&app, get("/mistakes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"猫": {"A": 0}}));
}

#[tokio::test]
async fn recording_and_resetting_mistakes() {
    let (app, _dir) = setup_app();

    send(
        &app,
        json_request("POST", "/mistakes", json!({"chinese": "猫", "section": "A"})),
    )
    .await;
    send(
        &app,
        json_request("POST", "/mistakes", json!({"chinese": "猫", "section": "A"})),
    )
    .await;

    let (_, body) = send(&app, get("/mistakes")).await;
    assert_eq!(body, json!({"猫": {"A": 2}}));

    let (status, _) = send(&app, json_request("POST", "/mistakes/reset", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, get("/mistakes")).await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn deleting_a_section_cascades_into_the_ledger() {
    let (app, _dir) = setup_app();

    for (section, term, translation) in [("A", "猫", "cat"), ("B", "猫", "cat"), ("A", "狗", "dog")] {
        send(
            &app,
            json_request(
                "POST",
                "/vocab",
                json!({"section": section, "chinese": term, "english": translation}),
            ),
        )
        .await;
    }
    send(
        &app,
        json_request("POST", "/mistakes", json!({"chinese": "猫", "section": "A"})),
    )
    .await;
    send(
        &app,
        json_request("POST", "/mistakes", json!({"chinese": "猫", "section": "B"})),
    )
    .await;

    let (status, _) = send(&app, json_request("DELETE", "/sections", json!({"section": "A"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/vocab/A")).await;
    assert_eq!(body, json!({}));

    // "狗" existed only in A and must be gone entirely; "猫" keeps only B
    let (_, body) = send(&app, get("/mistakes")).await;
    assert_eq!(body, json!({"猫": {"B": 1}}));
}

// =============================================================================
// Legacy start contract
// =============================================================================

#[tokio::test]
async fn start_test_requires_a_non_empty_selection() {
    let (app, _dir) = setup_app();

    let (status, _) = send(&app, json_request("POST", "/start-test", json!({"sections": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        json_request("POST", "/start-test", json!({"sections": ["missing"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("no words"));
}

#[tokio::test]
async fn start_test_returns_a_permutation_of_the_selected_words() {
    let (app, _dir) = setup_app();

    for i in 0..10 {
        send(
            &app,
            json_request(
                "POST",
                "/vocab",
                json!({"section": "A", "chinese": format!("term{i}"), "english": format!("word{i}")}),
            ),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        json_request("POST", "/start-test", json!({"sections": ["A"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rated"], false);

    let words = body["words"].as_array().unwrap();
    assert_eq!(words.len(), 10);
    let mut terms: Vec<&str> = words.iter().map(|w| w[0].as_str().unwrap()).collect();
    terms.sort();
    let mut expected: Vec<String> = (0..10).map(|i| format!("term{i}")).collect();
    expected.sort();
    assert_eq!(terms, expected);
    // Triples carry the section of origin
    assert!(words.iter().all(|w| w[2] == "A"));
}

// =============================================================================
// Server-driven sessions
// =============================================================================

async fn seed_cat(app: &axum::Router) {
    send(
        app,
        json_request("POST", "/vocab", json!({"section": "A", "chinese": "猫", "english": "cat"})),
    )
    .await;
}

#[tokio::test]
async fn session_flow_with_retry_records_the_mistake() {
    let (app, _dir) = setup_app();
    seed_cat(&app).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/session/start", json!({"sections": ["A"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["rated"], false);
    assert_eq!(body["question"]["prompt"], "猫");
    let token = body["token"].as_str().unwrap().to_string();

    // Wrong answer: question stays current
    let (status, body) = send(
        &app,
        json_request("POST", &format!("/session/{token}/answer"), json!({"answer": "dog"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], false);
    assert_eq!(body["attempts"], 1);
    assert_eq!(body["done"], false);
    assert_eq!(body["question"]["prompt"], "猫");

    // Blank answer: validation error, no attempt consumed
    let (status, _) = send(
        &app,
        json_request("POST", &format!("/session/{token}/answer"), json!({"answer": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, body) = send(&app, get(&format!("/session/{token}"))).await;
    assert_eq!(body["attempts"], 1);

    // Case-insensitive match on the second attempt completes the session
    let (status, body) = send(
        &app,
        json_request("POST", &format!("/session/{token}/answer"), json!({"answer": "CAT"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], true);
    assert_eq!(body["attempts"], 2);
    assert_eq!(body["done"], true);
    let summary = &body["summary"];
    assert_eq!(summary["correct"], 0);
    assert_eq!(summary["wrong"], 1);
    assert_eq!(summary["accuracy"], 0);
    assert_eq!(summary["review"], json!([{"term": "猫", "translation": "cat"}]));

    // The terminal mistake landed in the ledger
    let (_, body) = send(&app, get("/mistakes")).await;
    assert_eq!(body, json!({"猫": {"A": 1}}));

    // Completed sessions are evicted
    let (status, _) = send(
        &app,
        json_request("POST", &format!("/session/{token}/answer"), json!({"answer": "cat"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn first_try_session_keeps_the_ledger_clean() {
    let (app, _dir) = setup_app();
    seed_cat(&app).await;

    let (_, body) = send(
        &app,
        json_request("POST", "/session/start", json!({"sections": ["A"]})),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        json_request("POST", &format!("/session/{token}/answer"), json!({"answer": "Cat"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], true);
    assert_eq!(body["summary"]["accuracy"], 100);
    assert_eq!(body["summary"]["review"], json!([]));

    // First-try success must not touch the pre-seeded zero counter
    let (_, body) = send(&app, get("/mistakes")).await;
    assert_eq!(body, json!({"猫": {"A": 0}}));
}

#[tokio::test]
async fn hints_escalate_and_skips_are_tallied() {
    let (app, _dir) = setup_app();
    send(
        &app,
        json_request("POST", "/vocab", json!({"section": "A", "chinese": "猫", "english": "kitten"})),
    )
    .await;

    let (_, body) = send(
        &app,
        json_request("POST", "/session/start", json!({"sections": ["A"]})),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();
    assert!(body["question"].get("hint").is_none());

    let wrong = json!({"answer": "cat"});
    let (_, body) = send(
        &app,
        json_request("POST", &format!("/session/{token}/answer"), wrong.clone()),
    )
    .await;
    assert!(body["question"].get("hint").is_none());
    assert_eq!(body["question"]["can_skip"], false);

    let (_, body) = send(
        &app,
        json_request("POST", &format!("/session/{token}/answer"), wrong.clone()),
    )
    .await;
    assert_eq!(body["question"]["hint"], "kit");
    assert_eq!(body["question"]["can_skip"], false);

    let (_, body) = send(
        &app,
        json_request("POST", &format!("/session/{token}/answer"), wrong),
    )
    .await;
    assert_eq!(body["question"]["can_skip"], true);

    let (status, body) = send(
        &app,
        json_request("POST", &format!("/session/{token}/skip"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["done"], true);
    assert_eq!(body["summary"]["skipped"], 1);
    assert_eq!(body["summary"]["accuracy"], 0);
}

#[tokio::test]
async fn ending_a_session_early_returns_the_summary_and_evicts() {
    let (app, _dir) = setup_app();
    seed_cat(&app).await;

    let (_, body) = send(
        &app,
        json_request("POST", "/session/start", json!({"sections": ["A"]})),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        json_request("POST", &format!("/session/{token}/end"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], 0);
    assert_eq!(body["accuracy"], 0);

    let (status, _) = send(&app, get(&format!("/session/{token}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_session_token_is_not_found() {
    let (app, _dir) = setup_app();

    let token = uuid::Uuid::new_v4();
    let (status, body) = send(&app, get(&format!("/session/{token}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Unknown session"));
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn the_document_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let app = app_for(&dir);
    send(
        &app,
        json_request("POST", "/vocab", json!({"section": "A", "chinese": "猫", "english": "cat"})),
    )
    .await;
    send(
        &app,
        json_request("POST", "/mistakes", json!({"chinese": "猫", "section": "A"})),
    )
    .await;
    drop(app);

    let app = app_for(&dir);
    let (_, body) = send(&app, get("/vocab/A")).await;
    assert_eq!(body, json!({"猫": "cat"}));
    let (_, body) = send(&app, get("/mistakes")).await;
    assert_eq!(body, json!({"猫": {"A": 1}}));
}
