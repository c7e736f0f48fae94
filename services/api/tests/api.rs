//! services/api/tests/api.rs
//!
//! End-to-end tests for the HTTP surface. The router runs against
//! in-memory port stubs, so these exercise routing, auth gating,
//! validation, and response shapes without a database or provider.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use api_lib::catalog::CatalogEntry;
use api_lib::config::Config;
use api_lib::web::jwt::{issue_token, Claims};
use api_lib::web::state::AppState;
use api_lib::web::router;
use newsdesk_core::domain::{
    NewUser, SummaryRecord, TranslationRecord, UserCredentials, VoiceChoice,
};
use newsdesk_core::ports::{
    DatabaseService, PortError, PortResult, SpeechSynthesisService, SummarizationService,
    TextExtractionService, TranslationService,
};

const EXTRACTED_TEXT: &str =
    "Paris is the capital of France. It has a population of over two million.";
const JWT_SECRET: &str = "integration-test-secret";

//=========================================================================================
// Port Stubs
//=========================================================================================

#[derive(Default)]
struct MemoryDb {
    users: Mutex<HashMap<String, UserCredentials>>,
    summaries: Mutex<Vec<SummaryRecord>>,
}

#[async_trait]
impl DatabaseService for MemoryDb {
    async fn create_user(&self, new_user: &NewUser) -> PortResult<Uuid> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&new_user.email) {
            return Err(PortError::Conflict("Email already exists.".to_string()));
        }
        let id = Uuid::new_v4();
        users.insert(
            new_user.email.clone(),
            UserCredentials {
                id,
                first_name: new_user.first_name.clone(),
                last_name: new_user.last_name.clone(),
                email: new_user.email.clone(),
                password_hash: new_user.password_hash.clone(),
                country: new_user.country.clone(),
                payment_method: new_user.payment_method.clone(),
            },
        );
        Ok(id)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        self.users
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("No user with email {}", email)))
    }

    async fn save_summary(
        &self,
        user_id: Uuid,
        filename: &str,
        source_text: &str,
        summary: &str,
    ) -> PortResult<SummaryRecord> {
        let record = SummaryRecord {
            id: Uuid::new_v4(),
            user_id,
            filename: filename.to_string(),
            source_text: source_text.to_string(),
            summary: summary.to_string(),
            created_at: Utc::now(),
        };
        self.summaries.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn save_translation(
        &self,
        user_id: Uuid,
        filename: &str,
        original_text: &str,
        translated_text: &str,
        language: &str,
    ) -> PortResult<TranslationRecord> {
        Ok(TranslationRecord {
            id: Uuid::new_v4(),
            user_id,
            filename: filename.to_string(),
            original_text: original_text.to_string(),
            translated_text: translated_text.to_string(),
            language: language.to_string(),
            created_at: Utc::now(),
        })
    }

    async fn list_summaries_for_user(&self, user_id: Uuid) -> PortResult<Vec<SummaryRecord>> {
        Ok(self
            .summaries
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_translations_for_user(
        &self,
        _user_id: Uuid,
    ) -> PortResult<Vec<TranslationRecord>> {
        Ok(Vec::new())
    }
}

/// Returns a fixed text for every existing file, split into two pages.
/// `blank.pdf` parses but yields no text, like a scanned-image document.
struct StubExtractor;

fn is_textless(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "blank.pdf")
}

#[async_trait]
impl TextExtractionService for StubExtractor {
    async fn extract(&self, path: &Path) -> PortResult<String> {
        if !path.is_file() {
            return Err(PortError::NotFound(format!(
                "File not found: {}",
                path.display()
            )));
        }
        if is_textless(path) {
            return Ok(String::new());
        }
        Ok(EXTRACTED_TEXT.to_string())
    }

    async fn extract_pages(&self, path: &Path) -> PortResult<Vec<String>> {
        if !path.is_file() {
            return Err(PortError::NotFound(format!(
                "File not found: {}",
                path.display()
            )));
        }
        if is_textless(path) {
            return Ok(vec![String::new()]);
        }
        Ok(vec![
            "Paris is the capital of France.".to_string(),
            "It has a population of over two million.".to_string(),
        ])
    }
}

struct StubSummarizer;

#[async_trait]
impl SummarizationService for StubSummarizer {
    async fn summarize(&self, text: &str, _max_points: u8) -> PortResult<String> {
        if text.trim().is_empty() {
            return Err(PortError::InvalidInput(
                "Text is empty. Cannot summarize.".to_string(),
            ));
        }
        Ok("- Paris is the capital of France.".to_string())
    }
}

struct StubTranslator;

#[async_trait]
impl TranslationService for StubTranslator {
    async fn translate(&self, text: &str, language_code: &str) -> PortResult<String> {
        Ok(format!("[{}] {}", language_code, text))
    }
}

struct StubTts;

#[async_trait]
impl SpeechSynthesisService for StubTts {
    async fn synthesize(&self, _text: &str, _voice: VoiceChoice) -> PortResult<Vec<i16>> {
        Ok(vec![0i16; 2400])
    }
}

//=========================================================================================
// Test Harness
//=========================================================================================

struct TestApp {
    router: Router,
    user_id: Uuid,
    tts_dir: tempfile::TempDir,
    // Held only so the fixture PDFs outlive the test.
    _pdf_dir: tempfile::TempDir,
}

fn test_config(pdf_dir: &Path, tts_dir: &Path, persist_artifacts: bool) -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://unused".to_string(),
        log_level: tracing::Level::WARN,
        jwt_secret: JWT_SECRET.to_string(),
        openai_api_key: None,
        summary_model: "stub".to_string(),
        translation_model: "stub".to_string(),
        pdf_dir: pdf_dir.to_path_buf(),
        tts_dir: tts_dir.to_path_buf(),
        catalog_path: "./catalog.json".into(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        persist_artifacts,
        token_ttl_days: 30,
        translation_chunk_delay_ms: 0,
    }
}

fn build_app(persist_artifacts: bool) -> TestApp {
    let pdf_dir = tempfile::tempdir().unwrap();
    let tts_dir = tempfile::tempdir().unwrap();
    // Real files on disk so filename resolution succeeds. blank.pdf is
    // the textless fixture the stub extractor recognizes.
    std::fs::write(pdf_dir.path().join("AP.pdf"), b"%PDF-1.4 stub").unwrap();
    std::fs::write(pdf_dir.path().join("blank.pdf"), b"%PDF-1.4 stub").unwrap();

    let catalog = vec![CatalogEntry {
        id: 1,
        title: "The Associated Press".to_string(),
        filename: "AP.pdf".to_string(),
        language: "english".to_string(),
        date: "2025-12-12".to_string(),
        country: "USA".to_string(),
    }];

    let config = Arc::new(test_config(pdf_dir.path(), tts_dir.path(), persist_artifacts));
    let state = Arc::new(AppState {
        db: Arc::new(MemoryDb::default()),
        config,
        catalog: Arc::new(catalog),
        extractor: Arc::new(StubExtractor),
        summarizer: Arc::new(StubSummarizer),
        translator: Arc::new(StubTranslator),
        tts: Arc::new(StubTts),
    });

    let user_id = Uuid::new_v4();
    TestApp {
        router: router(state),
        user_id,
        tts_dir,
        _pdf_dir: pdf_dir,
    }
}

fn bearer_token(user_id: Uuid) -> String {
    let claims = Claims::new(user_id, "Ada".to_string(), "Lovelace".to_string(), 30);
    issue_token(&claims, JWT_SECRET).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

//=========================================================================================
// Catalog & Auth Gating
//=========================================================================================

#[tokio::test]
async fn catalog_is_public_and_lists_documents() {
    let app = build_app(false);
    let (status, body) = send(&app.router, get_request("/api/pdfs", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["filename"], "AP.pdf");
    assert_eq!(body[0]["language"], "english");
}

#[tokio::test]
async fn ai_routes_require_a_token() {
    let app = build_app(false);
    for uri in ["/api/ai/summarize", "/api/ai/translate", "/api/ai/read-pdf"] {
        let (status, body) =
            send(&app.router, post_json(uri, None, json!({"filename": "AP.pdf"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Access denied. No token provided.");
    }
}

#[tokio::test]
async fn a_tampered_token_is_forbidden() {
    let app = build_app(false);
    let claims = Claims::new(app.user_id, "Ada".into(), "Lovelace".into(), 30);
    let token = issue_token(&claims, "some-other-secret").unwrap();
    let (status, body) = send(
        &app.router,
        post_json("/api/ai/summarize", Some(&token), json!({"filename": "AP.pdf"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid or expired token.");
}

//=========================================================================================
// Register / Login / Verify
//=========================================================================================

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = build_app(false);
    let payload = json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "nationality": "UK",
        "dateOfBirth": "1815-12-10",
        "email": "ada@example.com",
        "password": "correct horse"
    });

    let (status, body) =
        send(&app.router, post_json("/api/auth/register", None, payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully!");

    let (status, body) = send(&app.router, post_json("/api/auth/register", None, payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists.");
}

#[tokio::test]
async fn registration_requires_the_core_fields() {
    let app = build_app(false);
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/auth/register",
            None,
            json!({"firstName": "Ada", "email": "ada@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields.");
}

#[tokio::test]
async fn login_then_verify_round_trips_the_claims() {
    let app = build_app(false);
    let register = json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "password": "correct horse"
    });
    let (status, _) = send(&app.router, post_json("/api/auth/register", None, register)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/auth/login",
            None,
            json!({"email": "ada@example.com", "password": "correct horse"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful!");
    assert_eq!(body["user"]["firstName"], "Ada");
    assert_eq!(body["user"]["fullName"], "Ada Lovelace");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app.router, get_request("/api/auth/verify", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Token is valid");
    assert_eq!(body["user"]["firstName"], "Ada");
    assert_eq!(body["user"]["lastName"], "Lovelace");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = build_app(false);
    let register = json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "password": "correct horse"
    });
    send(&app.router, post_json("/api/auth/register", None, register)).await;

    for payload in [
        json!({"email": "ada@example.com", "password": "wrong"}),
        json!({"email": "nobody@example.com", "password": "correct horse"}),
    ] {
        let (status, body) =
            send(&app.router, post_json("/api/auth/login", None, payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password.");
    }
}

//=========================================================================================
// AI Actions
//=========================================================================================

#[tokio::test]
async fn summarize_returns_summary_and_source_text() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let (status, body) = send(
        &app.router,
        post_json("/api/ai/summarize", Some(&token), json!({"filename": "AP.pdf"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["summary"].as_str().unwrap().is_empty());
    assert_eq!(body["text"], EXTRACTED_TEXT);
    assert!(body.get("dbEntry").is_none());
}

#[tokio::test]
async fn summarize_persists_when_the_toggle_is_on() {
    let app = build_app(true);
    let token = bearer_token(app.user_id);
    let (status, body) = send(
        &app.router,
        post_json("/api/ai/summarize", Some(&token), json!({"filename": "AP.pdf"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dbEntry"]["filename"], "AP.pdf");

    let (status, body) = send(
        &app.router,
        get_request("/api/users/me/summaries", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["filename"], "AP.pdf");
}

#[tokio::test]
async fn missing_file_is_not_found_even_with_a_valid_token() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/ai/translate",
            Some(&token),
            json!({"filename": "ghost.pdf", "language": "fr"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn textless_pdf_is_not_found_for_translate_and_read_aloud() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let cases = [
        (
            "/api/ai/translate",
            json!({"filename": "blank.pdf", "language": "fr"}),
        ),
        (
            "/api/ai/read-pdf",
            json!({"filename": "blank.pdf", "voice": "Female"}),
        ),
    ];
    for (uri, payload) in cases {
        let (status, body) = send(&app.router, post_json(uri, Some(&token), payload)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "No text extracted from PDF.", "{uri}");
    }
}

#[tokio::test]
async fn translate_returns_original_and_translated_text() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/ai/translate",
            Some(&token),
            json!({"filename": "AP.pdf", "language": "fr"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["originalText"], EXTRACTED_TEXT);
    assert_eq!(body["language"], "fr");
    assert_eq!(
        body["translatedText"],
        format!("[fr] {}", EXTRACTED_TEXT)
    );
}

#[tokio::test]
async fn translate_without_a_language_is_bad_request() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let (status, body) = send(
        &app.router,
        post_json("/api/ai/translate", Some(&token), json!({"filename": "AP.pdf"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing filename or language.");
}

#[tokio::test]
async fn read_pdf_writes_a_wav_and_is_idempotent() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let payload = json!({"filename": "AP.pdf", "voice": "Female"});

    let (status, first) = send(
        &app.router,
        post_json("/api/ai/read-pdf", Some(&token), payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let tts_file = first["ttsFile"].as_str().unwrap().to_string();
    assert!(tts_file.starts_with("/public_tts/tts_"));
    assert!(tts_file.ends_with(".wav"));

    let on_disk = app.tts_dir.path().join(tts_file.trim_start_matches("/public_tts/"));
    assert!(on_disk.is_file());
    // 44-byte header plus 2400 stub samples.
    assert_eq!(std::fs::metadata(&on_disk).unwrap().len(), 44 + 2 * 2400);

    // Same text and voice resolves to the same content-addressed file.
    let (status, second) =
        send(&app.router, post_json("/api/ai/read-pdf", Some(&token), payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["ttsFile"].as_str().unwrap(), tts_file);
}

//=========================================================================================
// Search
//=========================================================================================

#[tokio::test]
async fn single_document_search_returns_page_tagged_hits() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/pdfs/search",
            Some(&token),
            json!({"filename": "AP.pdf", "term": "PARIS"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["filename"], "AP.pdf");
    assert_eq!(hits[0]["page"], 1);
    assert_eq!(hits[0]["textSnippet"], "Paris is the capital of France.");
}

#[tokio::test]
async fn catalog_wide_search_returns_one_snippet_per_document() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let (status, body) = send(
        &app.router,
        post_json("/api/pdfs/search", Some(&token), json!({"term": "capital"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["filename"], "AP.pdf");
    assert!(hits[0].get("page").is_none());
    assert!(hits[0]["textSnippet"].as_str().unwrap().contains("capital"));
}

#[tokio::test]
async fn search_with_no_matches_is_an_empty_list() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let (status, body) = send(
        &app.router,
        post_json("/api/pdfs/search", Some(&token), json!({"term": "zeppelin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn search_without_a_term_is_bad_request() {
    let app = build_app(false);
    let token = bearer_token(app.user_id);
    let (status, body) = send(
        &app.router,
        post_json("/api/pdfs/search", Some(&token), json!({"term": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search term is required.");
}
