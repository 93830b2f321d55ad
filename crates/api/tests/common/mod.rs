//! Shared harness for API integration tests.
//!
//! Builds the full application router over a temporary data
//! directory, so every test exercises the same middleware stack
//! (CORS, request ID, timeout, tracing, panic recovery) that
//! production uses.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use unveil_agent::AgentClient;
use unveil_api::config::ServerConfig;
use unveil_api::router::build_app_router;
use unveil_api::state::AppState;
use unveil_core::character::Character;
use unveil_core::question::Question;
use unveil_store::Store;

/// Build a test `ServerConfig` rooted at `root`, with safe defaults
/// and agent URLs pointing at an unroutable local port.
pub fn test_config(root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: root.join("data"),
        password_file: root.join("password_admin.txt"),
        prompts_file: root.join("prompts.json"),
        background_file: root.join("default_background.jpg"),
        agent_prompt_url: "http://127.0.0.1:1/prompt".to_string(),
        agent_result_url: "http://127.0.0.1:1/result".to_string(),
        edit_deadline_secs: 1,
    }
}

/// Build the full application router over a temporary root directory.
pub fn build_test_app(root: &Path) -> Router {
    build_test_app_with(test_config(root))
}

/// Build the application router from an explicit configuration.
pub fn build_test_app_with(config: ServerConfig) -> Router {
    let store = Store::new(&config.data_dir);
    let agent = AgentClient::new(
        config.agent_prompt_url.clone(),
        config.agent_result_url.clone(),
    );

    let state = AppState {
        store: Arc::new(store),
        agent: Arc::new(agent),
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

// ---- request helpers ----

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert 200 and return the parsed JSON body.
pub async fn ok_json(response: Response<Body>) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---- multipart helper ----

/// A hand-rolled multipart/form-data body for upload tests.
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "unveil-test-boundary".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\ncontent-disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\ncontent-disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\ncontent-type: application/octet-stream\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn finish(mut self) -> (String, Vec<u8>) {
        let content_type = self.content_type();
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (content_type, self.body)
    }
}

pub async fn post_multipart(app: Router, uri: &str, multipart: MultipartBody) -> Response<Body> {
    let (content_type, body) = multipart.finish();
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---- data seeding ----

/// Seed a character folder with image files and an optional question
/// list, and append the character record to `characters.json`.
pub async fn seed_character(
    root: &Path,
    id: i64,
    name: &str,
    images: &[&str],
    questions: Option<Vec<Question>>,
) -> PathBuf {
    let store = Store::new(root.join("data"));
    let folder = store.create_character_folder(id, name).await.unwrap();

    for image in images {
        // Content is arbitrary bytes; only the filename matters for
        // ordering and MIME.
        tokio::fs::write(folder.join(image), format!("bytes-of-{image}"))
            .await
            .unwrap();
    }

    if let Some(questions) = questions {
        store.save_questions(&folder, questions).await.unwrap();
    }

    let mut characters = store.load_characters().await.unwrap();
    characters.push(Character {
        id,
        name: name.to_string(),
        original_image: folder.join(images.first().unwrap_or(&"0.png")).to_string_lossy().into_owned(),
        folder: folder.to_string_lossy().into_owned(),
    });
    store.save_characters(&characters).await.unwrap();

    folder
}

/// A simple two-question list used across game tests.
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            question: "What is the capital of France?".into(),
            options: vec!["Paris".into(), "Hanoi".into(), "London".into(), "Berlin".into()],
            answer: "Paris".into(),
        },
        Question {
            id: 2,
            question: "Which animal says 'meow'?".into(),
            options: vec!["Cat".into(), "Cow".into(), "Dog".into(), "Elephant".into()],
            answer: "Cat".into(),
        },
    ]
}
