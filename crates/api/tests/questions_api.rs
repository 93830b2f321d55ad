//! Integration tests for AI question generation.

mod common;

use common::{ok_json, post_json};

#[tokio::test]
async fn unreachable_agent_degrades_to_a_failure_payload() {
    let root = tempfile::tempdir().unwrap();
    let app = common::build_test_app(root.path());

    let response = post_json(
        app,
        "/api/v1/questions/generate",
        serde_json::json!({
            "api_key": "test-key",
            "topic": "Science",
            "difficulties": [1, 2],
            "num_questions": 2,
        }),
    )
    .await;
    let json = ok_json(response).await;

    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("try again"));
    assert_eq!(json.get("questions"), None);
    assert_eq!(json.get("count"), None);
}
