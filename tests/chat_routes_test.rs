//! Request handling tests for the HTTP gateway
//!
//! Drives the axum router with `oneshot` against a scripted provider and a
//! temp-dir session log.

mod common;

use axum::http::{Method, StatusCode};
use caregp_chat::chat_id::is_generated_chat_id;
use caregp_chat::knowledge::KNOWLEDGE_PLACEHOLDER;
use caregp_chat::server::LIVENESS_MESSAGE;
use common::{post_chat, read_log, send, test_app, test_app_with_paths, ScriptedProvider};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_liveness_is_stable() {
    let app = test_app(ScriptedProvider::answering("unused"), None);

    for _ in 0..3 {
        let (status, body) = send(&app.router, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, LIVENESS_MESSAGE);
    }
    assert!(!app.session_log.exists());
    assert!(app.provider.prompts().is_empty());
}

#[tokio::test]
async fn test_new_chat_creates_session() {
    let app = test_app(
        ScriptedProvider::answering("We are open 8am to 6pm."),
        Some("Hours: 8am-6pm weekdays."),
    );

    let (status, body) = post_chat(&app.router, json!({"message": "What are your hours?"})).await;

    assert_eq!(status, StatusCode::OK);
    let chat_id = body["chat_id"].as_str().unwrap();
    assert!(is_generated_chat_id(chat_id), "bad chat_id {}", chat_id);
    assert_eq!(body["response"], "We are open 8am to 6pm.");

    let log = read_log(&app.session_log);
    let sessions = log.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["chat_id"], chat_id);
    assert_eq!(
        sessions[0]["messages"],
        json!([{"question": "What are your hours?", "response": "We are open 8am to 6pm."}])
    );
    assert!(sessions[0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_existing_chat_id_grows_by_one() {
    let app = test_app(ScriptedProvider::answering("answer"), Some("kb"));

    let (_, first) = post_chat(&app.router, json!({"message": "first"})).await;
    let chat_id = first["chat_id"].as_str().unwrap().to_string();
    let before = read_log(&app.session_log);

    let (status, second) =
        post_chat(&app.router, json!({"message": "second", "chat_id": chat_id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["chat_id"], chat_id.as_str());

    let after = read_log(&app.session_log);
    let before_messages = before[0]["messages"].as_array().unwrap();
    let after_messages = after[0]["messages"].as_array().unwrap();
    assert_eq!(after_messages.len(), before_messages.len() + 1);
    assert_eq!(&after_messages[..before_messages.len()], &before_messages[..]);
    assert_eq!(after_messages[1]["question"], "second");
    assert_eq!(after[0]["timestamp"], before[0]["timestamp"]);
}

#[tokio::test]
async fn test_sequential_messages_keep_call_order() {
    let app = test_app(ScriptedProvider::answering("ok"), Some("kb"));

    for i in 0..5 {
        let (status, _) = post_chat(
            &app.router,
            json!({"message": format!("question {}", i), "chat_id": "clinic-42"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let log = read_log(&app.session_log);
    assert_eq!(log.as_array().unwrap().len(), 1);
    let questions: Vec<&str> = log[0]["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["question"].as_str().unwrap())
        .collect();
    assert_eq!(
        questions,
        vec!["question 0", "question 1", "question 2", "question 3", "question 4"]
    );
}

#[tokio::test]
async fn test_blank_messages_are_rejected_without_side_effects() {
    let app = test_app(ScriptedProvider::answering("unused"), Some("kb"));

    for body in [
        json!({"message": ""}),
        json!({"message": "   \n\t "}),
        json!({"chat_id": "chat_123456"}),
        json!({}),
        json!({"message": null}),
        json!({"message": null, "chat_id": "chat_123456"}),
    ] {
        let (status, reply) = post_chat(&app.router, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(reply, json!({"error": "Empty message"}));
    }

    assert!(!app.session_log.exists());
    assert!(app.provider.prompts().is_empty());
}

#[tokio::test]
async fn test_blank_message_does_not_touch_existing_log() {
    let app = test_app(ScriptedProvider::answering("a"), Some("kb"));
    post_chat(&app.router, json!({"message": "hello", "chat_id": "c1"})).await;
    let before = std::fs::read_to_string(&app.session_log).unwrap();

    let (status, _) = post_chat(&app.router, json!({"message": " ", "chat_id": "c1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read_to_string(&app.session_log).unwrap(), before);
}

#[tokio::test]
async fn test_missing_knowledge_uses_placeholder() {
    let app = test_app(ScriptedProvider::answering("still answered"), None);

    let (status, body) = post_chat(&app.router, json!({"message": "Where are you?"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "still answered");

    let prompts = app.provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(KNOWLEDGE_PLACEHOLDER));
    assert!(prompts[0].contains("Where are you?"));
}

#[tokio::test]
async fn test_prompt_contains_knowledge_and_trimmed_question() {
    let app = test_app(
        ScriptedProvider::answering("  padded answer \n"),
        Some("Repeat prescriptions take 48 hours."),
    );

    let (_, body) = post_chat(&app.router, json!({"message": "  How long for repeats?  "})).await;
    assert_eq!(body["response"], "padded answer");

    let prompt = &app.provider.prompts()[0];
    assert!(prompt.contains("Repeat prescriptions take 48 hours."));
    assert!(prompt.contains("\nHow long for repeats?\n"));

    let log = read_log(&app.session_log);
    assert_eq!(log[0]["messages"][0]["question"], "How long for repeats?");
    assert_eq!(log[0]["messages"][0]["response"], "padded answer");
}

#[tokio::test]
async fn test_empty_chat_id_starts_new_session() {
    let app = test_app(ScriptedProvider::answering("ok"), Some("kb"));

    let (status, body) = post_chat(&app.router, json!({"message": "hi", "chat_id": ""})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(is_generated_chat_id(body["chat_id"].as_str().unwrap()));
}

#[tokio::test]
async fn test_model_failure_returns_500_and_logs_nothing() {
    let app = test_app(ScriptedProvider::failing("quota exhausted"), Some("kb"));

    let (status, body) = post_chat(&app.router, json!({"message": "hello"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("An error occurred: "));
    assert!(error.contains("quota exhausted"));

    assert_eq!(app.provider.prompts().len(), 1);
    assert!(!app.session_log.exists());
}

#[tokio::test]
async fn test_invalid_json_body_returns_500() {
    let app = test_app(ScriptedProvider::answering("unused"), Some("kb"));

    let (status, text) = send(&app.router, Method::POST, "/chat", Some("{not json")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("An error occurred: "));
    assert!(app.provider.prompts().is_empty());
}

#[tokio::test]
async fn test_session_log_failure_after_model_call_returns_500() {
    let dir = TempDir::new().unwrap();
    let session_log = dir.path().join("sessions_dir");
    std::fs::create_dir(&session_log).unwrap();
    let knowledge_path = dir.path().join("knowledge.txt");
    let app = test_app_with_paths(
        ScriptedProvider::answering("generated"),
        dir,
        session_log,
        knowledge_path,
    );

    let (status, body) = post_chat(&app.router, json!({"message": "hello"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Failed to record chat session"));
    assert_eq!(app.provider.prompts().len(), 1);
}

#[tokio::test]
async fn test_malformed_log_is_replaced() {
    let app = test_app(ScriptedProvider::answering("ok"), Some("kb"));
    std::fs::write(&app.session_log, "this is not json").unwrap();

    let (status, body) = post_chat(&app.router, json!({"message": "hi"})).await;
    assert_eq!(status, StatusCode::OK);

    let log = read_log(&app.session_log);
    assert_eq!(log.as_array().unwrap().len(), 1);
    assert_eq!(log[0]["chat_id"], body["chat_id"]);
}

#[tokio::test]
async fn test_non_utf8_log_is_replaced() {
    let app = test_app(ScriptedProvider::answering("ok"), Some("kb"));
    std::fs::write(&app.session_log, [0xff, 0xfe, b'[', b']']).unwrap();

    let (status, body) = post_chat(&app.router, json!({"message": "hi"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "ok");

    let log = read_log(&app.session_log);
    assert_eq!(log.as_array().unwrap().len(), 1);
    assert_eq!(log[0]["chat_id"], body["chat_id"]);
    assert_eq!(log[0]["messages"][0]["question"], "hi");
}

#[tokio::test]
async fn test_wrongly_typed_fields_return_500() {
    let app = test_app(ScriptedProvider::answering("unused"), Some("kb"));

    for body in [
        json!({"message": 42}),
        json!({"message": ["hi"]}),
        json!({"message": "hi", "chat_id": 7}),
    ] {
        let (status, reply) = post_chat(&app.router, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = reply["error"].as_str().unwrap();
        assert!(error.starts_with("An error occurred: "), "{}", error);
    }

    assert!(app.provider.prompts().is_empty());
    assert!(!app.session_log.exists());
}

#[tokio::test]
async fn test_concurrent_requests_on_one_session_are_all_recorded() {
    let app = test_app(ScriptedProvider::answering("ok"), Some("kb"));

    let mut handles = Vec::new();
    for i in 0..10 {
        let router = app.router.clone();
        handles.push(tokio::spawn(async move {
            post_chat(
                &router,
                json!({"message": format!("q{}", i), "chat_id": "shared"}),
            )
            .await
        }));
    }
    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let log = read_log(&app.session_log);
    assert_eq!(log[0]["messages"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = test_app(ScriptedProvider::answering("unused"), None);
    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header("origin", "https://clinic.example")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
