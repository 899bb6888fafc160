use serde_json::json;
use services::transcript::FAILURE_NOTICE;
use services::{AssistantConfig, AssistantError, AssistantService, ChatRole, Transcript};
use textbook_core::time::fixed_clock;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> AssistantService {
    AssistantService::new(Some(AssistantConfig {
        base_url: format!("{}/v1/", server.uri()),
        api_key: "test-key".into(),
        model: "tutor-test".into(),
    }))
}

#[tokio::test]
async fn answer_is_appended_to_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(bearer_token("test-key"))
        .and(body_partial_json(json!({ "model": "tutor-test" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "  The derivative of $x^2$ is $2x$.  " } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut transcript = Transcript::new(fixed_clock());
    let answer = service
        .ask(&mut transcript, "derivative of x^2?")
        .await
        .unwrap();

    assert_eq!(answer, "The derivative of $x^2$ is $2x$.");
    let roles: Vec<_> = transcript.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]
    );
    assert!(transcript.messages().iter().all(|m| !m.is_error));
}

#[tokio::test]
async fn server_error_appends_failure_marker() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut transcript = Transcript::new(fixed_clock());
    let err = service.ask(&mut transcript, "help").await.unwrap_err();

    assert!(matches!(err, AssistantError::HttpStatus(status) if status.as_u16() == 500));
    let last = transcript.last().unwrap();
    assert!(last.is_error);
    assert_eq!(last.text, FAILURE_NOTICE);
    assert_eq!(transcript.len(), 3);
}

#[tokio::test]
async fn empty_choice_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "   " } }]
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut transcript = Transcript::new(fixed_clock());
    let err = service.ask(&mut transcript, "help").await.unwrap_err();
    assert!(matches!(err, AssistantError::EmptyResponse));
    assert!(transcript.last().unwrap().is_error);
}

#[tokio::test]
async fn earlier_failures_are_not_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "ok" } }]
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut transcript = Transcript::new(fixed_clock());
    transcript.push_user("first try");
    transcript.push_failure();

    service.ask(&mut transcript, "second try").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let contents: Vec<&str> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["content"].as_str())
        .collect();
    assert!(!contents.contains(&FAILURE_NOTICE));
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(contents.last(), Some(&"second try"));
}

#[tokio::test]
async fn blank_question_and_disabled_service_leave_transcript_alone() {
    let disabled = AssistantService::new(None);
    assert!(!disabled.enabled());
    let mut transcript = Transcript::new(fixed_clock());

    let err = disabled.ask(&mut transcript, "anything").await.unwrap_err();
    assert!(matches!(err, AssistantError::Disabled));
    let err = disabled.ask(&mut transcript, "   ").await.unwrap_err();
    assert!(matches!(err, AssistantError::EmptyQuestion));

    assert_eq!(transcript.len(), 1);
}
