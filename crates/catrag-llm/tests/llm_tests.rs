use catrag_core::config::{ChatSettings, Settings};
use catrag_core::traits::ChatModel;
use catrag_llm::{get_default_chat_model, EchoChatModel, OpenAiCompatChatModel};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ChatSettings {
    ChatSettings { base_url: format!("{}/v1beta/openai/", server.uri()), ..Default::default() }
}

#[tokio::test]
async fn echo_returns_the_prompt() {
    let answer = EchoChatModel.complete("Question: leave policy?").await.unwrap();
    assert_eq!(answer, "Question: leave policy?");
}

#[tokio::test]
async fn fake_switch_selects_echo() {
    std::env::set_var("APP_USE_FAKE_LLM", "1");
    let model = get_default_chat_model(&Settings::default()).unwrap();
    assert_eq!(model.model_id(), "echo");
}

#[tokio::test]
async fn sends_single_user_message_and_returns_content_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/openai/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gemini-2.5-pro",
            "temperature": 0.0,
            "messages": [{"role": "user", "content": "What report covers leave policy?"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "  - Leave Policy\n"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let model = OpenAiCompatChatModel::new("test-key", &settings_for(&server)).unwrap();
    let answer = model.complete("What report covers leave policy?").await.unwrap();

    assert_eq!(answer, "  - Leave Policy\n");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let model = OpenAiCompatChatModel::new("test-key", &settings_for(&server)).unwrap();
    let err = model.complete("hi").await.unwrap_err().to_string();
    assert!(err.contains("503") && err.contains("overloaded"), "{err}");
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let model = OpenAiCompatChatModel::new("test-key", &settings_for(&server)).unwrap();
    assert!(model.complete("hi").await.is_err());
}
