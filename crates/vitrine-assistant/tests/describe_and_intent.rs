//! Product descriptions and intent classification against a mock model server

use std::sync::Arc;

use serde_json::json;
use vitrine_assistant::{
    AssistantError, Describer, Intent, IntentClassifier, LlmDescriber, LlmIntentClassifier,
    OpenAiChatModel,
};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

fn model(server: &MockServer) -> Arc<OpenAiChatModel> {
    Arc::new(OpenAiChatModel::with_base_url("sk-test", &server.uri()).unwrap())
}

#[tokio::test]
async fn test_description_request_carries_sampling_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 1.1,
            "top_p": 1.0,
            "max_tokens": 100,
            "presence_penalty": 0.6,
            "frequency_penalty": 0.5
        })))
        .and(body_string_contains("Trail Gloves"))
        .respond_with(completion("Soft fleece that keeps up with every climb."))
        .expect(1)
        .mount(&server)
        .await;

    let describer = LlmDescriber::new(model(&server), "gpt-4o-mini");
    let text = describer
        .describe("Trail Gloves", Some("Accessories"))
        .await
        .unwrap();

    assert_eq!(text, "Soft fleece that keeps up with every climb.");
}

#[tokio::test]
async fn test_description_rate_limit_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let describer = LlmDescriber::new(model(&server), "gpt-4o-mini");
    let result = describer.describe("Trail Gloves", None).await;

    assert!(matches!(result, Err(AssistantError::RateLimited(_))));
}

#[tokio::test]
async fn test_classifier_sends_user_message_at_zero_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "temperature": 0.0,
            "messages": [{"role": "user"}]
        })))
        .and(body_string_contains("I am customer 777"))
        .respond_with(completion(
            r#"{"intent":"identify_user","entities":{"customer_id":"777"}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = LlmIntentClassifier::new(model(&server), "gpt-4o-mini");
    let result = classifier.classify("I am customer 777").await.unwrap();

    assert_eq!(result.intent, Intent::IdentifyUser);
    assert_eq!(result.entity("customer_id").as_deref(), Some("777"));
}

#[tokio::test]
async fn test_unparseable_classification_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion("Sorry, I am not sure."))
        .mount(&server)
        .await;

    let classifier = LlmIntentClassifier::new(model(&server), "gpt-4o-mini");
    let result = classifier.classify("???").await.unwrap();

    assert_eq!(result.intent, Intent::Unknown);
    assert!(result.entities.is_empty());
}
