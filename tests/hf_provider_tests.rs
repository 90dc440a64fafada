use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use talait::application_impl::RealTranslateService;
use talait::application_port::*;
use talait::domain_model::{UserId, UserIdentity};
use talait::domain_port::TranslationProvider;
use talait::infra_http::{HfInferenceConfig, HfInferenceProvider};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "Helsinki-NLP/opus-mt-fr-en";
const MODEL_PATH: &str = "/models/Helsinki-NLP/opus-mt-fr-en";

fn provider(server: &MockServer, api_key: Option<&str>) -> HfInferenceProvider {
    HfInferenceProvider::new(HfInferenceConfig {
        base_url: server.uri(),
        api_key: api_key.map(str::to_string),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_list_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("authorization", "Bearer hf_test"))
        .and(body_json(json!({ "inputs": "Bonjour" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "translation_text": "Hello" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = provider(&server, Some("hf_test"))
        .translate(MODEL, "Bonjour")
        .await
        .unwrap();

    assert_eq!(text, "Hello");
}

#[tokio::test]
async fn test_single_object_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "translation_text": "Hello" })),
        )
        .mount(&server)
        .await;

    let text = provider(&server, Some("hf_test"))
        .translate(MODEL, "Bonjour")
        .await
        .unwrap();

    assert_eq!(text, "Hello");
}

#[tokio::test]
async fn test_empty_list_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = provider(&server, Some("hf_test"))
        .translate(MODEL, "Bonjour")
        .await;

    assert!(matches!(result, Err(TranslateError::ProviderUnavailable(_))));
}

#[tokio::test]
async fn test_upstream_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model is loading"))
        .mount(&server)
        .await;

    let result = provider(&server, Some("hf_test"))
        .translate(MODEL, "Bonjour")
        .await;

    assert!(matches!(result, Err(TranslateError::ProviderUnavailable(_))));
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let missing = provider(&server, None).translate(MODEL, "Bonjour").await;
    let empty = provider(&server, Some("")).translate(MODEL, "Bonjour").await;

    assert!(matches!(missing, Err(TranslateError::MissingApiKey)));
    assert!(matches!(empty, Err(TranslateError::MissingApiKey)));
}

#[tokio::test]
async fn test_service_builds_model_from_languages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/Helsinki-NLP/opus-mt-en-de"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "translation_text": "Hallo" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = RealTranslateService::new(
        Arc::new(provider(&server, Some("hf_test"))),
        "Helsinki-NLP/opus-mt-{source}-{target}".to_string(),
    );
    let actor = UserIdentity {
        id: UserId(1),
        username: "alice".to_string(),
        password_hash: String::new(),
        created_at: chrono::Utc::now(),
    };

    let result = service
        .translate(
            &actor,
            TranslateInput {
                text: "Hello".to_string(),
                source_language: "en".to_string(),
                target_language: "de".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.translated_text, "Hallo");
}
