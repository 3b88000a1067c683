mod common;

use axum::http::StatusCode;
use common::{spawn_mock, MockService, TEST_API_KEY};
use pdf_audio_reader::config::ReaderConfig;
use pdf_audio_reader::error::ReaderError;
use pdf_audio_reader::tts::{ElevenLabsClient, ElevenLabsConfig, SpeechProvider};
use std::time::Duration;

fn client(base_url: String, api_key: &str) -> ElevenLabsClient {
    ElevenLabsClient::new(ElevenLabsConfig {
        api_key: api_key.to_string(),
        base_url,
        timeout: Duration::from_secs(10),
    })
    .unwrap()
}

#[tokio::test]
async fn test_list_voices() {
    let base_url = spawn_mock(MockService::new()).await;
    let voices = client(base_url, TEST_API_KEY).list_voices().await.unwrap();

    assert_eq!(voices.len(), 2);
    assert_eq!(voices[1].name, "Josh");
    assert_eq!(voices[1].voice_id, "id-josh");
    assert_eq!(voices[0].category.as_deref(), Some("premade"));
}

#[tokio::test]
async fn test_wrong_key_is_voice_list_error() {
    let base_url = spawn_mock(MockService::new()).await;
    let result = client(base_url, "wrong-key").list_voices().await;

    match result {
        Err(ReaderError::VoiceList(message)) => assert!(message.contains("401")),
        other => panic!("expected VoiceList error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_synthesize_sends_text_voice_and_model() {
    let service = MockService::new();
    let base_url = spawn_mock(service.clone()).await;

    let audio = client(base_url, TEST_API_KEY)
        .synthesize("Hello world.", "id-josh", "eleven_monolingual_v1")
        .await
        .unwrap();

    assert_eq!(&audio[..], b"MP3:Hello world.");
    let seen = service.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].voice_id, "id-josh");
    assert_eq!(seen[0].text, "Hello world.");
    assert_eq!(seen[0].model_id, "eleven_monolingual_v1");
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let base_url = spawn_mock(MockService::failing_with(StatusCode::INTERNAL_SERVER_ERROR)).await;

    let err = client(base_url, TEST_API_KEY)
        .synthesize("Hello.", "id-josh", "eleven_monolingual_v1")
        .await
        .unwrap_err();

    match &err {
        ReaderError::Api { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "upstream failure");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_reader_config_with_trailing_slash() {
    let base_url = spawn_mock(MockService::new()).await;
    let reader = ReaderConfig {
        api_key: TEST_API_KEY.to_string(),
        base_url: format!("{}/", base_url),
        ..ReaderConfig::default()
    };

    let client = ElevenLabsClient::new(ElevenLabsConfig::from_reader_config(&reader)).unwrap();
    assert_eq!(client.list_voices().await.unwrap().len(), 2);
}
