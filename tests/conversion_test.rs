mod common;

use common::{spawn_mock, MockService, TEST_API_KEY};
use pdf_audio_reader::audio::output::{manifest_file_name, write_segments, Manifest};
use pdf_audio_reader::config::ReaderConfig;
use pdf_audio_reader::error::ReaderError;
use pdf_audio_reader::pdf::test_support::build_pdf;
use pdf_audio_reader::services::conversion::{convert_pdf, ConversionRequest, NoProgress};
use pdf_audio_reader::session::Session;
use pdf_audio_reader::tts::{
    select_voice, AdmissionPolicy, ElevenLabsClient, ElevenLabsConfig, SpeechProvider,
};
use std::time::Duration;
use tempfile::TempDir;

fn reader_config(base_url: String) -> ReaderConfig {
    ReaderConfig {
        api_key: TEST_API_KEY.to_string(),
        base_url,
        max_chars: 40,
        inter_chunk_delay: Duration::from_millis(10),
        ..ReaderConfig::default()
    }
}

fn client(config: &ReaderConfig) -> ElevenLabsClient {
    ElevenLabsClient::new(ElevenLabsConfig::from_reader_config(config)).unwrap()
}

#[tokio::test]
async fn test_pdf_to_audio_files() {
    let service = MockService::new();
    let config = reader_config(spawn_mock(service.clone()).await);
    let client = client(&config);
    let mut session = Session::new(&config);

    let voices = client.list_voices().await.unwrap();
    let voice = select_voice(&voices, None).unwrap();
    assert_eq!(voice.name, "Josh");

    let pdf = build_pdf(&[
        "Chapter one begins here. The night was dark.",
        "Chapter two follows. Morning came at last.",
    ])
    .unwrap();

    let output = convert_pdf(
        &mut session,
        &client,
        ConversionRequest::new("story.pdf", &pdf, voice, &config),
        &mut NoProgress,
    )
    .await
    .unwrap();

    let seen = service.seen();
    assert_eq!(seen.len(), output.segments.len());
    assert!(seen.iter().all(|r| r.voice_id == "id-josh"));
    assert!(seen.iter().all(|r| r.model_id == "eleven_monolingual_v1"));
    assert!(seen.iter().all(|r| r.text.chars().count() <= 40));
    assert!(seen[0].text.starts_with("Chapter one"));

    let dir = TempDir::new().unwrap();
    let manifest = Manifest::new(
        &output.file_name,
        &output.voice.name,
        &output.model_id,
        &output.segments,
    );
    let written = write_segments(dir.path(), &manifest, &output.segments)
        .await
        .unwrap();

    assert_eq!(written.len(), output.segments.len());
    assert_eq!(written[0], dir.path().join("story.pdf_part_1.mp3"));
    let first = std::fs::read(&written[0]).unwrap();
    assert_eq!(first, format!("MP3:{}", seen[0].text).into_bytes());

    let manifest_json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(manifest_file_name("story.pdf"))).unwrap(),
    )
    .unwrap();
    assert_eq!(manifest_json["voice"], "Josh");
    assert_eq!(manifest_json["mime_type"], "audio/mp3");
    assert_eq!(
        manifest_json["parts"].as_array().unwrap().len(),
        output.segments.len()
    );
}

#[tokio::test]
async fn test_failed_chunk_aborts_conversion() {
    let service = MockService::failing_with(axum::http::StatusCode::TOO_MANY_REQUESTS);
    let config = reader_config(spawn_mock(service.clone()).await);
    let client = client(&config);
    let mut session = Session::new(&config);
    let voice = pdf_audio_reader::tts::Voice::new("id-josh", "Josh");

    let pdf = build_pdf(&["One sentence here. Another sentence there. And a third one."]).unwrap();
    let err = convert_pdf(
        &mut session,
        &client,
        ConversionRequest::new("fail.pdf", &pdf, &voice, &config),
        &mut NoProgress,
    )
    .await
    .unwrap_err();

    match &err {
        ReaderError::Synthesis { chunk, source } => {
            assert_eq!(*chunk, 1);
            assert!(matches!(**source, ReaderError::Api { status: 429, .. }));
        }
        other => panic!("expected Synthesis error, got {:?}", other),
    }
    assert!(err.is_retryable());
    assert_eq!(service.seen().len(), 1);
    assert_eq!(session.processed_count(), 0);
}

#[tokio::test]
async fn test_per_chunk_admission_stops_mid_document() {
    let service = MockService::new();
    let config = ReaderConfig {
        rate_limit_max_requests: 2,
        ..reader_config(spawn_mock(service.clone()).await)
    };
    let client = client(&config);
    let mut session = Session::new(&config);
    let voice = pdf_audio_reader::tts::Voice::new("id-josh", "Josh");

    let pdf = build_pdf(&[
        "A first sentence of the text. A second sentence of the text. A third sentence of the text.",
    ])
    .unwrap();
    let err = convert_pdf(
        &mut session,
        &client,
        ConversionRequest::new("gated.pdf", &pdf, &voice, &config)
            .with_admission(AdmissionPolicy::PerChunk),
        &mut NoProgress,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReaderError::RateLimited { .. }));
    assert_eq!(service.seen().len(), 2);
}
