//! ElevenLabs text-to-speech client

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::provider::SpeechProvider;
use super::voice::Voice;
use crate::config::ReaderConfig;
use crate::error::{ReaderError, Result};

const API_KEY_HEADER: &str = "xi-api-key";

#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ElevenLabsConfig {
    pub fn from_reader_config(config: &ReaderConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout,
        }
    }
}

pub struct ElevenLabsClient {
    config: ElevenLabsConfig,
    client: Client,
}

impl ElevenLabsClient {
    pub fn new(config: ElevenLabsConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ReaderError::MissingApiKey);
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[derive(Deserialize)]
struct VoicesResponse {
    voices: Vec<Voice>,
}

#[async_trait]
impl SpeechProvider for ElevenLabsClient {
    async fn list_voices(&self) -> Result<Vec<Voice>> {
        let response = self
            .client
            .get(self.url("/v1/voices"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach speech service for voice list");
                ReaderError::VoiceList(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Voice list request rejected");
            return Err(ReaderError::VoiceList(format!("{}: {}", status, body)));
        }

        let voices: VoicesResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse voices response");
            ReaderError::VoiceList(e.to_string())
        })?;

        tracing::debug!(count = voices.voices.len(), "Fetched voices");
        Ok(voices.voices)
    }

    async fn synthesize(&self, text: &str, voice_id: &str, model_id: &str) -> Result<Bytes> {
        let url = self.url(&format!("/v1/text-to-speech/{}", voice_id));

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&SynthesizeRequest { text, model_id })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ReaderError::Api { status, body });
        }

        Ok(response.bytes().await?)
    }
}
