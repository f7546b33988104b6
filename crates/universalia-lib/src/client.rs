//! Gemini service client — the only code that talks to the remote model.
//!
//! Two operations, each a single `generateContent` call with no retry:
//!
//! ```text
//! translate(text, direction) → structured JSON → TranslationResult
//! synthesize_speech(text)    → inline base64 PCM → raw bytes
//! ```
//!
//! The credential check happens before any request is built, so a missing key
//! never reaches the network.

use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use tracing::{debug, error, warn};

use universalia_core::prompt::{SYSTEM_INSTRUCTION, speech_prompt, translation_prompt};
use universalia_core::types::{ClientConfig, TranslationDirection, TranslationResult};

use crate::error::ServiceError;
use crate::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Modality,
    SpeechConfig, translation_schema,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// The two operations the presentation layer needs from the model service.
#[async_trait]
pub trait LanguageService: Send + Sync {
    async fn translate(
        &self,
        source_text: &str,
        direction: TranslationDirection,
    ) -> Result<TranslationResult, ServiceError>;

    /// Returns raw 16-bit PCM, already base64-decoded.
    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, ServiceError>;
}

/// Model output for a translation, validated field by field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationPayload {
    translated: String,
    ipa: String,
    morphology_breakdown: Vec<String>,
    grammar_notes: String,
}

/// Client for the Gemini REST API using API-key auth.
#[derive(Clone)]
pub struct GeminiClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Use a shared HTTP client.
    pub fn with_client(config: ClientConfig, client: reqwest::Client) -> Self {
        debug!(
            translation_model = %config.translation_model,
            speech_model = %config.speech_model,
            has_key = config.credential().is_some(),
            "gemini client initialized"
        );
        Self { config, client }
    }

    fn credential(&self) -> Result<&str, ServiceError> {
        self.config.credential().ok_or(ServiceError::CredentialMissing)
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn generate(
        &self,
        model: &str,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ServiceError> {
        let url = self.endpoint(model);
        debug!("POST {url}");

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("gemini request failed: {e}");
                ServiceError::from(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            error!("gemini error {status}: {text}");
            return Err(ServiceError::ServiceUnavailable {
                status: Some(status.as_u16()),
                message: text,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| {
            error!("gemini response body failed: {e}");
            ServiceError::from(e)
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("gemini response envelope did not parse: {e}");
            ServiceError::MalformedResponse(format!("response envelope: {e}"))
        })
    }
}

#[async_trait]
impl LanguageService for GeminiClient {
    async fn translate(
        &self,
        source_text: &str,
        direction: TranslationDirection,
    ) -> Result<TranslationResult, ServiceError> {
        let api_key = self.credential()?;

        let body = GenerateContentRequest {
            contents: vec![Content::user_text(translation_prompt(source_text, direction))],
            system_instruction: Some(Content::system_text(SYSTEM_INSTRUCTION)),
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".into()),
                response_schema: Some(translation_schema()),
                ..Default::default()
            },
        };

        debug!(
            "translate: {} chars, {:?}",
            source_text.chars().count(),
            direction
        );

        let response = self
            .generate(&self.config.translation_model, api_key, &body)
            .await?;

        let text = response.first_text().ok_or_else(|| {
            warn!("translate: response had no text part");
            ServiceError::MalformedResponse("no text in response".into())
        })?;

        let payload: TranslationPayload = serde_json::from_str(&text).map_err(|e| {
            warn!("translate: payload did not match schema: {e}");
            ServiceError::MalformedResponse(e.to_string())
        })?;

        Ok(TranslationResult {
            original: source_text.to_string(),
            translated: payload.translated,
            ipa: payload.ipa,
            morphology_breakdown: payload.morphology_breakdown,
            grammar_notes: payload.grammar_notes,
        })
    }

    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, ServiceError> {
        let api_key = self.credential()?;

        let body = GenerateContentRequest {
            contents: vec![Content::user_text(speech_prompt(text))],
            system_instruction: None,
            generation_config: GenerationConfig {
                response_modalities: Some(vec![Modality::Audio]),
                speech_config: Some(SpeechConfig::prebuilt(&self.config.voice)),
                ..Default::default()
            },
        };

        debug!("synthesize: {} chars, voice {}", text.len(), self.config.voice);

        let response = self.generate(&self.config.speech_model, api_key, &body).await?;

        let inline = response.first_inline_data().ok_or_else(|| {
            warn!("synthesize: no inline audio in response");
            ServiceError::NoAudioReturned
        })?;

        let pcm = base64::engine::general_purpose::STANDARD
            .decode(&inline.data)
            .map_err(|e| ServiceError::MalformedResponse(format!("inline audio: {e}")))?;

        debug!("synthesize: {} bytes ({})", pcm.len(), inline.mime_type);
        Ok(pcm)
    }
}
