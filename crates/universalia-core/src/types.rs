//! Shared types for the Universalia translator.
//!
//! Kept in universalia-core so the HTTP layer and any downstream UI can depend
//! on them without pulling in tokio, reqwest, or rodio.

use serde::{Deserialize, Serialize};

// ─── Service configuration ─────────────────────────────────────────────────

/// Default Gemini REST endpoint (API-key auth).
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TRANSLATION_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_VOICE: &str = "Kore";

/// The only environment variable the translator reads.
pub const API_KEY_ENV: &str = "API_KEY";

/// Service client configuration. Passed explicitly to the client so several
/// credentials or endpoints can coexist in one process.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub translation_model: String,
    pub speech_model: String,
    pub voice: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            translation_model: DEFAULT_TRANSLATION_MODEL.into(),
            speech_model: DEFAULT_SPEECH_MODEL.into(),
            voice: DEFAULT_VOICE.into(),
        }
    }
}

impl ClientConfig {
    /// Defaults plus the access credential from `API_KEY`, if set.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The configured key, treating an empty string as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

// ─── Translation types ─────────────────────────────────────────────────────

/// Which way a translation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TranslationDirection {
    /// Chinese (Mandarin) → Universalia.
    #[default]
    CnToUni,
    /// Universalia → Chinese (Mandarin).
    UniToCn,
}

impl TranslationDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::CnToUni => Self::UniToCn,
            Self::UniToCn => Self::CnToUni,
        }
    }

    /// Human-readable label used in the model prompt.
    pub fn describe(self) -> &'static str {
        match self {
            Self::CnToUni => "Chinese (Mandarin) to Universalia",
            Self::UniToCn => "Universalia to Chinese (Mandarin)",
        }
    }
}

/// Why a request could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("input text is empty")]
pub struct EmptyText;

/// A single translation request. Only constructible from non-blank text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    source_text: String,
    direction: TranslationDirection,
}

impl TranslationRequest {
    pub fn new(
        source_text: impl Into<String>,
        direction: TranslationDirection,
    ) -> Result<Self, EmptyText> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return Err(EmptyText);
        }
        Ok(Self {
            source_text,
            direction,
        })
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn direction(&self) -> TranslationDirection {
        self.direction
    }
}

/// A single speech synthesis request. Only constructible from non-blank text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    text: String,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Result<Self, EmptyText> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EmptyText);
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Structured translation returned by the model, plus the original input.
///
/// All four model fields arrive together or not at all; there is no way to
/// build a partially populated result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original: String,
    pub translated: String,
    /// IPA transcription with a stress marker.
    pub ipa: String,
    /// One entry per derived word, explained in Chinese.
    pub morphology_breakdown: Vec<String>,
    pub grammar_notes: String,
}

// ─── Rule catalog ──────────────────────────────────────────────────────────

/// A read-only description of one language rule, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_toggles_both_ways() {
        assert_eq!(TranslationDirection::CnToUni.toggled(), TranslationDirection::UniToCn);
        assert_eq!(TranslationDirection::UniToCn.toggled(), TranslationDirection::CnToUni);
    }

    #[test]
    fn direction_wire_names() {
        let json = serde_json::to_string(&TranslationDirection::CnToUni).unwrap();
        assert_eq!(json, "\"CN_TO_UNI\"");
        let back: TranslationDirection = serde_json::from_str("\"UNI_TO_CN\"").unwrap();
        assert_eq!(back, TranslationDirection::UniToCn);
    }

    #[test]
    fn blank_requests_rejected() {
        assert_eq!(
            TranslationRequest::new("   \n", TranslationDirection::CnToUni),
            Err(EmptyText)
        );
        assert_eq!(SpeechRequest::new(""), Err(EmptyText));
    }

    #[test]
    fn request_keeps_text_untrimmed() {
        let req = TranslationRequest::new(" 我爱你 ", TranslationDirection::CnToUni).unwrap();
        assert_eq!(req.source_text(), " 我爱你 ");
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let config = ClientConfig::default().with_api_key("  ");
        assert_eq!(config.credential(), None);
        let config = ClientConfig::default().with_api_key("AIza-test");
        assert_eq!(config.credential(), Some("AIza-test"));
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = TranslationResult {
            original: "我爱你".into(),
            translated: "Mi amas vin".into(),
            ipa: "[mi 'a.mas vin]".into(),
            morphology_breakdown: vec!["amas: am (root) + as".into()],
            grammar_notes: "SVO".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["morphologyBreakdown"][0], "amas: am (root) + as");
        assert_eq!(json["grammarNotes"], "SVO");
    }
}
