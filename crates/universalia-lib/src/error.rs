//! Error types for the service client, playback, and session.

use thiserror::Error;

use universalia_core::audio::AudioError;

/// Shown to the end user for any translation failure; detail goes to the log.
pub const TRANSLATION_FAILED_MESSAGE: &str = "翻译失败，请检查 API Key 或网络连接。";

/// Shown when a browser asks for speech audio and none can be produced.
pub const SPEECH_FAILED_MESSAGE: &str = "语音生成失败，请稍后重试。";

/// Failures from the remote generative-AI service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No access credential configured. Raised before any network call.
    #[error("API key is missing")]
    CredentialMissing,

    /// Network error, timeout, or non-2xx response.
    #[error("service unavailable{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    ServiceUnavailable {
        status: Option<u16>,
        message: String,
    },

    /// A response arrived but did not match the declared schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Speech request succeeded but carried no inline audio.
    #[error("no audio data returned")]
    NoAudioReturned,
}

impl ServiceError {
    /// Localized text safe to show the end user after a failed translation.
    pub fn user_message(&self) -> &'static str {
        TRANSLATION_FAILED_MESSAGE
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        Self::ServiceUnavailable {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Failures opening or driving the audio output device.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio output unavailable: {0}")]
    Output(String),
}

/// Rejections and failures surfaced by the translator session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("input text is empty")]
    EmptyInput,

    /// A request of the same kind is already in flight.
    #[error("a request is already in progress")]
    Busy,

    #[error("no translation to pronounce")]
    NoResult,

    /// The direction was swapped while the request was in flight.
    #[error("response discarded after direction change")]
    Stale,

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Speech synthesis failed; kept apart so it never reads as a translation failure.
    #[error(transparent)]
    Speech(ServiceError),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_display_includes_status() {
        let e = ServiceError::ServiceUnavailable {
            status: Some(503),
            message: "overloaded".into(),
        };
        assert_eq!(e.to_string(), "service unavailable (503): overloaded");

        let e = ServiceError::ServiceUnavailable {
            status: None,
            message: "connection refused".into(),
        };
        assert_eq!(e.to_string(), "service unavailable: connection refused");
    }

    #[test]
    fn user_message_hides_detail() {
        let e = ServiceError::MalformedResponse("missing field `grammarNotes`".into());
        assert!(!e.user_message().contains("grammarNotes"));
        assert_eq!(e.user_message(), TRANSLATION_FAILED_MESSAGE);
    }
}
