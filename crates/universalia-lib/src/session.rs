//! Translator session — the state behind the UI.
//!
//! Holds input text, direction, loading/speaking flags, and the last result or
//! error in a `watch` channel so any front end can render snapshots or
//! subscribe to changes.
//!
//! Guards live here, not in the client:
//! - one translation in flight (`Busy` otherwise),
//! - one speech request per cool-down window,
//! - an epoch counter bumped by [`TranslatorSession::swap_direction`]; a
//!   translation that completes under an older epoch is discarded (`Stale`).
//!
//! Translation failures are visible (localized message in `error`). Speech
//! failures are logged and swallowed; `speaking` resets after the cool-down
//! either way.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use universalia_core::audio::{self, AudioBuffer};
use universalia_core::rules::UNIVERSALIA_RULES;
use universalia_core::types::{
    RuleDescriptor, SpeechRequest, TranslationDirection, TranslationRequest, TranslationResult,
};

use crate::client::LanguageService;
use crate::error::SessionError;
use crate::playback::{AudioOutput, play_detached};

/// How long the speaking indicator stays on after a speech request settles.
pub const SPEAKING_COOLDOWN: Duration = Duration::from_secs(2);

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub input: String,
    pub direction: TranslationDirection,
    pub loading: bool,
    pub speaking: bool,
    pub result: Option<TranslationResult>,
    /// Localized, user-facing failure text.
    pub error: Option<String>,
}

/// Cloneable handle to one user's translator session.
pub struct TranslatorSession<S, O> {
    service: Arc<S>,
    output: Arc<O>,
    state_tx: watch::Sender<SessionState>,
    epoch: Arc<AtomicU64>,
    cooldown: Duration,
}

impl<S, O> Clone for TranslatorSession<S, O> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            output: self.output.clone(),
            state_tx: self.state_tx.clone(),
            epoch: self.epoch.clone(),
            cooldown: self.cooldown,
        }
    }
}

impl<S: LanguageService + 'static, O: AudioOutput> TranslatorSession<S, O> {
    pub fn new(service: S, output: O) -> Self {
        Self::with_cooldown(service, output, SPEAKING_COOLDOWN)
    }

    pub fn with_cooldown(service: S, output: O, cooldown: Duration) -> Self {
        let (state_tx, _) = watch::channel(SessionState::default());
        Self {
            service: Arc::new(service),
            output: Arc::new(output),
            state_tx,
            epoch: Arc::new(AtomicU64::new(0)),
            cooldown,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    pub fn rules(&self) -> &'static [RuleDescriptor] {
        UNIVERSALIA_RULES
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state_tx.send_modify(|s| s.input = text);
    }

    /// Toggle direction and clear input, result, and error. Any translation
    /// still in flight will be discarded when it returns.
    pub fn swap_direction(&self) -> TranslationDirection {
        let mut direction = TranslationDirection::default();
        self.state_tx.send_modify(|s| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            s.direction = s.direction.toggled();
            s.input.clear();
            s.result = None;
            s.error = None;
            s.loading = false;
            direction = s.direction;
        });
        debug!("session: direction now {:?}", direction);
        direction
    }

    /// Translate the current input in the current direction.
    ///
    /// On success the result replaces any previous one. On failure any stale
    /// result is cleared and a localized message is stored.
    pub async fn translate(&self) -> Result<TranslationResult, SessionError> {
        let mut start: Result<(TranslationRequest, u64), SessionError> = Err(SessionError::Busy);
        self.state_tx.send_if_modified(|s| {
            if s.loading {
                start = Err(SessionError::Busy);
                return false;
            }
            let Ok(request) = TranslationRequest::new(s.input.clone(), s.direction) else {
                start = Err(SessionError::EmptyInput);
                return false;
            };
            s.loading = true;
            s.result = None;
            s.error = None;
            start = Ok((request, self.epoch.load(Ordering::SeqCst)));
            true
        });
        let (request, epoch) = start?;
        let mut guard = LoadingGuard {
            state_tx: self.state_tx.clone(),
            epoch: self.epoch.clone(),
            owner: epoch,
            armed: true,
        };

        info!(
            "session: translating {} chars ({:?})",
            request.source_text().chars().count(),
            request.direction()
        );

        let outcome = self
            .service
            .translate(request.source_text(), request.direction())
            .await;
        guard.armed = false;

        let mut stale = false;
        self.state_tx.send_if_modified(|s| {
            if self.epoch.load(Ordering::SeqCst) != epoch {
                stale = true;
                return false;
            }
            s.loading = false;
            match &outcome {
                Ok(result) => s.result = Some(result.clone()),
                Err(e) => {
                    s.result = None;
                    s.error = Some(e.user_message().to_string());
                }
            }
            true
        });

        if stale {
            debug!("session: discarding translation from epoch {epoch}");
            return Err(SessionError::Stale);
        }

        outcome.map_err(|e| {
            warn!("session: translation failed: {e}");
            SessionError::Service(e)
        })
    }

    /// Pronounce the Universalia side of the current result.
    ///
    /// Returns whether audio was handed to the output. Service and decode
    /// failures are logged and reported as `Ok(false)`.
    pub async fn speak(&self) -> Result<bool, SessionError> {
        let mut start: Result<SpeechRequest, SessionError> = Err(SessionError::NoResult);
        self.state_tx.send_if_modified(|s| {
            if s.speaking {
                start = Err(SessionError::Busy);
                return false;
            }
            let Some(result) = &s.result else {
                start = Err(SessionError::NoResult);
                return false;
            };
            let text = match s.direction {
                TranslationDirection::CnToUni => result.translated.clone(),
                TranslationDirection::UniToCn => s.input.clone(),
            };
            let Ok(request) = SpeechRequest::new(text) else {
                start = Err(SessionError::NoResult);
                return false;
            };
            s.speaking = true;
            start = Ok(request);
            true
        });
        let request = start?;
        let _cooldown = CooldownGuard {
            state_tx: self.state_tx.clone(),
            cooldown: self.cooldown,
        };

        let played = match self.fetch_audio(request.text()).await {
            Some(buffer) => {
                // Playback outlives the request; its errors are logged on the blocking pool.
                drop(play_detached(self.output.clone(), buffer));
                true
            }
            None => false,
        };

        Ok(played)
    }

    /// Synthesize `text` and frame it as WAV for a browser to play.
    pub async fn speech_wav(&self, text: &str) -> Result<Vec<u8>, SessionError> {
        let request = SpeechRequest::new(text).map_err(|_| SessionError::EmptyInput)?;
        let pcm = self
            .service
            .synthesize_speech(request.text())
            .await
            .map_err(|e| {
                warn!("session: speech failed: {e}");
                SessionError::Speech(e)
            })?;
        Ok(audio::pcm_to_wav(&pcm, audio::SAMPLE_RATE, audio::CHANNELS)?)
    }

    async fn fetch_audio(&self, text: &str) -> Option<AudioBuffer> {
        let pcm = match self.service.synthesize_speech(text).await {
            Ok(pcm) => pcm,
            Err(e) => {
                warn!("session: speech failed: {e}");
                return None;
            }
        };
        match audio::decode_default(&pcm) {
            Ok(buffer) => Some(buffer),
            Err(e) => {
                warn!("session: {e}");
                None
            }
        }
    }
}

/// Clears `loading` if the translation future is dropped before it settles.
/// A swap hands the flag to a newer epoch, which this guard then leaves alone.
struct LoadingGuard {
    state_tx: watch::Sender<SessionState>,
    epoch: Arc<AtomicU64>,
    owner: u64,
    armed: bool,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let released = self.state_tx.send_if_modified(|s| {
            if !s.loading || self.epoch.load(Ordering::SeqCst) != self.owner {
                return false;
            }
            s.loading = false;
            true
        });
        if released {
            debug!("session: translation from epoch {} cancelled", self.owner);
        }
    }
}

/// Schedules the `speaking` reset when a speech request ends, cancelled or not.
struct CooldownGuard {
    state_tx: watch::Sender<SessionState>,
    cooldown: Duration,
}

impl Drop for CooldownGuard {
    fn drop(&mut self) {
        let state_tx = self.state_tx.clone();
        let cooldown = self.cooldown;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(cooldown).await;
                    state_tx.send_modify(|s| s.speaking = false);
                });
            }
            // No runtime to wait on; release immediately.
            Err(_) => state_tx.send_modify(|s| s.speaking = false),
        }
    }
}
