//! Audio playback — one scoped output stream per call.
//!
//! rodio's `OutputStream` is `!Send`, so each playback runs on its own
//! blocking thread: open the stream, append the buffer, wait until the sink
//! drains (or a deadline passes), stop, and drop the stream. The stream is
//! released on every path out of [`RodioOutput::play`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use universalia_core::audio::AudioBuffer;

use crate::error::PlaybackError;

/// Extra time allowed past the buffer's nominal length before playback is cut.
const DEFAULT_GRACE: Duration = Duration::from_secs(2);

/// Sink drain poll interval.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Somewhere decoded audio can be played. Blocking.
pub trait AudioOutput: Send + Sync + 'static {
    fn play(&self, buffer: AudioBuffer) -> Result<(), PlaybackError>;
}

/// Default output device via rodio.
#[derive(Debug, Clone)]
pub struct RodioOutput {
    grace: Duration,
}

impl Default for RodioOutput {
    fn default() -> Self {
        Self {
            grace: DEFAULT_GRACE,
        }
    }
}

impl RodioOutput {
    pub fn with_grace(grace: Duration) -> Self {
        Self { grace }
    }
}

impl AudioOutput for RodioOutput {
    fn play(&self, buffer: AudioBuffer) -> Result<(), PlaybackError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| PlaybackError::Output(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| PlaybackError::Output(e.to_string()))?;

        let deadline = Instant::now() + buffer.duration() + self.grace;
        debug!(
            "playback: {} frames @ {} Hz, {} ch",
            buffer.frames(),
            buffer.sample_rate(),
            buffer.channel_count()
        );

        sink.append(SamplesBuffer::new(
            buffer.channel_count(),
            buffer.sample_rate(),
            buffer.interleaved(),
        ));

        while !sink.empty() {
            if Instant::now() >= deadline {
                warn!("playback: deadline passed, cutting off");
                break;
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        sink.stop();
        drop(stream);
        debug!("playback: output stream released");
        Ok(())
    }
}

/// Play `buffer` on a blocking thread. Failures are logged, not returned.
pub fn play_detached<O: AudioOutput>(output: Arc<O>, buffer: AudioBuffer) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = output.play(buffer) {
            error!("playback failed: {e}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use universalia_core::audio::decode_default;

    #[derive(Default)]
    struct Recorder {
        frames: Mutex<Vec<usize>>,
    }

    impl AudioOutput for Recorder {
        fn play(&self, buffer: AudioBuffer) -> Result<(), PlaybackError> {
            self.frames.lock().unwrap().push(buffer.frames());
            Ok(())
        }
    }

    struct NoDevice;

    impl AudioOutput for NoDevice {
        fn play(&self, _buffer: AudioBuffer) -> Result<(), PlaybackError> {
            Err(PlaybackError::Output("no default output device".into()))
        }
    }

    #[tokio::test]
    async fn detached_playback_hands_buffer_to_output() {
        let recorder = Arc::new(Recorder::default());
        let buffer = decode_default(&[0u8; 480]).unwrap();
        play_detached(recorder.clone(), buffer).await.unwrap();
        assert_eq!(*recorder.frames.lock().unwrap(), vec![240]);
    }

    #[tokio::test]
    async fn detached_playback_swallows_device_errors() {
        let buffer = decode_default(&[0u8; 4]).unwrap();
        assert!(play_detached(Arc::new(NoDevice), buffer).await.is_ok());
    }

    #[test]
    fn grace_is_configurable() {
        assert_eq!(RodioOutput::default().grace, DEFAULT_GRACE);
        assert_eq!(
            RodioOutput::with_grace(Duration::from_millis(5)).grace,
            Duration::from_millis(5)
        );
    }
}
