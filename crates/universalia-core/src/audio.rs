//! PCM decoding and WAV framing.
//!
//! Pure functions — no I/O, no async runtime.

use std::time::Duration;

/// Gemini TTS output format: 24 kHz mono 16-bit signed LE.
pub const SAMPLE_RATE: u32 = 24_000;
pub const CHANNELS: u16 = 1;

const BYTES_PER_SAMPLE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    #[error("invalid audio data: {len} bytes of {channels}-channel 16-bit PCM")]
    InvalidAudioData { len: usize, channels: u16 },
}

/// Decoded audio, one `Vec<f32>` per channel, samples in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channels.len() as u16
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn channel_data(&self, channel: usize) -> Option<&[f32]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Re-interleave channels for output devices that want frame order.
    pub fn interleaved(&self) -> Vec<f32> {
        let frames = self.frames();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for i in 0..frames {
            for ch in &self.channels {
                out.push(ch[i]);
            }
        }
        out
    }
}

/// Decode raw interleaved little-endian i16 PCM into per-channel floats.
///
/// Each sample is `i16 / 32768.0`, so the result always lies in `[-1.0, 1.0)`.
pub fn decode_raw_audio(
    bytes: &[u8],
    sample_rate: u32,
    channel_count: u16,
) -> Result<AudioBuffer, AudioError> {
    let frame_bytes = BYTES_PER_SAMPLE * channel_count as usize;
    if frame_bytes == 0 || bytes.len() % frame_bytes != 0 {
        return Err(AudioError::InvalidAudioData {
            len: bytes.len(),
            channels: channel_count,
        });
    }

    let frames = bytes.len() / frame_bytes;
    let mut channels: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();
    for frame in bytes.chunks_exact(frame_bytes) {
        for (ch, pair) in channels.iter_mut().zip(frame.chunks_exact(BYTES_PER_SAMPLE)) {
            let sample = i16::from_le_bytes([pair[0], pair[1]]);
            ch.push(sample as f32 / 32768.0);
        }
    }

    Ok(AudioBuffer {
        sample_rate,
        channels,
    })
}

/// [`decode_raw_audio`] with the TTS voice format (24 kHz mono).
pub fn decode_default(bytes: &[u8]) -> Result<AudioBuffer, AudioError> {
    decode_raw_audio(bytes, SAMPLE_RATE, CHANNELS)
}

/// Wrap raw 16-bit PCM in a minimal RIFF/WAVE container.
pub fn pcm_to_wav(pcm: &[u8], sample_rate: u32, channel_count: u16) -> Result<Vec<u8>, AudioError> {
    let invalid = || AudioError::InvalidAudioData {
        len: pcm.len(),
        channels: channel_count,
    };
    let frame_bytes = BYTES_PER_SAMPLE * channel_count as usize;
    if frame_bytes == 0 || pcm.len() % frame_bytes != 0 {
        return Err(invalid());
    }

    // Header size fields are fixed-width.
    let data_len = u32::try_from(pcm.len()).map_err(|_| invalid())?;
    let riff_len = data_len.checked_add(36).ok_or_else(invalid)?;
    let block_align = u16::try_from(frame_bytes).map_err(|_| invalid())?;
    let byte_rate = sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(invalid)?;
    let mut buf = Vec::with_capacity(44 + pcm.len());

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&riff_len.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&channel_count.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_len.to_le_bytes());
    buf.extend_from_slice(pcm);

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcm(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn decode_scales_by_32768() {
        let buf = decode_default(&pcm(&[0, 16384, -32768, 32767])).unwrap();
        let data = buf.channel_data(0).unwrap();
        assert_eq!(data[0], 0.0);
        assert_eq!(data[1], 0.5);
        assert_eq!(data[2], -1.0);
        assert_eq!(data[3], 32767.0 / 32768.0);
        assert_eq!(buf.sample_rate(), 24_000);
        assert_eq!(buf.channel_count(), 1);
    }

    #[test]
    fn decode_odd_length_mono_fails() {
        let err = decode_raw_audio(&[0x01, 0x00, 0xFF], 24_000, 1).unwrap_err();
        assert_eq!(err, AudioError::InvalidAudioData { len: 3, channels: 1 });
    }

    #[test]
    fn decode_partial_stereo_frame_fails() {
        // 6 bytes = 3 samples, not a whole number of stereo frames
        assert!(decode_raw_audio(&[0; 6], 24_000, 2).is_err());
    }

    #[test]
    fn decode_zero_channels_fails() {
        assert!(decode_raw_audio(&[0; 4], 24_000, 0).is_err());
    }

    #[test]
    fn decode_deinterleaves_stereo() {
        let buf = decode_raw_audio(&pcm(&[100, -100, 200, -200]), 48_000, 2).unwrap();
        assert_eq!(buf.frames(), 2);
        assert_eq!(buf.channel_data(0).unwrap(), &[100.0 / 32768.0, 200.0 / 32768.0]);
        assert_eq!(buf.channel_data(1).unwrap(), &[-100.0 / 32768.0, -200.0 / 32768.0]);
        assert_eq!(
            buf.interleaved(),
            vec![100.0 / 32768.0, -100.0 / 32768.0, 200.0 / 32768.0, -200.0 / 32768.0]
        );
    }

    #[test]
    fn decode_is_deterministic_and_bounded() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let a = decode_default(&bytes).unwrap();
        let b = decode_default(&bytes).unwrap();
        let a_bits: Vec<u32> = a.channel_data(0).unwrap().iter().map(|s| s.to_bits()).collect();
        let b_bits: Vec<u32> = b.channel_data(0).unwrap().iter().map(|s| s.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
        assert!(a.channel_data(0).unwrap().iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn decode_empty_is_empty_buffer() {
        let buf = decode_default(&[]).unwrap();
        assert_eq!(buf.frames(), 0);
        assert_eq!(buf.duration(), Duration::ZERO);
    }

    #[test]
    fn duration_from_frames() {
        let buf = decode_default(&vec![0u8; 48_000]).unwrap();
        assert_eq!(buf.duration(), Duration::from_secs(1));
    }

    #[test]
    fn pcm_to_wav_produces_valid_header() {
        let wav = pcm_to_wav(&pcm(&[0; 100]), 24_000, 1).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(wav.len(), 44 + 200);
        let rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(rate, 24_000);
        let riff_size = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]);
        assert_eq!(riff_size, (wav.len() - 8) as u32);
        let byte_rate = u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]);
        assert_eq!(byte_rate, 48_000);
    }

    #[test]
    fn pcm_to_wav_rejects_byte_rate_overflow() {
        let err = pcm_to_wav(&[0; 4], u32::MAX, 2).unwrap_err();
        assert_eq!(err, AudioError::InvalidAudioData { len: 4, channels: 2 });
    }

    #[test]
    fn pcm_to_wav_rejects_oversized_frame() {
        // 40 000 channels × 2 bytes does not fit the 16-bit block-align field
        let err = pcm_to_wav(&vec![0; 80_000], 24_000, 40_000).unwrap_err();
        assert_eq!(err, AudioError::InvalidAudioData { len: 80_000, channels: 40_000 });
    }

    #[test]
    fn pcm_to_wav_rejects_odd_length() {
        assert!(pcm_to_wav(&[0x42], 24_000, 1).is_err());
    }
}
