//! universalia-lib — Translator engine.
//!
//! Gemini service client, scoped audio playback, the translator session that
//! backs the UI, and its HTTP API. Depends on universalia-core for pure types,
//! prompt text, and PCM decoding.

pub mod client;
pub mod error;
pub mod gemini;
pub mod playback;
pub mod server;
pub mod session;

// Re-export universalia-core for convenience
pub use universalia_core;
