//! universalia-core — Pure types, PCM decoding, and prompt text.
//!
//! No async runtime, no I/O, no platform dependencies.

pub mod audio;
pub mod prompt;
pub mod rules;
pub mod types;
