//! Playback pipelines for `hang` broadcasts: audio/video decode driving,
//! jitter-tolerant presentation pacing, and reactive orchestration of a
//! watched broadcast's catalog.
//!
//! The actual decoders ([`platform::PlatformAudioDecoder`],
//! [`platform::PlatformVideoDecoder`]) are a trait boundary rather than a
//! concrete WebCodecs binding, so the buffering/pacing/orchestration logic
//! in this crate can be exercised in tests without a browser.

mod broadcast;
mod error;

pub mod audio;
pub mod platform;
pub mod reactive;
pub mod video;

pub use broadcast::*;
pub use error::*;
