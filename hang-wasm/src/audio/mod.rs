//! The audio playback pipeline: a decoder driver feeding a fixed-capacity
//! ring buffer, plus the captions/speaking sub-tracks that ride alongside it.

mod captions;
mod decoder;
mod ring;
mod speaking;

pub use captions::*;
pub use decoder::*;
pub use ring::*;
pub use speaking::*;
