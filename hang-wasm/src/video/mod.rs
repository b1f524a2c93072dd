//! The video playback pipeline: rendition selection, a decoder driver that
//! can switch renditions at a keyframe boundary, and a two-slot presentation
//! buffer paced against an estimate of wall-clock/media-clock skew.

mod decoder;
mod presentation;
mod rendition;

pub use decoder::*;
pub use presentation::*;
pub use rendition::*;
