use bytes::Bytes;

use crate::Result;

/// A single decoded chunk of PCM, interleaved `f32` samples at the decoder's
/// native sample rate and channel count.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedAudio {
	pub timestamp: hang::Timestamp,
	pub samples: Vec<f32>,
	pub sample_rate: u32,
	pub channel_count: u32,
}

/// A single decoded video frame, held opaquely: the pipeline never looks
/// inside it, only passes it through to the presentation buffer and then
/// out to whatever actually paints pixels (a `VideoFrame`/canvas on the web).
#[derive(Clone, Debug)]
pub struct DecodedVideo {
	pub timestamp: hang::Timestamp,
	pub opaque: Bytes,
}

/// Abstracts over a platform's audio decoder (WebCodecs `AudioDecoder` in a
/// browser) so the audio pipeline's buffering/gap-filling logic can be
/// exercised in tests without one.
///
/// Implementations must enforce a single outstanding `decode()` call: the
/// pipeline never calls `decode` again before the previous call's result has
/// been delivered via [`Self::poll`], but a well-behaved implementation
/// should still return [`crate::Error::MultipleDecoders`] if asked to.
pub trait PlatformAudioDecoder: Send {
	/// Submit a frame for decoding. Output, if any, is collected via [`Self::poll`].
	fn decode(&mut self, frame: &hang::Frame) -> Result<()>;

	/// Drain any decoded audio produced so far without blocking.
	fn poll(&mut self) -> Vec<DecodedAudio>;

	/// Reset internal state, e.g. after a gap or seek.
	fn reset(&mut self);
}

/// Abstracts over a platform's video decoder (WebCodecs `VideoDecoder`).
pub trait PlatformVideoDecoder: Send {
	fn decode(&mut self, frame: &hang::Frame) -> Result<()>;
	fn poll(&mut self) -> Vec<DecodedVideo>;
	fn reset(&mut self);
}
