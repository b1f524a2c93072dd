use crate::platform::PlatformAudioDecoder;
use crate::{Error, Result};

use super::Ring;

/// Drives a [`PlatformAudioDecoder`] from a hang track, feeding its output
/// into a [`Ring`] buffer for playback.
///
/// Enforces the single-outstanding-decode constraint: `push` refuses a new
/// frame until the previous one's output has been collected with `drain`.
pub struct Decoder<D: PlatformAudioDecoder> {
	inner: D,
	ring: Ring,
	pending: bool,
}

impl<D: PlatformAudioDecoder> Decoder<D> {
	pub fn new(inner: D, ring_capacity_frames: usize, channel_count: usize, sample_rate: u32) -> Self {
		Self {
			inner,
			ring: Ring::new(ring_capacity_frames, channel_count, sample_rate),
			pending: false,
		}
	}

	/// Submit a frame for decoding. Returns [`Error::MultipleDecoders`] if
	/// the previous frame hasn't been collected with [`Self::drain`] yet.
	pub fn push(&mut self, frame: &hang::Frame) -> Result<()> {
		if self.pending {
			return Err(Error::MultipleDecoders);
		}
		self.inner.decode(frame)?;
		self.pending = true;
		Ok(())
	}

	/// Collect whatever output the decoder has produced so far and append
	/// it to the ring buffer, clearing the in-flight marker so [`Self::push`]
	/// can accept the next frame. Call this on every decoder output event
	/// (or, in tests, right after `push`).
	pub fn drain(&mut self) {
		for decoded in self.inner.poll() {
			let ts_us = decoded.timestamp.as_micros() as u64;
			// A mismatched write (wrong channel count from a misbehaving
			// decoder) is dropped rather than propagated; the ring's own
			// gap-fill/discard logic already tolerates holes.
			let _ = self.ring.write(ts_us, &decoded.samples);
		}
		self.pending = false;
	}

	/// Pull `frame_count` frames of interleaved PCM for playback, padding
	/// with silence if the decoder hasn't kept up.
	pub fn read(&mut self, frame_count: usize) -> Vec<f32> {
		self.ring.read(frame_count)
	}

	pub fn is_refilling(&self) -> bool {
		self.ring.is_refilling()
	}

	/// Discard buffered audio and reset the underlying decoder, e.g. after
	/// a jitter-buffer group skip.
	pub fn reset(&mut self) {
		self.inner.reset();
		self.pending = false;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::platform::DecodedAudio;
	use bytes::Bytes;

	struct FakeDecoder {
		output: Vec<DecodedAudio>,
	}

	impl PlatformAudioDecoder for FakeDecoder {
		fn decode(&mut self, _frame: &hang::Frame) -> Result<()> {
			Ok(())
		}
		fn poll(&mut self) -> Vec<DecodedAudio> {
			std::mem::take(&mut self.output)
		}
		fn reset(&mut self) {
			self.output.clear();
		}
	}

	fn frame() -> hang::Frame {
		hang::Frame {
			timestamp: hang::Timestamp::ZERO,
			keyframe: true,
			payload: Bytes::from_static(b"x"),
		}
	}

	#[test]
	fn pushes_through_to_ring() {
		let fake = FakeDecoder {
			output: vec![DecodedAudio {
				timestamp: hang::Timestamp::ZERO,
				samples: vec![0.5, 0.5],
				sample_rate: 48_000,
				channel_count: 1,
			}],
		};
		// Ring capacity matches the single decoded frame exactly, so the
		// pre-roll gate clears immediately and real samples come back.
		let mut decoder = Decoder::new(fake, 2, 1, 48_000);
		decoder.push(&frame()).unwrap();
		decoder.drain();
		assert_eq!(decoder.read(2), vec![0.5, 0.5]);
	}

	#[test]
	fn rejects_second_push_before_drain() {
		let fake = FakeDecoder { output: vec![] };
		let mut decoder = Decoder::new(fake, 4, 1, 48_000);
		decoder.push(&frame()).unwrap();
		assert!(matches!(decoder.push(&frame()), Err(Error::MultipleDecoders)));
		decoder.drain();
		assert!(decoder.push(&frame()).is_ok());
	}

	#[test]
	fn refilling_when_no_output_yet() {
		let fake = FakeDecoder { output: vec![] };
		let mut decoder = Decoder::new(fake, 4, 1, 48_000);
		decoder.push(&frame()).unwrap();
		decoder.drain();
		let out = decoder.read(2);
		assert_eq!(out, vec![0.0, 0.0]);
		assert!(decoder.is_refilling());
	}
}
