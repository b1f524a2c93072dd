use hang::catalog::Video;

use crate::platform::PlatformVideoDecoder;
use crate::{Error, Result};

use super::{compute_jitter, PresentationBuffer};

/// Drives a [`PlatformVideoDecoder`], feeding its output into a
/// [`PresentationBuffer`], and supports switching to a different rendition
/// mid-stream without a visible stall.
///
/// A switch doesn't tear down playback immediately: the old decoder keeps
/// draining its in-flight frame into the presentation buffer, and only the
/// *next* keyframe triggers the actual decoder swap, since a new rendition's
/// decoder can only be initialized at a keyframe boundary.
pub struct Decoder<D: PlatformVideoDecoder> {
	inner: D,
	presentation: PresentationBuffer,
	pending: bool,
	switch_to: Option<Video>,
	current: Option<Video>,
	latency: std::time::Duration,
}

impl<D: PlatformVideoDecoder> Decoder<D> {
	pub fn new(inner: D, rendition: Video) -> Self {
		Self {
			inner,
			presentation: PresentationBuffer::new(),
			pending: false,
			switch_to: None,
			current: Some(rendition),
			latency: std::time::Duration::ZERO,
		}
	}

	/// Request a rendition switch, applied at the next keyframe.
	pub fn switch(&mut self, rendition: Video) {
		self.switch_to = Some(rendition);
	}

	/// Set the presentation latency budget used to derive scheduling jitter
	/// (see [`compute_jitter`]) for frames handed to the presentation buffer.
	pub fn set_latency(&mut self, latency: std::time::Duration) {
		self.latency = latency;
	}

	/// Submit a frame for decoding.
	pub fn push(&mut self, frame: &hang::Frame, new_decoder: impl FnOnce() -> D) -> Result<()> {
		if self.pending {
			return Err(Error::MultipleDecoders);
		}

		if frame.keyframe {
			if let Some(rendition) = self.switch_to.take() {
				self.inner = new_decoder();
				self.current = Some(rendition);
			}
		}

		self.inner.decode(frame)?;
		self.pending = true;
		self.drain();
		Ok(())
	}

	fn drain(&mut self) {
		let framerate = self.current.as_ref().and_then(|v| v.config.framerate).unwrap_or(0.0);
		let jitter = compute_jitter(self.latency, framerate);
		for decoded in self.inner.poll() {
			self.presentation.push(decoded, jitter);
		}
		self.pending = false;
	}

	pub fn current_rendition(&self) -> Option<&Video> {
		self.current.as_ref()
	}

	pub fn advance(&mut self) -> Option<crate::platform::DecodedVideo> {
		self.presentation.advance()
	}
}
