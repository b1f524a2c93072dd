use web_time::Instant;

use crate::platform::DecodedVideo;

/// Holds at most two decoded frames: the one currently on screen and the
/// next one queued up. Keeping exactly two lets the caller swap to the next
/// frame at its presentation time without ever blocking on the decoder, and
/// without buffering more frames than necessary (extra buffering would only
/// add latency for a live stream).
pub struct PresentationBuffer {
	current: Option<DecodedVideo>,
	next: Option<DecodedVideo>,
}

impl Default for PresentationBuffer {
	fn default() -> Self {
		Self::new()
	}
}

impl PresentationBuffer {
	pub fn new() -> Self {
		Self { current: None, next: None }
	}

	/// Push a newly decoded frame, arriving with scheduling jitter `jitter`
	/// (see [`compute_jitter`]). With zero jitter the frame displays
	/// immediately, freeing whatever was on screen. Otherwise the frame is
	/// inserted into `{current, next}` in timestamp order: a frame older
	/// than `current` is dropped outright, and a frame sitting between
	/// `current` and `next` promotes `current` out (returned here) so the
	/// incoming frame can take its place without losing `next`.
	///
	/// Returns the frame that should be displayed immediately, if any.
	pub fn push(&mut self, frame: DecodedVideo, jitter: std::time::Duration) -> Option<DecodedVideo> {
		if jitter.is_zero() {
			return self.current.replace(frame);
		}

		if let Some(current) = &self.current {
			if frame.timestamp < current.timestamp {
				return None;
			}
		}

		if let Some(next) = &self.next {
			if frame.timestamp < next.timestamp {
				let displayed = self.current.take();
				self.current = Some(frame);
				return displayed;
			}
		}

		if self.next.is_some() {
			self.current = self.next.take();
		}
		self.next = Some(frame);
		None
	}

	/// Called once the `current` frame has been presented; promotes `next`.
	pub fn advance(&mut self) -> Option<DecodedVideo> {
		self.current = self.next.take();
		self.current.clone()
	}

	pub fn current(&self) -> Option<&DecodedVideo> {
		self.current.as_ref()
	}

	pub fn next_ready(&self) -> bool {
		self.next.is_some()
	}
}

/// Derives presentation jitter from the configured latency budget and the
/// stream's framerate: `max(latency - 1/framerate, 0)`.
pub fn compute_jitter(latency: std::time::Duration, framerate: f64) -> std::time::Duration {
	if framerate <= 0.0 {
		return latency;
	}
	let frame_period = std::time::Duration::from_secs_f64(1.0 / framerate);
	latency.saturating_sub(frame_period)
}

/// Estimates the drift between the media clock (frame timestamps) and the
/// wall clock, so the caller can schedule presentation at the right wall
/// time without needing every frame to fire a timer cancel/reset.
///
/// The estimate is the smallest `wall_time - media_time` offset observed
/// since the pipeline started: network and decode jitter only ever delay a
/// frame's arrival, never deliver it early, so the minimum across all
/// observations is the best estimate of the clocks' true (jitter-free) skew.
pub struct ClockSkew {
	origin: Instant,
	min_offset: Option<std::time::Duration>,
}

impl ClockSkew {
	pub fn new() -> Self {
		Self {
			origin: Instant::now(),
			min_offset: None,
		}
	}

	/// Record that `media_time` was observed at the current wall clock time.
	pub fn observe(&mut self, media_time: std::time::Duration) {
		let wall_elapsed = self.origin.elapsed();
		let sample = wall_elapsed.saturating_sub(media_time);

		self.min_offset = Some(match self.min_offset {
			None => sample,
			Some(prev) => prev.min(sample),
		});
	}

	/// Given a frame's media timestamp, returns the wall-clock `Instant` it
	/// should be presented at.
	pub fn present_at(&self, media_time: std::time::Duration) -> Instant {
		let offset = self.min_offset.unwrap_or_default();
		self.origin + media_time + offset
	}
}

impl Default for ClockSkew {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bytes::Bytes;
	use std::time::Duration;

	fn video(ms: u64) -> DecodedVideo {
		DecodedVideo {
			timestamp: Duration::from_millis(ms),
			opaque: Bytes::from_static(b"frame"),
		}
	}

	#[test]
	fn zero_jitter_displays_immediately() {
		let mut buf = PresentationBuffer::new();
		let shown = buf.push(video(0), Duration::ZERO);
		assert_eq!(shown, None); // nothing was on screen to free
		assert_eq!(buf.current().unwrap().timestamp, Duration::from_millis(0));

		let freed = buf.push(video(10), Duration::ZERO).unwrap();
		assert_eq!(freed.timestamp, Duration::from_millis(0));
		assert_eq!(buf.current().unwrap().timestamp, Duration::from_millis(10));
	}

	#[test]
	fn drops_frame_older_than_current() {
		let mut buf = PresentationBuffer::new();
		buf.push(video(20), Duration::from_millis(50));
		buf.advance(); // current = 20ms, next empty

		let shown = buf.push(video(10), Duration::from_millis(50));
		assert_eq!(shown, None);
		assert_eq!(buf.current().unwrap().timestamp, Duration::from_millis(20));
		assert!(!buf.next_ready());
	}

	#[test]
	fn frame_between_current_and_next_promotes_current_and_is_retained() {
		let jitter = Duration::from_millis(50);
		let mut buf = PresentationBuffer::new();
		buf.push(video(0), jitter);
		buf.advance(); // current = 0ms
		buf.push(video(30), jitter); // next = 30ms

		let promoted = buf.push(video(10), jitter).unwrap();
		assert_eq!(promoted.timestamp, Duration::from_millis(0));
		assert_eq!(buf.current().unwrap().timestamp, Duration::from_millis(10));
		assert_eq!(buf.advance().unwrap().timestamp, Duration::from_millis(30));
	}

	#[test]
	fn newest_frame_shifts_next_into_current() {
		let jitter = Duration::from_millis(50);
		let mut buf = PresentationBuffer::new();
		buf.push(video(0), jitter);
		assert!(buf.current().is_none());
		assert!(buf.next_ready());

		buf.push(video(10), jitter);
		assert_eq!(buf.current().unwrap().timestamp, Duration::from_millis(0));
		assert_eq!(buf.advance().unwrap().timestamp, Duration::from_millis(10));
	}

	#[test]
	fn jitter_subtracts_frame_period_and_clamps_to_zero() {
		assert_eq!(compute_jitter(Duration::from_millis(100), 30.0), Duration::from_millis(100).saturating_sub(Duration::from_secs_f64(1.0 / 30.0)));
		assert_eq!(compute_jitter(Duration::from_millis(10), 30.0), Duration::ZERO);
	}

	#[test]
	fn skew_converges_to_the_minimum_observed_offset() {
		let mut skew = ClockSkew::new();
		skew.observe(Duration::from_millis(0));
		let first = skew.present_at(Duration::from_millis(100));

		// A later, jitter-inflated sample must not move the estimate upward.
		skew.observe(Duration::from_millis(0));
		let second = skew.present_at(Duration::from_millis(100));
		assert!(second <= first);
	}
}
