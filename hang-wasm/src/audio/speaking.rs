use hang::moq_lite;

use crate::Result;

/// Reads voice-activity-detection updates published on a broadcast's
/// speaking sub-track: each group carries a single frame, a single byte
/// (0 = silent, nonzero = speaking).
pub struct Speaking {
	track: moq_lite::TrackConsumer,
	active: bool,
}

impl Speaking {
	pub fn new(track: moq_lite::TrackConsumer) -> Self {
		Self { track, active: false }
	}

	pub fn is_speaking(&self) -> bool {
		self.active
	}

	/// Wait for the next VAD state change. Returns `None` once the track ends.
	pub async fn next(&mut self) -> Result<Option<bool>> {
		let group = match self.track.next_group().await? {
			Some(group) => group,
			None => return Ok(None),
		};
		let mut group = group;
		let frame = match group.read_frame().await? {
			Some(frame) => frame,
			None => return Ok(None),
		};
		self.active = frame.payload.first().copied().unwrap_or(0) != 0;
		Ok(Some(self.active))
	}
}
