use hang::moq_lite;

use crate::Result;

/// Reads UTF-8 caption text published on a broadcast's captions sub-track.
pub struct Captions {
	track: moq_lite::TrackConsumer,
}

impl Captions {
	pub fn new(track: moq_lite::TrackConsumer) -> Self {
		Self { track }
	}

	/// Wait for the next caption string. Returns `None` once the track ends.
	pub async fn next(&mut self) -> Result<Option<String>> {
		let group = match self.track.next_group().await? {
			Some(group) => group,
			None => return Ok(None),
		};
		let mut group = group;
		let frame = match group.read_frame().await? {
			Some(frame) => frame,
			None => return Ok(None),
		};
		Ok(Some(String::from_utf8_lossy(&frame.payload).into_owned()))
	}
}
