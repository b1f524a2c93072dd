use moq_lite::coding::*;

use crate::model::{Frame, Timestamp};
use crate::Result;

/// A group of frames, decoded from the underlying `moq_lite::GroupConsumer`.
///
/// Each raw moq-lite frame is `varint(timestamp_us) ++ payload`; this wraps
/// that so callers see decoded [`Frame`]s instead of raw bytes. The first
/// frame read out of a group is always treated as the keyframe, matching how
/// [`super::TrackProducer`] rotates groups on every keyframe write.
pub struct GroupConsumer {
	pub info: moq_lite::Group,
	inner: moq_lite::GroupConsumer,
	emitted: bool,
}

impl GroupConsumer {
	pub fn new(inner: moq_lite::GroupConsumer) -> Self {
		Self {
			info: inner.info,
			inner,
			emitted: false,
		}
	}

	/// Read the next frame, decoding the timestamp header.
	///
	/// Returns `None` once the group is closed and fully drained.
	pub async fn read_frame(&mut self) -> Result<Option<Frame>> {
		let raw = match self.inner.read_frame().await? {
			Some(raw) => raw,
			None => return Ok(None),
		};
		Ok(Some(self.decode(raw)?))
	}

	fn decode(&mut self, mut raw: Bytes) -> Result<Frame> {
		let timestamp_us = u64::decode(&mut raw)?;
		let keyframe = !self.emitted;
		self.emitted = true;

		Ok(Frame {
			timestamp: Timestamp::from_micros(timestamp_us),
			keyframe,
			payload: raw,
		})
	}
}

impl From<moq_lite::GroupConsumer> for GroupConsumer {
	fn from(inner: moq_lite::GroupConsumer) -> Self {
		Self::new(inner)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use moq_lite::{Group, Produce};

	fn encode(timestamp_us: u64, payload: &[u8]) -> Bytes {
		let mut buf = BytesMut::new();
		timestamp_us.encode(&mut buf);
		buf.extend_from_slice(payload);
		buf.freeze()
	}

	#[tokio::test]
	async fn first_frame_is_keyframe() {
		let Produce { mut producer, consumer } = Group::new(0).produce();
		producer.write_frame(encode(0, b"a"));
		producer.write_frame(encode(1_000, b"b"));
		producer.finish();

		let mut group = GroupConsumer::new(consumer);
		let a = group.read_frame().await.unwrap().unwrap();
		assert!(a.keyframe);
		assert_eq!(a.timestamp, Timestamp::from_micros(0));

		let b = group.read_frame().await.unwrap().unwrap();
		assert!(!b.keyframe);
		assert_eq!(b.timestamp, Timestamp::from_micros(1_000));

		assert!(group.read_frame().await.unwrap().is_none());
	}
}
