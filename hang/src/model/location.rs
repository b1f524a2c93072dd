use moq_lite::coding::*;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A spatial position, with each axis normalized to the range `-1.0..=1.0`
/// (0 being the center). Used both for the catalog's `location.initial` and
/// as the payload of a location-update track.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Position {
	pub x: f32,
	pub y: f32,
}

impl Position {
	pub fn new(x: f32, y: f32) -> Self {
		Self { x, y }
	}
}

// Wire format: two big-endian f32s, matching the rest of hang's binary
// (non-JSON) track payloads.
impl Encode for Position {
	fn encode<W: BufMut>(&self, w: &mut W) {
		w.put_f32(self.x);
		w.put_f32(self.y);
	}
}

impl Decode for Position {
	fn decode<R: Buf>(r: &mut R) -> std::result::Result<Self, DecodeError> {
		if r.remaining() < 8 {
			return Err(DecodeError::UnexpectedEnd);
		}
		Ok(Self {
			x: r.get_f32(),
			y: r.get_f32(),
		})
	}
}

/// A producer for a track of live [`Position`] updates.
#[derive(Clone)]
pub struct LocationProducer {
	pub track: moq_lite::TrackProducer,
}

impl LocationProducer {
	pub fn new(track: moq_lite::TrackProducer) -> Self {
		Self { track }
	}

	/// Publish a new position, replacing any prior one with a fresh group.
	pub fn update(&mut self, position: Position) {
		let mut buf = BytesMut::new();
		position.encode(&mut buf);

		let mut group = self.track.create_group();
		group.write_frame(buf.freeze());
		group.finish();
	}

	pub fn consume(&self) -> LocationConsumer {
		LocationConsumer::new(self.track.consume())
	}
}

/// A consumer for a track of live [`Position`] updates.
pub struct LocationConsumer {
	track: moq_lite::TrackConsumer,
}

impl LocationConsumer {
	pub fn new(track: moq_lite::TrackConsumer) -> Self {
		Self { track }
	}

	/// Wait for the next position update.
	pub async fn next(&mut self) -> Result<Option<Position>> {
		let group = match self.track.next_group().await? {
			Some(group) => group,
			None => return Ok(None),
		};
		let mut group = group;
		let frame = match group.read_frame().await? {
			Some(frame) => frame,
			None => return Err(Error::EmptyGroup),
		};
		let mut frame = frame;
		Ok(Some(Position::decode(&mut frame)?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn roundtrip() {
		let pos = Position::new(-0.5, 1.0);
		let mut buf = BytesMut::new();
		pos.encode(&mut buf);
		let mut buf = buf.freeze();
		assert_eq!(Position::decode(&mut buf).unwrap(), pos);
	}

	#[tokio::test]
	async fn publish_and_read() {
		let track = moq_lite::Track::new("location").produce();
		let mut producer = LocationProducer::new(track.producer);
		let mut consumer = LocationConsumer::new(track.consumer);

		producer.update(Position::new(0.25, -0.25));
		assert_eq!(consumer.next().await.unwrap(), Some(Position::new(0.25, -0.25)));
	}
}
