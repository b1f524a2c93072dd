use futures::{stream::FuturesUnordered, FutureExt, StreamExt};

use moq_lite::coding::*;

use crate::model::{Frame, GroupConsumer, Timestamp};
use crate::{Error, Result};

/// A producer for hang-formatted media tracks.
///
/// This wraps a `moq_lite::TrackProducer` and adds hang-specific functionality
/// like automatic timestamp encoding and keyframe-based group management.
///
/// ## Group Management
///
/// Groups are automatically created and managed based on keyframes:
/// - When a keyframe is written, the current group is finished and a new one begins.
/// - Non-keyframes are appended to the current group.
/// - Each frame includes a timestamp header for proper playback timing.
#[derive(Clone)]
pub struct TrackProducer {
	pub inner: moq_lite::TrackProducer,
	group: Option<moq_lite::GroupProducer>,
}

impl TrackProducer {
	/// Create a new TrackProducer wrapping the given moq-lite producer.
	pub fn new(inner: moq_lite::TrackProducer) -> Self {
		Self { inner, group: None }
	}

	/// Write a frame to the track.
	///
	/// The frame's timestamp is automatically encoded as a header, and keyframes
	/// trigger the creation of new groups for efficient seeking and caching.
	///
	/// Frames should be written in nondecreasing timestamp order within a group.
	///
	/// Returns [`Error::Overflow`] if the frame's timestamp, in microseconds,
	/// doesn't fit in the wire's varint encoding.
	pub fn write(&mut self, frame: Frame) -> Result<()> {
		let timestamp = frame.timestamp.as_micros() as u64;
		let mut buf = BytesMut::new();
		encode_varint_checked(timestamp, &mut buf).map_err(|_| Error::Overflow)?;
		buf.extend_from_slice(&frame.payload);

		if frame.keyframe {
			if let Some(group) = self.group.take() {
				group.finish();
			}
		}

		let mut group = match self.group.take() {
			Some(group) => group,
			None => self.inner.create_group(),
		};

		group.write_frame(buf.freeze());
		self.group.replace(group);

		Ok(())
	}

	/// Close the current group (if any) and the underlying track.
	pub fn finish(mut self) {
		if let Some(group) = self.group.take() {
			group.finish();
		}
		self.inner.finish();
	}

	/// Create a consumer for this track.
	///
	/// Multiple consumers can be created from the same producer, each receiving
	/// a copy of all data written to the track.
	pub fn consume(&self) -> TrackConsumer {
		TrackConsumer::new(self.inner.consume())
	}
}

impl From<moq_lite::TrackProducer> for TrackProducer {
	fn from(inner: moq_lite::TrackProducer) -> Self {
		Self::new(inner)
	}
}

/// A frame read from a group, tagged with the sequence of the group it came
/// from so the consumer can merge frames from multiple open groups.
struct Pending {
	sequence: u64,
	frame: Frame,
}

/// A consumer for hang-formatted media tracks.
///
/// This wraps a `moq_lite::TrackConsumer` and adds timestamp decoding plus
/// latency-bounded group reordering: groups may overlap (a new group can
/// start before the previous one closes, e.g. for B-frame-like reordering),
/// so frames from every open group are merged by `(timestamp, sequence)`.
/// A group that falls too far behind the configured latency budget is
/// dropped outright rather than blocking playback.
pub struct TrackConsumer {
	pub inner: moq_lite::TrackConsumer,

	// Groups currently open, in increasing sequence order.
	groups: Vec<GroupConsumer>,

	// Frames read from `groups` but not yet returned to the caller, merged
	// across groups by (timestamp, sequence) when emitted.
	queue: Vec<Pending>,

	// Sequences below this have already been superseded; newly announced
	// groups below it are dropped immediately.
	floor: u64,

	// The timestamp of the last frame returned to the caller.
	max_timestamp: Timestamp,

	// How far a frame may sit ahead of a still-open, slower group before
	// that group is dropped and playback advances past it.
	latency: std::time::Duration,

	// Set once `inner.next_group()` has reported the track closed.
	track_closed: bool,
}

impl TrackConsumer {
	/// Create a new TrackConsumer wrapping the given moq-lite consumer.
	pub fn new(inner: moq_lite::TrackConsumer) -> Self {
		Self {
			inner,
			groups: Vec::new(),
			queue: Vec::new(),
			floor: 0,
			max_timestamp: Timestamp::default(),
			latency: std::time::Duration::ZERO,
			track_closed: false,
		}
	}

	/// Read the next frame from the track.
	///
	/// This method handles timestamp decoding, cross-group reordering, and
	/// latency management automatically. It will drop groups that are too
	/// far behind to maintain the configured latency target.
	///
	/// Returns `None` when the track has ended.
	pub async fn read(&mut self) -> Result<Option<Frame>> {
		loop {
			// Pull in everything that's already available without blocking,
			// so frames from every open group are considered before we
			// decide what to emit next.
			self.drain_ready_groups()?;
			self.drain_ready_frames()?;

			if let Some(frame) = self.pop_ready()? {
				return Ok(Some(frame));
			}

			if self.groups.is_empty() && self.queue.is_empty() && self.track_closed {
				return Ok(None);
			}

			self.await_progress().await?;
		}
	}

	/// Opportunistically pick up newly announced groups without blocking.
	fn drain_ready_groups(&mut self) -> Result<()> {
		loop {
			match self.inner.next_group().now_or_never() {
				Some(res) => match res? {
					Some(group) => self.add_group(GroupConsumer::new(group)),
					None => {
						self.track_closed = true;
						break;
					}
				},
				None => break,
			}
		}
		Ok(())
	}

	/// Opportunistically read ahead into every open group without blocking.
	fn drain_ready_frames(&mut self) -> Result<()> {
		let sequences: Vec<u64> = self.groups.iter().map(|g| g.info.sequence).collect();

		for sequence in sequences {
			loop {
				let Some(group) = self.groups.iter_mut().find(|g| g.info.sequence == sequence) else {
					break;
				};

				match group.read_frame().now_or_never() {
					Some(Ok(Some(frame))) => self.queue.push(Pending { sequence, frame }),
					Some(Ok(None)) => {
						self.groups.retain(|g| g.info.sequence != sequence);
						break;
					}
					Some(Err(err)) => return Err(err),
					None => break,
				}
			}
		}

		Ok(())
	}

	/// Decide whether the smallest buffered frame is safe to emit, dropping
	/// any still-open groups that have fallen behind the latency budget.
	fn pop_ready(&mut self) -> Result<Option<Frame>> {
		let Some((timestamp, sequence)) = self
			.queue
			.iter()
			.map(|p| (p.frame.timestamp, p.sequence))
			.min()
		else {
			return Ok(None);
		};

		let lowest_open = self.groups.iter().map(|g| g.info.sequence).min();

		if let Some(lowest) = lowest_open {
			if sequence > lowest {
				// A still-open, lower-sequence group might yet produce
				// something smaller; only proceed once it's fallen far
				// enough behind to blow the latency budget.
				if timestamp.saturating_sub(self.max_timestamp) < self.latency {
					return Ok(None);
				}

				tracing::debug!(skip_below = sequence, "dropping groups past the latency budget");
				self.floor = self.floor.max(sequence);
				self.groups.retain(|g| g.info.sequence >= sequence);
				self.queue.retain(|p| p.sequence >= sequence);
			}
		}

		let index = self
			.queue
			.iter()
			.position(|p| p.sequence == sequence && p.frame.timestamp == timestamp)
			.expect("candidate frame still in queue");
		let frame = self.queue.remove(index).frame;
		self.max_timestamp = frame.timestamp;
		Ok(Some(frame))
	}

	/// Add a newly announced group, dropping it immediately if it's already
	/// been superseded by a latency-driven skip.
	fn add_group(&mut self, group: GroupConsumer) {
		if group.info.sequence < self.floor {
			tracing::debug!(sequence = ?group.info.sequence, floor = self.floor, "dropping stale group");
			return;
		}
		self.groups.push(group);
	}

	/// Block until either a new group is announced or an open group
	/// produces its next frame (or ends).
	async fn await_progress(&mut self) -> Result<()> {
		if self.groups.is_empty() {
			if self.track_closed {
				return Ok(());
			}

			return match self.inner.next_group().await? {
				Some(group) => Ok(self.add_group(GroupConsumer::new(group))),
				None => {
					self.track_closed = true;
					Ok(())
				}
			};
		}

		let mut reads = FuturesUnordered::new();
		for group in self.groups.iter_mut() {
			let sequence = group.info.sequence;
			reads.push(async move { (sequence, group.read_frame().await) });
		}

		if self.track_closed {
			let (sequence, res) = reads.next().await.expect("groups is non-empty");
			drop(reads);
			self.apply_read(sequence, res)
		} else {
			tokio::select! {
				biased;
				next = self.inner.next_group() => {
					drop(reads);
					match next? {
						Some(group) => Ok(self.add_group(GroupConsumer::new(group))),
						None => {
							self.track_closed = true;
							Ok(())
						}
					}
				},
				Some((sequence, res)) = reads.next() => {
					drop(reads);
					self.apply_read(sequence, res)
				}
			}
		}
	}

	fn apply_read(&mut self, sequence: u64, res: Result<Option<Frame>>) -> Result<()> {
		match res? {
			Some(frame) => self.queue.push(Pending { sequence, frame }),
			None => self.groups.retain(|g| g.info.sequence != sequence),
		}
		Ok(())
	}

	/// Set the maximum latency tolerance for this consumer.
	///
	/// A still-open group that falls more than `max` behind the newest
	/// buffered frame is dropped so playback can advance past it.
	pub fn set_latency(&mut self, max: std::time::Duration) {
		self.latency = max;
	}

	/// Wait until the track is closed.
	pub async fn closed(&self) -> Result<()> {
		Ok(self.inner.closed().await?)
	}
}

impl From<moq_lite::TrackConsumer> for TrackConsumer {
	fn from(inner: moq_lite::TrackConsumer) -> Self {
		Self::new(inner)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use moq_lite::Track;

	fn frame(ms: u64, keyframe: bool) -> Frame {
		Frame {
			timestamp: Timestamp::from_millis(ms),
			keyframe,
			payload: Bytes::from_static(b"x"),
		}
	}

	fn encode_raw(timestamp_us: u64, payload: &[u8]) -> Bytes {
		let mut buf = BytesMut::new();
		encode_varint_checked(timestamp_us, &mut buf).unwrap();
		buf.extend_from_slice(payload);
		buf.freeze()
	}

	#[tokio::test]
	async fn keyframes_rotate_groups() {
		let moq_lite::Produce { producer, consumer } = Track::new("video").produce();
		let mut producer: TrackProducer = producer.into();
		let mut consumer: TrackConsumer = consumer.into();

		producer.write(frame(0, true)).unwrap();
		producer.write(frame(10, false)).unwrap();
		producer.write(frame(20, true)).unwrap();
		producer.finish();

		let a = consumer.read().await.unwrap().unwrap();
		assert!(a.keyframe);
		let b = consumer.read().await.unwrap().unwrap();
		assert!(!b.keyframe);
		let c = consumer.read().await.unwrap().unwrap();
		assert!(c.keyframe);
		assert!(consumer.read().await.unwrap().is_none());
	}

	#[tokio::test]
	async fn groups_close_in_sequence_regardless_of_latency() {
		let moq_lite::Produce { producer, consumer } = Track::new("video").produce();
		let mut producer: TrackProducer = producer.into();
		let mut consumer: TrackConsumer = consumer.into();
		consumer.set_latency(std::time::Duration::from_millis(5));

		producer.write(frame(0, true)).unwrap();
		// New group; both groups close cleanly before latency ever matters.
		producer.write(frame(100, true)).unwrap();
		producer.finish();

		let first = consumer.read().await.unwrap().unwrap();
		assert_eq!(first.timestamp, Timestamp::from_millis(0));

		let second = consumer.read().await.unwrap().unwrap();
		assert_eq!(second.timestamp, Timestamp::from_millis(100));
		assert!(consumer.read().await.unwrap().is_none());
	}

	/// Scenario: group 1 opens (with a smaller timestamp) before group 0
	/// closes, simulating B-frame-like reordering across group boundaries.
	/// The consumer must interleave by timestamp, not drain group 0 first.
	#[tokio::test]
	async fn overlapping_groups_merge_by_timestamp() {
		let moq_lite::Produce { producer, consumer } = Track::new("video").produce();
		let mut producer: TrackProducer = producer.into();
		let mut consumer: TrackConsumer = consumer.into();
		consumer.set_latency(std::time::Duration::from_millis(100));

		// Group 0: frames at 0us and 40_000us.
		producer.write(frame(0, true)).unwrap();
		producer.write(frame(40, false)).unwrap();
		// Group 1 opens with an earlier timestamp than group 0's last frame.
		producer.write(frame(20, true)).unwrap();
		producer.write(frame(60, false)).unwrap();
		producer.finish();

		let timestamps: Vec<u64> = futures::stream::unfold(consumer, |mut consumer| async move {
			let frame = consumer.read().await.unwrap()?;
			Some((frame.timestamp.as_millis() as u64, consumer))
		})
		.collect()
		.await;

		assert_eq!(timestamps, vec![0, 20, 40, 60]);
	}

	/// Scenario: group 0 stalls (never closes, never produces more frames)
	/// while group 1 delivers data far enough ahead to blow the latency
	/// budget. The consumer must skip group 0 rather than wait forever.
	///
	/// Groups are created directly through the underlying `moq_lite`
	/// producer (bypassing `TrackProducer::write`'s keyframe-driven
	/// rotation) so group 0 can be left open indefinitely.
	#[tokio::test]
	async fn skips_stalled_group_once_latency_budget_exceeded() {
		let moq_lite::Produce {
			mut producer,
			consumer,
		} = Track::new("video").produce();

		let mut consumer: TrackConsumer = consumer.into();
		consumer.set_latency(std::time::Duration::from_millis(200));

		let mut group0 = producer.create_group();
		group0.write_frame(encode_raw(0, b"a"));
		group0.write_frame(encode_raw(20_000, b"b"));
		// group0 is intentionally never finished nor dropped, so it stalls.

		let mut group1 = producer.create_group();
		group1.write_frame(encode_raw(1_000_000, b"c"));
		group1.write_frame(encode_raw(1_020_000, b"d"));
		group1.finish();

		let first = consumer.read().await.unwrap().unwrap();
		assert_eq!(first.timestamp, Timestamp::from_micros(0));
		let second = consumer.read().await.unwrap().unwrap();
		assert_eq!(second.timestamp, Timestamp::from_micros(20_000));

		let third = consumer.read().await.unwrap().unwrap();
		assert_eq!(third.timestamp, Timestamp::from_micros(1_000_000));

		drop(group0); // only now may group0 be considered abandoned
	}
}
