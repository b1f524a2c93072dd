use bytes::Bytes;
use tokio::sync::watch;
use web_async::Lock;

use crate::Error;

use super::Produce;

/// An independently decodable unit within a track.
///
/// A group is a finite, length-unknown ordered stream of frames; it is
/// closed either by the producer (normal end) or by a consumer racing
/// ahead and dropping it (see the jitter buffer in `hang-wasm`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group {
	pub sequence: u64,
}

impl Group {
	pub fn new(sequence: u64) -> Self {
		Self { sequence }
	}

	pub fn produce(self) -> Produce<GroupProducer, GroupConsumer> {
		let state = Lock::new(State::default());
		let (closed_tx, closed_rx) = watch::channel(None);

		let producer = GroupProducer {
			info: self,
			state: state.clone(),
			closed: closed_tx,
		};
		let consumer = GroupConsumer {
			info: self,
			state,
			closed: closed_rx,
			next_index: 0,
		};

		Produce { producer, consumer }
	}
}

#[derive(Default)]
struct State {
	// Append-only; frames are never removed so that every (possibly cloned)
	// consumer can read the full group at its own pace.
	frames: Vec<Bytes>,
	notify: Option<watch::Sender<usize>>,
}

/// Writes frames into a single group, in order.
pub struct GroupProducer {
	pub info: Group,
	state: Lock<State>,
	closed: watch::Sender<Option<Result<(), Error>>>,
}

impl GroupProducer {
	/// Append a frame to the group. Frames must be written in nondecreasing
	/// timestamp order by the caller (`hang`'s envelope encoder enforces this).
	pub fn write_frame(&mut self, frame: Bytes) {
		let mut state = self.state.lock();
		state.frames.push(frame);
		let len = state.frames.len();
		if let Some(notify) = &state.notify {
			notify.send_replace(len);
		}
	}

	/// Close the group normally; no more frames will follow.
	pub fn finish(mut self) {
		self.closed.send_if_modified(|c| {
			if c.is_some() {
				return false;
			}
			*c = Some(Ok(()));
			true
		});
	}

	/// Close the group with an error; used by the jitter buffer to cancel a
	/// group it has decided is stale.
	pub fn abort(mut self, err: Error) {
		self.closed.send_if_modified(|c| {
			if c.is_some() {
				return false;
			}
			*c = Some(Err(err));
			true
		});
	}
}

/// Reads frames from a single group, in order. Cloning yields an
/// independent reader over the same underlying (append-only) frame log.
#[derive(Clone)]
pub struct GroupConsumer {
	pub info: Group,
	state: Lock<State>,
	closed: watch::Receiver<Option<Result<(), Error>>>,
	next_index: usize,
}

impl GroupConsumer {
	/// Read the next frame, or `None` once the group is closed/cancelled and
	/// fully drained.
	pub async fn read_frame(&mut self) -> Result<Option<Bytes>, Error> {
		loop {
			{
				let mut state = self.state.lock();
				if self.next_index < state.frames.len() {
					let frame = state.frames[self.next_index].clone();
					self.next_index += 1;
					return Ok(Some(frame));
				}
				if state.notify.is_none() {
					let (tx, _rx) = watch::channel(state.frames.len());
					state.notify = Some(tx);
				}
			}

			let mut notify = {
				let state = self.state.lock();
				state.notify.as_ref().unwrap().subscribe()
			};
			let mut closed = self.closed.clone();

			tokio::select! {
				biased;
				res = notify.changed() => {
					if res.is_err() {
						continue;
					}
				}
				res = closed.wait_for(|c| c.is_some()) => {
					let state = self.state.lock();
					if self.next_index < state.frames.len() {
						continue;
					}
					drop(state);
					return match res {
						Ok(c) => c.clone().unwrap().map(|()| None),
						Err(_) => Ok(None),
					};
				}
			}
		}
	}

	/// Stop reading this group early, e.g. because the jitter buffer decided
	/// it is stale. Dropping the consumer is sufficient; this just documents intent.
	pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn frames_in_order() {
		let Produce { mut producer, mut consumer } = Group::new(0).produce();

		producer.write_frame(Bytes::from_static(b"a"));
		producer.write_frame(Bytes::from_static(b"b"));
		producer.finish();

		assert_eq!(consumer.read_frame().await.unwrap(), Some(Bytes::from_static(b"a")));
		assert_eq!(consumer.read_frame().await.unwrap(), Some(Bytes::from_static(b"b")));
		assert_eq!(consumer.read_frame().await.unwrap(), None);
	}

	#[tokio::test]
	async fn empty_group_is_immediate_eof() {
		let Produce { producer, mut consumer } = Group::new(0).produce();
		producer.finish();
		assert_eq!(consumer.read_frame().await.unwrap(), None);
	}

	#[tokio::test]
	async fn clones_read_independently() {
		let Produce { mut producer, mut a } = Group::new(0).produce();
		producer.write_frame(Bytes::from_static(b"a"));
		let mut b = a.clone();

		assert_eq!(a.read_frame().await.unwrap(), Some(Bytes::from_static(b"a")));
		// b wasn't advanced by a's read.
		assert_eq!(b.read_frame().await.unwrap(), Some(Bytes::from_static(b"a")));

		producer.finish();
		assert_eq!(a.read_frame().await.unwrap(), None);
		assert_eq!(b.read_frame().await.unwrap(), None);
	}
}
