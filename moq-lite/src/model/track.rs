use std::sync::{
	atomic::{AtomicUsize, Ordering},
	Arc,
};

use tokio::sync::watch;
use web_async::Lock;

use crate::Error;

use super::{Group, GroupConsumer, Produce};

/// An ordered stream of groups, identified by name within a broadcast.
///
/// Priority is advisory only; the core never interprets it, it just carries
/// it through to the transport collaborator's `subscribe(name, priority)` call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Track {
	pub name: String,
	pub priority: i8,
}

impl Track {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			priority: 0,
		}
	}

	pub fn priority(mut self, priority: i8) -> Self {
		self.priority = priority;
		self
	}

	pub fn produce(self) -> Produce<TrackProducer, TrackConsumer> {
		let state = Lock::new(State::default());
		let (closed_tx, closed_rx) = watch::channel(None);

		let producer = TrackProducer {
			info: self.clone(),
			state: state.clone(),
			closed: closed_tx,
			active: Arc::new(AtomicUsize::new(1)),
			next_sequence: 0,
		};
		let consumer = TrackConsumer {
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
	// Append-only log of groups; old entries are retained so that consumers
	// created earlier (and not yet caught up) can still see them.
	groups: Vec<GroupConsumer>,
	notify: Option<watch::Sender<usize>>,
}

/// Appends groups to a track. Can be cloned; the track closes once every
/// clone is dropped without an explicit `finish`/`abort`.
pub struct TrackProducer {
	pub info: Track,
	state: Lock<State>,
	closed: watch::Sender<Option<Result<(), Error>>>,
	active: Arc<AtomicUsize>,
	next_sequence: u64,
}

impl TrackProducer {
	/// Start a new group, appending it to the track immediately so that any
	/// consumer waiting on `next_group` is woken.
	pub fn create_group(&mut self) -> super::GroupProducer {
		let group = Group::new(self.next_sequence);
		self.next_sequence += 1;

		let Produce { producer, consumer } = group.produce();

		let mut state = self.state.lock();
		state.groups.push(consumer);
		let len = state.groups.len();
		if let Some(notify) = &state.notify {
			notify.send_replace(len);
		}

		producer
	}

	/// Convenience used by tests and simple publishers: open and immediately
	/// close an empty group.
	pub fn append_group(&mut self) -> super::GroupProducer {
		self.create_group()
	}

	pub fn consume(&self) -> TrackConsumer {
		let next_index = self.state.lock().groups.len();
		TrackConsumer {
			info: self.info.clone(),
			state: self.state.clone(),
			closed: self.closed.subscribe(),
			next_index,
		}
	}

	pub fn finish(&mut self) {
		self.closed.send_if_modified(|closed| {
			if closed.is_some() {
				return false;
			}
			*closed = Some(Ok(()));
			true
		});
	}

	pub fn abort(&mut self, err: Error) {
		self.closed.send_if_modified(|closed| {
			if closed.is_some() {
				return false;
			}
			*closed = Some(Err(err));
			true
		});
	}

	pub fn unused(&self) -> impl std::future::Future<Output = ()> {
		let closed = self.closed.clone();
		async move { closed.closed().await }
	}

	pub fn is_clone(&self, other: &Self) -> bool {
		self.closed.same_channel(&other.closed)
	}
}

impl Clone for TrackProducer {
	fn clone(&self) -> Self {
		self.active.fetch_add(1, Ordering::Relaxed);
		Self {
			info: self.info.clone(),
			state: self.state.clone(),
			closed: self.closed.clone(),
			active: self.active.clone(),
			next_sequence: self.next_sequence,
		}
	}
}

impl Drop for TrackProducer {
	fn drop(&mut self) {
		if self.active.fetch_sub(1, Ordering::Release) != 1 {
			return;
		}
		std::sync::atomic::fence(Ordering::Acquire);

		self.closed.send_if_modified(|closed| {
			if closed.is_some() {
				return false;
			}
			*closed = Some(Err(Error::Dropped));
			true
		});
	}
}

/// Reads groups from a track, starting from whatever position the consumer
/// was created (or cloned) at. Each clone walks the shared, append-only
/// group log with its own independent cursor.
#[derive(Clone)]
pub struct TrackConsumer {
	pub info: Track,
	state: Lock<State>,
	closed: watch::Receiver<Option<Result<(), Error>>>,
	next_index: usize,
}

impl TrackConsumer {
	/// Wait for and return the next group, or `None` once the track is closed
	/// and there are no more buffered groups.
	pub async fn next_group(&mut self) -> Result<Option<GroupConsumer>, Error> {
		loop {
			{
				let mut state = self.state.lock();
				if self.next_index < state.groups.len() {
					let group = state.groups[self.next_index].clone();
					self.next_index += 1;
					return Ok(Some(group));
				}

				if state.notify.is_none() {
					let (tx, _rx) = watch::channel(state.groups.len());
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
					if self.next_index < state.groups.len() {
						continue;
					}
					drop(state);
					return match res {
						Ok(c) => match c.clone().unwrap() {
							Ok(()) => Ok(None),
							Err(err) => Err(err),
						},
						Err(_) => Ok(None),
					};
				}
			}
		}
	}

	pub fn closed(&self) -> impl std::future::Future<Output = ()> {
		let mut closed = self.closed.clone();
		async move {
			closed.wait_for(|c| c.is_some()).await.ok();
		}
	}

	pub fn is_clone(&self, other: &Self) -> bool {
		self.closed.same_channel(&other.closed)
	}
}
