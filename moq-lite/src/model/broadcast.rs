use std::{
	collections::HashMap,
	future::Future,
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc,
	},
};

use tokio::sync::watch;
use web_async::Lock;

use crate::Error;

use super::{Track, TrackConsumer, TrackProducer};

struct State {
	// When explicitly publishing, we hold a reference to the consumer.
	// This prevents the track from being marked as "unused".
	published: HashMap<String, TrackConsumer>,

	// When requesting, we hold a reference to the producer for dynamic tracks.
	// The track will be marked as "unused" when the last consumer is dropped.
	requested: HashMap<String, TrackProducer>,
}

/// A named container of tracks, as seen by the publisher.
///
/// Receives subscription requests for tracks that weren't explicitly
/// published and decides whether to fulfill them.
pub struct BroadcastProducer {
	state: Lock<State>,
	closed: watch::Sender<bool>,
	requested: (
		async_channel::Sender<TrackProducer>,
		async_channel::Receiver<TrackProducer>,
	),
	cloned: Arc<AtomicUsize>,
}

impl Default for BroadcastProducer {
	fn default() -> Self {
		Self::new()
	}
}

impl BroadcastProducer {
	pub fn new() -> Self {
		Self {
			state: Lock::new(State {
				published: HashMap::new(),
				requested: HashMap::new(),
			}),
			closed: Default::default(),
			requested: async_channel::unbounded(),
			cloned: Default::default(),
		}
	}

	/// Return the next requested track, so the publisher can decide whether to fulfill it.
	pub async fn request(&mut self) -> Option<TrackProducer> {
		self.requested.1.recv().await.ok()
	}

	/// Produce a new track and insert it into the broadcast.
	pub fn create(&mut self, track: Track) -> TrackProducer {
		let producer = track.produce().producer;
		self.insert(producer.consume());
		producer
	}

	/// Insert a track into the lookup, returning true if it was unique.
	pub fn insert(&mut self, track: TrackConsumer) -> bool {
		let mut state = self.state.lock();
		let unique = state.published.insert(track.info.name.clone(), track.clone()).is_none();
		let removed = state.requested.remove(&track.info.name).is_some();

		unique && !removed
	}

	/// Remove a track from the lookup.
	pub fn remove(&mut self, name: &str) -> bool {
		let mut state = self.state.lock();
		state.published.remove(name).is_some() || state.requested.remove(name).is_some()
	}

	pub fn consume(&self) -> BroadcastConsumer {
		BroadcastConsumer {
			state: self.state.clone(),
			closed: self.closed.subscribe(),
			requested: self.requested.0.clone(),
		}
	}

	pub fn finish(&mut self) {
		self.closed.send_modify(|closed| *closed = true);
	}

	/// Block until there are no more consumers.
	pub fn unused(&self) -> impl Future<Output = ()> {
		let closed = self.closed.clone();
		async move { closed.closed().await }
	}

	pub fn is_clone(&self, other: &Self) -> bool {
		self.closed.same_channel(&other.closed)
	}
}

impl Clone for BroadcastProducer {
	fn clone(&self) -> Self {
		self.cloned.fetch_add(1, Ordering::Relaxed);
		Self {
			state: self.state.clone(),
			closed: self.closed.clone(),
			requested: self.requested.clone(),
			cloned: self.cloned.clone(),
		}
	}
}

impl Drop for BroadcastProducer {
	fn drop(&mut self) {
		if self.cloned.fetch_sub(1, Ordering::Relaxed) > 0 {
			return;
		}

		// Close the sender so consumers can't send any more requests.
		self.requested.0.close();

		// Drain any remaining requests.
		while let Ok(producer) = self.requested.1.try_recv() {
			let mut producer = producer;
			producer.abort(Error::Cancel);
		}

		let mut state = self.state.lock();
		state.published.clear();
		state.requested.clear();
	}
}

/// Subscribe to arbitrary broadcast/tracks.
#[derive(Clone)]
pub struct BroadcastConsumer {
	state: Lock<State>,
	closed: watch::Receiver<bool>,
	requested: async_channel::Sender<TrackProducer>,
}

impl BroadcastConsumer {
	pub fn subscribe(&self, track: &Track) -> TrackConsumer {
		let mut state = self.state.lock();

		// Return any explicitly published track.
		if let Some(consumer) = state.published.get(&track.name).cloned() {
			return consumer;
		}

		// Return any requested track already in flight.
		if let Some(producer) = state.requested.get(&track.name) {
			return producer.consume();
		}

		// Otherwise we have never seen this track before; create a new producer
		// and ask the publisher to fulfill it via `BroadcastProducer::request`.
		let producer = track.clone().produce().producer;
		let consumer = producer.consume();

		match self.requested.try_send(producer.clone()) {
			Ok(()) => {}
			Err(_) => {
				// The BroadcastProducer is gone; fail the subscription immediately
				// rather than returning a consumer that will never progress.
				let mut producer = producer;
				producer.abort(Error::Cancel);
				return consumer;
			}
		}

		state.requested.insert(producer.info.name.clone(), producer.clone());

		let state = self.state.clone();
		web_async::spawn(async move {
			producer.unused().await;
			state.lock().requested.remove(&producer.info.name);
		});

		consumer
	}

	pub fn closed(&self) -> impl Future<Output = ()> {
		let mut closed = self.closed.clone();
		async move {
			closed.wait_for(|closed| *closed).await.ok();
		}
	}

	/// Check if this is the exact same instance of a broadcast.
	pub fn is_clone(&self, other: &Self) -> bool {
		self.closed.same_channel(&other.closed)
	}
}
