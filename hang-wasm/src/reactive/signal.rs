use std::future::Future;

use tokio::sync::watch;

/// A piece of state that can be read, written, and watched for changes.
///
/// This is the reactive primitive the playback pipelines are built on: the
/// broadcast orchestrator exposes its inputs (`enabled`, `connection`,
/// `name`) and outputs (`status`, `catalog`) as signals, and an [`Effect`]
/// reacts whenever one changes.
///
/// Cloning a `Signal` gives you another handle to the *same* underlying
/// state; it's cheap and meant to be passed around freely, the same way
/// `moq_lite`'s producer/consumer pairs share a `watch` channel.
#[derive(Clone)]
pub struct Signal<T> {
	tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> Signal<T> {
	pub fn new(value: T) -> Self {
		Self {
			tx: watch::Sender::new(value),
		}
	}

	/// Read the current value.
	pub fn get(&self) -> T {
		self.tx.borrow().clone()
	}

	/// Set a new value. Watchers are only woken if the value actually changed.
	pub fn set(&self, value: T) {
		self.tx.send_if_modified(|current| {
			if *current == value {
				return false;
			}
			*current = value;
			true
		});
	}

	/// Update the value in place via a closure, same change-detection as [`Self::set`].
	pub fn update(&self, f: impl FnOnce(&mut T)) {
		self.tx.send_if_modified(|current| {
			let before = current.clone();
			f(current);
			*current != before
		});
	}

	/// Wait for the next value that differs from `current`, returning it.
	pub fn changed(&self, current: &T) -> impl Future<Output = T> + 'static
	where
		T: Send + Sync + 'static,
	{
		let mut rx = self.tx.subscribe();
		let current = current.clone();
		async move {
			loop {
				if rx.changed().await.is_err() {
					// Sender dropped; the value can no longer change, so return it as-is.
					return rx.borrow().clone();
				}
				let value = rx.borrow().clone();
				if value != current {
					return value;
				}
			}
		}
	}
}

impl<T: Clone + PartialEq + Default> Default for Signal<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}
