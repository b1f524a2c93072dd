use tokio::sync::watch;

use super::Signal;

/// Runs a callback every time a watched [`Signal`] changes, for as long as
/// the `Effect` is alive. Dropping it stops the background task.
///
/// This is intentionally single-dependency: the broadcast orchestrator
/// chains several of these (one per input signal) rather than tracking an
/// arbitrary dependency set, which keeps each effect's re-run condition
/// explicit and easy to reason about.
pub struct Effect {
	stop: watch::Sender<bool>,
}

impl Effect {
	/// Spawn an effect that calls `on_change(value)` once immediately with
	/// the signal's current value, then again every time it changes.
	pub fn watch<T>(signal: Signal<T>, mut on_change: impl FnMut(T) + Send + 'static) -> Self
	where
		T: Clone + PartialEq + Send + Sync + 'static,
	{
		let (stop_tx, mut stop_rx) = watch::channel(false);

		web_async::spawn(async move {
			let mut current = signal.get();
			on_change(current.clone());

			loop {
				tokio::select! {
					biased;
					_ = stop_rx.changed() => return,
					value = signal.changed(&current) => {
						current = value;
						on_change(current.clone());
					}
				}
			}
		});

		Self { stop: stop_tx }
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.stop.send_replace(true);
	}
}
