use std::time::Duration;

use tokio::sync::watch;

use crate::audio::Decoder as AudioDecoder;
use crate::platform::{DecodedVideo, PlatformAudioDecoder, PlatformVideoDecoder};
use crate::reactive::Signal;
use crate::video::{select_rendition_with_budget, Decoder as VideoDecoder};

/// Tunables for a [`Broadcast`]'s reactive lifecycle.
#[derive(Clone, Debug)]
pub struct BroadcastConfig {
	/// Keep watching for the broadcast to reappear after it goes offline,
	/// instead of giving up after the first time it disconnects.
	pub reload: bool,
	pub audio_latency_ms: u64,
	pub video_latency_ms: u64,
	/// Upper bound on decoded pixel count used by rendition selection; `None`
	/// means "no budget", so the largest supported rendition always wins.
	pub pixel_budget: Option<u32>,
}

impl Default for BroadcastConfig {
	fn default() -> Self {
		Self {
			reload: true,
			audio_latency_ms: 200,
			video_latency_ms: 100,
			pixel_budget: Some(1280 * 720),
		}
	}
}

/// The lifecycle state of a watched broadcast, suitable for driving a "Live"
/// badge or a loading spinner in a UI layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
	/// Not currently announced under the watched name.
	Offline,
	/// Announced, but no catalog has been received yet.
	Loading,
	/// A catalog has been received at least once.
	Live,
}

struct VideoPipeline<D: PlatformVideoDecoder> {
	track: hang::TrackConsumer,
	decoder: VideoDecoder<D>,
}

struct AudioPipeline<D: PlatformAudioDecoder> {
	track: hang::TrackConsumer,
	decoder: AudioDecoder<D>,
}

/// Reactive orchestration of a single named broadcast.
///
/// Given an `announced(prefix)` stream and a name, watches for that
/// broadcast to appear, subscribes to its catalog, and drives whichever
/// audio/video renditions the catalog lists through their decode and
/// presentation pipelines. A UI layer reacts to the exposed [`Signal`]s
/// directly rather than polling a getter.
pub struct Broadcast {
	config: BroadcastConfig,
	pub enabled: Signal<bool>,
	pub status: Signal<Status>,
	pub catalog: Signal<Option<hang::Catalog>>,
	/// The most recently decoded video frame, ready to paint.
	pub video_frame: Signal<Option<DecodedVideo>>,
	/// The coded dimensions of the active video rendition, if any.
	pub video_display: Signal<Option<(u32, u32)>>,
	/// The catalog entry currently selected for video playback.
	pub video_active: Signal<Option<hang::catalog::Video>>,
	/// Whether the audio ring buffer is currently starved of samples.
	pub audio_refilling: Signal<bool>,
	stop: Option<watch::Sender<bool>>,
}

impl Broadcast {
	pub fn new(config: BroadcastConfig) -> Self {
		Self {
			config,
			enabled: Signal::new(true),
			status: Signal::new(Status::Offline),
			catalog: Signal::new(None),
			video_frame: Signal::new(None),
			video_display: Signal::new(None),
			video_active: Signal::new(None),
			audio_refilling: Signal::new(false),
			stop: None,
		}
	}

	pub fn config(&self) -> &BroadcastConfig {
		&self.config
	}

	/// Start watching `origin` for a broadcast named `name`, subscribing to
	/// its catalog-listed audio/video tracks and driving them through their
	/// decode/presentation pipelines as the catalog changes.
	///
	/// `new_video_decoder`/`new_audio_decoder` construct a fresh platform
	/// decoder: once at startup for audio, and again for video every time the
	/// selected rendition changes (applied at the next keyframe, so the
	/// switch never visibly stalls).
	///
	/// While `enabled` is `false` the task idles without touching `origin`,
	/// so toggling visibility off (e.g. a hidden browser tab) doesn't tear
	/// down the subscription, just pauses acting on it.
	pub fn connect<VD, AD>(&mut self, origin: moq_lite::OriginConsumer, name: String, new_video_decoder: impl Fn() -> VD + Send + 'static, new_audio_decoder: impl Fn() -> AD + Send + 'static)
	where
		VD: PlatformVideoDecoder + 'static,
		AD: PlatformAudioDecoder + 'static,
	{
		let (stop_tx, stop_rx) = watch::channel(false);
		self.stop = Some(stop_tx);

		web_async::spawn(Self::run(
			origin,
			name,
			self.enabled.clone(),
			self.status.clone(),
			self.catalog.clone(),
			self.video_frame.clone(),
			self.video_display.clone(),
			self.video_active.clone(),
			self.audio_refilling.clone(),
			self.config.clone(),
			stop_rx,
			new_video_decoder,
			new_audio_decoder,
		));
	}

	#[allow(clippy::too_many_arguments)]
	async fn run<VD, AD>(
		mut origin: moq_lite::OriginConsumer,
		name: String,
		enabled: Signal<bool>,
		status: Signal<Status>,
		catalog: Signal<Option<hang::Catalog>>,
		video_frame: Signal<Option<DecodedVideo>>,
		video_display: Signal<Option<(u32, u32)>>,
		video_active: Signal<Option<hang::catalog::Video>>,
		audio_refilling: Signal<bool>,
		config: BroadcastConfig,
		mut stop: watch::Receiver<bool>,
		new_video_decoder: impl Fn() -> VD,
		new_audio_decoder: impl Fn() -> AD,
	) where
		VD: PlatformVideoDecoder,
		AD: PlatformAudioDecoder,
	{
		loop {
			let mut is_enabled = enabled.get();
			while !is_enabled {
				tokio::select! {
					biased;
					_ = stop.changed() => return,
					next = enabled.changed(&is_enabled) => is_enabled = next,
				}
			}

			status.set(Status::Loading);

			let found = tokio::select! {
				biased;
				_ = stop.changed() => return,
				found = Self::find(&mut origin, &name) => found,
			};

			let Some(broadcast) = found else {
				status.set(Status::Offline);
				if !config.reload {
					return;
				}
				continue;
			};

			let consumer = hang::BroadcastConsumer::new(broadcast);
			Self::watch_catalog(
				consumer,
				&status,
				&catalog,
				&video_frame,
				&video_display,
				&video_active,
				&audio_refilling,
				&config,
				&mut stop,
				&new_video_decoder,
				&new_audio_decoder,
			)
			.await;

			status.set(Status::Offline);
			catalog.set(None);
			video_frame.set(None);
			video_display.set(None);
			video_active.set(None);
			audio_refilling.set(false);

			if !config.reload {
				return;
			}
		}
	}

	/// Drives one broadcast connection: republishes the catalog, (re)builds
	/// the audio/video pipelines when the catalog's selected renditions
	/// change, and pumps decoded frames into the presentation/ring buffers.
	/// Returns once the catalog track closes, errors, or `stop` fires.
	#[allow(clippy::too_many_arguments)]
	async fn watch_catalog<VD, AD>(
		mut consumer: hang::BroadcastConsumer,
		status: &Signal<Status>,
		catalog: &Signal<Option<hang::Catalog>>,
		video_frame: &Signal<Option<DecodedVideo>>,
		video_display: &Signal<Option<(u32, u32)>>,
		video_active: &Signal<Option<hang::catalog::Video>>,
		audio_refilling: &Signal<bool>,
		config: &BroadcastConfig,
		stop: &mut watch::Receiver<bool>,
		new_video_decoder: &impl Fn() -> VD,
		new_audio_decoder: &impl Fn() -> AD,
	) where
		VD: PlatformVideoDecoder,
		AD: PlatformAudioDecoder,
	{
		let mut video: Option<VideoPipeline<VD>> = None;
		let mut audio: Option<AudioPipeline<AD>> = None;

		loop {
			let video_read = async {
				match &mut video {
					Some(pipeline) => pipeline.track.read().await,
					None => std::future::pending().await,
				}
			};
			let audio_read = async {
				match &mut audio {
					Some(pipeline) => pipeline.track.read().await,
					None => std::future::pending().await,
				}
			};

			tokio::select! {
				biased;
				_ = stop.changed() => return,
				next = consumer.catalog.next() => {
					match next {
						Ok(Some(next)) => {
							status.set(Status::Live);

							let selected_video = select_rendition_with_budget(&next.video, config.pixel_budget).cloned();
							Self::reconcile_video(&consumer, &mut video, selected_video, video_display, video_active, config, new_video_decoder);

							let selected_audio = next.audio.first().cloned();
							Self::reconcile_audio(&consumer, &mut audio, selected_audio, audio_refilling, config, new_audio_decoder);

							catalog.set(Some(next));
						}
						_ => return,
					}
				}
				frame = video_read => {
					let Some(pipeline) = &mut video else { continue };
					match frame {
						Ok(Some(frame)) => {
							if pipeline.decoder.push(&frame, new_video_decoder).is_ok() {
								if let Some(decoded) = pipeline.decoder.advance() {
									video_frame.set(Some(decoded));
								}
							}
						}
						Ok(None) => video = None,
						Err(_) => video = None,
					}
				}
				frame = audio_read => {
					let Some(pipeline) = &mut audio else { continue };
					match frame {
						Ok(Some(frame)) => {
							if pipeline.decoder.push(&frame).is_ok() {
								pipeline.decoder.drain();
								audio_refilling.set(pipeline.decoder.is_refilling());
							}
						}
						Ok(None) => audio = None,
						Err(_) => audio = None,
					}
				}
			}
		}
	}

	/// A fresh subscription's first emitted frame is always a keyframe (see
	/// [`hang::model::GroupConsumer`]), so swapping `track` and requesting a
	/// decoder `switch` is enough: the existing decoder keeps draining its
	/// last frames from the old rendition until that keyframe arrives.
	fn reconcile_video<VD: PlatformVideoDecoder>(
		consumer: &hang::BroadcastConsumer,
		video: &mut Option<VideoPipeline<VD>>,
		selected: Option<hang::catalog::Video>,
		video_display: &Signal<Option<(u32, u32)>>,
		video_active: &Signal<Option<hang::catalog::Video>>,
		config: &BroadcastConfig,
		new_video_decoder: &impl Fn() -> VD,
	) {
		let current_name = video.as_ref().map(|p| p.track.inner.info.name.clone());
		let selected_name = selected.as_ref().map(|v| v.track.name.clone());
		if current_name == selected_name {
			return;
		}

		let Some(selected) = selected else {
			*video = None;
			video_display.set(None);
			video_active.set(None);
			return;
		};

		let dims = selected.config.coded_width.zip(selected.config.coded_height);
		video_display.set(dims);
		video_active.set(Some(selected.clone()));

		let track = consumer.subscribe(&selected.track);
		match video.as_mut() {
			Some(pipeline) => {
				pipeline.track = track;
				pipeline.decoder.switch(selected);
			}
			None => {
				let mut decoder = VideoDecoder::new(new_video_decoder(), selected);
				decoder.set_latency(Duration::from_millis(config.video_latency_ms));
				*video = Some(VideoPipeline { track, decoder });
			}
		}
	}

	fn reconcile_audio<AD: PlatformAudioDecoder>(
		consumer: &hang::BroadcastConsumer,
		audio: &mut Option<AudioPipeline<AD>>,
		selected: Option<hang::catalog::Audio>,
		audio_refilling: &Signal<bool>,
		config: &BroadcastConfig,
		new_audio_decoder: &impl Fn() -> AD,
	) {
		let current_name = audio.as_ref().map(|p| p.track.inner.info.name.clone());
		let selected_name = selected.as_ref().map(|a| a.track.name.clone());
		if current_name == selected_name {
			return;
		}

		let Some(selected) = selected else {
			*audio = None;
			audio_refilling.set(false);
			return;
		};

		let track = consumer.subscribe(&selected.track);
		let capacity_frames = ((config.audio_latency_ms as u64 * selected.config.sample_rate as u64) / 1000).max(1) as usize;
		let decoder = AudioDecoder::new(new_audio_decoder(), capacity_frames, selected.config.channel_count as usize, selected.config.sample_rate);
		*audio = Some(AudioPipeline { track, decoder });
		audio_refilling.set(true);
	}

	async fn find(origin: &mut moq_lite::OriginConsumer, name: &str) -> Option<moq_lite::BroadcastConsumer> {
		loop {
			let (suffix, broadcast) = origin.next().await?;
			if suffix == name {
				return broadcast;
			}
		}
	}
}

impl Drop for Broadcast {
	fn drop(&mut self) {
		if let Some(stop) = &self.stop {
			let _ = stop.send(true);
		}
	}
}
