use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::catalog::{Audio, Chat, Location, Preview, User, Video};
use crate::Result;

/// A catalog, published as JSON on the `catalog.json` track of a broadcast,
/// describing every track available: video/audio renditions plus the
/// optional chat, location, user and preview sub-schemas.
#[serde_with::serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Catalog {
	/// Video renditions for the same content. The viewer chooses one based
	/// on resolution, bitrate, codec support, etc.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub video: Vec<Video>,

	/// Audio renditions for the same content, chosen similarly to video.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub audio: Vec<Audio>,

	/// Text chat, if the broadcast supports it.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub chat: Option<Chat>,

	/// Spatial position, used for audio panning.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<Location>,

	/// Display metadata for the broadcaster.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,

	/// A cheap activity summary, for directory listings.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub preview: Option<Preview>,
}

impl Catalog {
	/// The default name for the catalog track.
	pub const DEFAULT_NAME: &str = "catalog.json";

	/// Parse a catalog from a string.
	#[allow(clippy::should_implement_trait)]
	pub fn from_str(s: &str) -> Result<Self> {
		Ok(serde_json::from_str(s)?)
	}

	/// Parse a catalog from a slice of bytes.
	pub fn from_slice(v: &[u8]) -> Result<Self> {
		Ok(serde_json::from_slice(v)?)
	}

	/// Serialize the catalog to a string.
	pub fn to_string(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}

	/// Serialize the catalog to a vector of bytes.
	pub fn to_vec(&self) -> Result<Vec<u8>> {
		Ok(serde_json::to_vec(self)?)
	}

	/// Produce a catalog track that describes the available media tracks.
	pub fn produce(self) -> CatalogProducer {
		let track = moq_lite::Track {
			name: Catalog::DEFAULT_NAME.to_string(),
			priority: 100,
		}
		.produce();

		CatalogProducer::new(track.producer, self)
	}
}

/// Produces a catalog track that describes the available media tracks.
///
/// The JSON catalog is updated when tracks are added/removed but is *not*
/// automatically published; call [`publish`](Self::publish) once all
/// updates for a change are complete.
#[derive(Clone)]
pub struct CatalogProducer {
	/// Access to the underlying track producer.
	pub track: moq_lite::TrackProducer,
	current: Arc<Mutex<Catalog>>,
}

impl CatalogProducer {
	/// Create a new catalog producer with the given track and initial catalog.
	pub fn new(track: moq_lite::TrackProducer, init: Catalog) -> Self {
		Self {
			current: Arc::new(Mutex::new(init)),
			track,
		}
	}

	/// Add a video rendition to the catalog.
	pub fn add_video(&mut self, video: Video) {
		self.current.lock().unwrap().video.push(video);
	}

	/// Add an audio rendition to the catalog.
	pub fn add_audio(&mut self, audio: Audio) {
		self.current.lock().unwrap().audio.push(audio);
	}

	/// Remove a video rendition from the catalog.
	pub fn remove_video(&mut self, video: &Video) {
		self.current.lock().unwrap().video.retain(|v| v != video);
	}

	/// Remove an audio rendition from the catalog.
	pub fn remove_audio(&mut self, audio: &Audio) {
		self.current.lock().unwrap().audio.retain(|a| a != audio);
	}

	/// Get mutable access to the catalog for manual updates (chat, location,
	/// user, preview). Remember to call [`publish`](Self::publish) after.
	pub fn update(&mut self) -> MutexGuard<'_, Catalog> {
		self.current.lock().unwrap()
	}

	/// Publish the current catalog to all subscribers as a new, single-frame
	/// group. This library doesn't support delta updates; every publish
	/// sends the full catalog.
	pub fn publish(&mut self) {
		let current = self.current.lock().unwrap();
		let mut group = self.track.create_group();

		let frame = current.to_string().expect("invalid catalog");
		group.write_frame(frame.into());
		group.finish();
	}

	/// Create a consumer for this catalog, receiving updates as they're published.
	pub fn consume(&self) -> CatalogConsumer {
		CatalogConsumer::new(self.track.consume())
	}

	/// Finish publishing to this catalog and close the track.
	pub fn finish(self) {
		self.track.finish();
	}
}

impl From<moq_lite::TrackProducer> for CatalogProducer {
	fn from(inner: moq_lite::TrackProducer) -> Self {
		Self::new(inner, Catalog::default())
	}
}

impl Default for CatalogProducer {
	fn default() -> Self {
		let track = moq_lite::Track {
			name: Catalog::DEFAULT_NAME.to_string(),
			priority: 100,
		}
		.produce();

		CatalogProducer::new(track.producer, Catalog::default())
	}
}

/// A catalog consumer, used to receive catalog updates and discover tracks.
///
/// This wraps a `moq_lite::TrackConsumer` and deserializes the JSON catalog
/// published on it.
#[derive(Clone)]
pub struct CatalogConsumer {
	/// Access to the underlying track consumer.
	pub track: moq_lite::TrackConsumer,
	group: Option<moq_lite::GroupConsumer>,
}

impl CatalogConsumer {
	/// Create a new catalog consumer from a MoQ track consumer.
	pub fn new(track: moq_lite::TrackConsumer) -> Self {
		Self { track, group: None }
	}

	/// Get the next catalog update.
	///
	/// Waits for the next catalog publication. Returns `None` once the
	/// broadcast has ended (gone offline).
	pub async fn next(&mut self) -> Result<Option<Catalog>> {
		loop {
			tokio::select! {
				res = self.track.next_group() => {
					match res? {
						Some(group) => self.group = Some(group),
						None => return Ok(None),
					}
				},
				Some(frame) = async { self.group.as_mut()?.read_frame().await.transpose() } => {
					self.group.take(); // Deltas aren't supported; every publish is a full snapshot.
					let catalog = Catalog::from_slice(&frame?)?;
					return Ok(Some(catalog));
				}
			}
		}
	}

	/// Wait until the catalog track is closed.
	pub async fn closed(&self) -> Result<()> {
		Ok(self.track.closed().await?)
	}
}

impl From<moq_lite::TrackConsumer> for CatalogConsumer {
	fn from(inner: moq_lite::TrackConsumer) -> Self {
		Self::new(inner)
	}
}

#[cfg(test)]
mod test {
	use crate::catalog::{AudioCodec::Opus, AudioConfig, VideoConfig, H264};
	use moq_lite::Track;

	use super::*;

	#[test]
	fn simple() {
		let mut encoded = r#"{
			"video": [
				{
					"track": {
						"name": "video",
						"priority": 1
					},
					"config": {
						"codec": "avc1.64001f",
						"codedWidth": 1280,
						"codedHeight": 720,
						"bitrate": 6000000,
						"framerate": 30.0
					}
				}
			],
			"audio": [
				{
					"track": {
						"name": "audio",
						"priority": 2
					},
					"config": {
						"codec": "opus",
						"sampleRate": 48000,
						"numberOfChannels": 2,
						"bitrate": 128000
					}
				}
			]
		}"#
		.to_string();

		encoded.retain(|c| !c.is_whitespace());

		let decoded = Catalog {
			video: vec![Video {
				track: Track {
					name: "video".to_string(),
					priority: 1,
				},
				config: VideoConfig {
					codec: H264 {
						profile: 0x64,
						constraints: 0x00,
						level: 0x1f,
					}
					.into(),
					description: None,
					coded_width: Some(1280),
					coded_height: Some(720),
					display_ratio_width: None,
					display_ratio_height: None,
					bitrate: Some(6_000_000),
					framerate: Some(30.0),
					optimize_for_latency: None,
					rotation: None,
					flip: None,
				},
			}],
			audio: vec![Audio {
				track: Track {
					name: "audio".to_string(),
					priority: 2,
				},
				config: AudioConfig {
					codec: Opus,
					sample_rate: 48_000,
					channel_count: 2,
					bitrate: Some(128_000),
					description: None,
				},
				captions: None,
				speaking: None,
			}],
			..Default::default()
		};

		let output = Catalog::from_str(&encoded).expect("failed to decode");
		assert_eq!(decoded, output, "wrong decoded output");

		let output = decoded.to_string().expect("failed to encode");
		assert_eq!(encoded, output, "wrong encoded output");
	}

	#[test]
	fn empty_catalog_roundtrips() {
		let catalog = Catalog::default();
		let encoded = catalog.to_string().unwrap();
		let decoded = Catalog::from_str(&encoded).unwrap();
		assert_eq!(catalog, decoded);
	}
}
