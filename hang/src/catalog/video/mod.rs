mod codec;
mod detection;

pub use codec::*;
pub use detection::*;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, DisplayFromStr};

/// A video track and its decoder configuration, as described in the catalog.
///
/// A broadcast can list several [`Video`] entries for the same content at
/// different renditions (resolution/bitrate/codec); the player picks one
/// (see the rendition selection logic in the playback pipeline).
#[serde_with::serde_as]
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
	/// The MoQ track carrying this rendition's frames.
	pub track: moq_lite::Track,

	/// The decoder configuration needed to play this rendition.
	pub config: VideoConfig,
}

/// Video decoder configuration based on WebCodecs `VideoDecoderConfig`.
///
/// Reference: <https://w3c.github.io/webcodecs/#video-decoder-config>
#[serde_with::serde_as]
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoConfig {
	/// The codec, see <https://w3c.github.io/webcodecs/codec_registry.html>.
	#[serde_as(as = "DisplayFromStr")]
	pub codec: VideoCodec,

	/// Out-of-band decoder initialization data (e.g. H.264 SPS/PPS).
	///
	/// If absent, this data is expected in-band before each keyframe instead
	/// (marginally higher overhead).
	#[serde(default)]
	#[serde_as(as = "Option<Hex>")]
	pub description: Option<Bytes>,

	/// The encoded width/height of the media, used to allocate buffers up-front.
	pub coded_width: Option<u32>,
	pub coded_height: Option<u32>,

	/// The display aspect ratio, allowing pixels to be stretched/shrunk.
	/// If absent, the display aspect ratio is 1:1.
	pub display_ratio_width: Option<u32>,
	pub display_ratio_height: Option<u32>,

	/// The maximum bitrate of this rendition in bits/sec, if known.
	#[serde(default)]
	pub bitrate: Option<u64>,

	/// The frame rate of this rendition, if known.
	#[serde(default)]
	pub framerate: Option<f64>,

	/// If true, the decoder should be configured to optimize for latency.
	#[serde(default)]
	pub optimize_for_latency: Option<bool>,

	/// The rotation of the video in degrees. Default: 0.
	#[serde(default)]
	pub rotation: Option<f64>,

	/// If true, the decoder should flip the video horizontally. Default: false.
	#[serde(default)]
	pub flip: Option<bool>,
}
