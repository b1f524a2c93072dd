mod captions;
mod codec;
mod speaking;

pub use captions::*;
pub use codec::*;
pub use speaking::*;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, DisplayFromStr};

/// An audio track and its decoder configuration, as described in the catalog.
///
/// As with [`super::Video`], a broadcast can list several renditions of the
/// same content; the player picks one based on its capabilities.
#[serde_with::serde_as]
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Audio {
	/// The MoQ track carrying this rendition's frames.
	pub track: moq_lite::Track,

	/// The decoder configuration needed to play this rendition.
	pub config: AudioConfig,

	/// An optional captions sub-track.
	#[serde(default)]
	pub captions: Option<Captions>,

	/// An optional speaking-indicator sub-track.
	#[serde(default)]
	pub speaking: Option<Speaking>,
}

/// Audio decoder configuration based on WebCodecs `AudioDecoderConfig`.
///
/// Reference: <https://www.w3.org/TR/webcodecs/#audio-decoder-config>
#[serde_with::serde_as]
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
	/// The codec, see <https://w3c.github.io/webcodecs/codec_registry.html>.
	#[serde_as(as = "DisplayFromStr")]
	pub codec: AudioCodec,

	/// The sample rate of the audio in Hz.
	pub sample_rate: u32,

	/// The number of channels in the audio.
	#[serde(rename = "numberOfChannels")]
	pub channel_count: u32,

	/// The bitrate of the audio track in bits per second, if known.
	#[serde(default)]
	pub bitrate: Option<u64>,

	/// Out-of-band decoder initialization data. If absent, there may be
	/// in-band metadata instead (marginally higher overhead).
	#[serde(default)]
	#[serde_as(as = "Option<Hex>")]
	pub description: Option<Bytes>,
}
