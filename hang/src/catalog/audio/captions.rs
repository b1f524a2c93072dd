use serde::{Deserialize, Serialize};

/// Captions track metadata: a track of UTF-8 text frames, one per caption update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
	/// The MoQ track information.
	pub track: moq_lite::Track,
}
