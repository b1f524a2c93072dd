use serde::{Deserialize, Serialize};

/// Speaking-indicator track metadata: a track of single-byte (0/1) frames
/// published whenever the voice-activity-detection state changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Speaking {
	/// The MoQ track information.
	pub track: moq_lite::Track,
}
