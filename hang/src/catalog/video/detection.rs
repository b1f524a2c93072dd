use serde::{Deserialize, Serialize};

/// Detection track metadata: a track of detected-object lists, one group per frame analyzed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
	/// The MoQ track carrying [`DetectionObjects`] JSON payloads.
	pub track: moq_lite::Track,
}

/// A single detected object in a video frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionObject {
	pub label: String,
	pub score: f64, // 0.0 to 1.0
	pub x: f64,     // 0.0 to 1.0, normalized bounding box
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

/// A list of detected objects, the payload of one [`Detection`] frame.
pub type DetectionObjects = Vec<DetectionObject>;
