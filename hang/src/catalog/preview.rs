use serde::{Deserialize, Serialize};

/// A lightweight, boolean-only summary of a broadcast's current activity,
/// cheap enough to render for every row in a directory listing without
/// subscribing to the full catalog or any media tracks.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
	pub name: Option<String>,
	pub avatar: Option<String>,

	pub audio: Option<bool>,
	pub video: Option<bool>,
	pub screen: Option<bool>,

	pub speaking: Option<bool>,
	pub typing: Option<bool>,
	pub chat: Option<bool>,
}
