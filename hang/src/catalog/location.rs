use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::Position;

/// Live location information for spatial audio positioning.
///
/// Describes the spatial position of a broadcaster for features like audio
/// panning, plus a mechanism for peers to request position updates: it's up
/// to the broadcaster to watch peer catalogs, find its own handle, and
/// subscribe to the corresponding update track.
#[serde_with::serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
#[serde_with::skip_serializing_none]
pub struct Location {
	/// The initial location, in the range -1 to 1 with (0, 0) the center.
	pub initial: Option<Position>,

	/// An optional track containing live location updates.
	pub updates: Option<moq_lite::Track>,

	/// If present, this broadcaster is requesting that peers update its
	/// position via the given handle.
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub peers: HashMap<u32, moq_lite::Track>,

	/// If present, viewers can drag this location via this handle.
	pub handle: Option<u32>,
}
