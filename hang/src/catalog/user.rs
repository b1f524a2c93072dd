use serde::{Deserialize, Serialize};

/// User metadata in the catalog, for rendering a participant list or label.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: Option<String>,
	pub name: Option<String>,
	pub avatar: Option<String>,
	pub color: Option<String>,
}
