use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Node or edge identifier: the wire format allows numbers and strings.
///
/// Whole-valued floats (`1.0`) decode as integers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ItemId {
	Int(i64),
	Str(String),
}

impl<'de> Deserialize<'de> for ItemId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		match Value::deserialize(deserializer)? {
			Value::String(s) => Ok(ItemId::Str(s)),
			Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					return Ok(ItemId::Int(i));
				}
				match n.as_f64() {
					Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
						Ok(ItemId::Int(f as i64))
					}
					_ => Err(D::Error::custom(format!("id {n} is not a whole number"))),
				}
			}
			other => Err(D::Error::custom(format!(
				"id must be a number or a string, got {other}"
			))),
		}
	}
}

/// Decodes a display field that may arrive as a string, number or bool.
fn display_text<'de, D: Deserializer<'de>>(
	deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
	Ok(match Option::<Value>::deserialize(deserializer)? {
		None | Some(Value::Null) => None,
		Some(Value::String(s)) => Some(s),
		Some(other) => Some(other.to_string()),
	})
}

impl fmt::Display for ItemId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ItemId::Int(n) => write!(f, "{n}"),
			ItemId::Str(s) => write!(f, "{s:?}"),
		}
	}
}

impl From<i64> for ItemId {
	fn from(n: i64) -> Self {
		ItemId::Int(n)
	}
}

impl From<i32> for ItemId {
	fn from(n: i32) -> Self {
		ItemId::Int(n.into())
	}
}

impl From<&str> for ItemId {
	fn from(s: &str) -> Self {
		ItemId::Str(s.to_owned())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
	pub id: ItemId,
	#[serde(default, deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
	pub group: Option<String>,
	/// Tooltip text.
	#[serde(default, deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Display fields this crate does not interpret.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl NodeRecord {
	pub fn new(id: impl Into<ItemId>) -> Self {
		Self {
			id: id.into(),
			label: None,
			group: None,
			title: None,
			extra: Map::new(),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
	/// Optional explicit identifier; edges without one are always distinct.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<ItemId>,
	pub from: ItemId,
	pub to: ItemId,
	#[serde(default, deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl EdgeRecord {
	pub fn new(from: impl Into<ItemId>, to: impl Into<ItemId>) -> Self {
		Self {
			id: None,
			from: from.into(),
			to: to.into(),
			label: None,
			extra: Map::new(),
		}
	}
}

/// `{ nodes: [...], edges: [...] }` as handed over by the page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkPayload {
	#[serde(default)]
	pub nodes: Vec<NodeRecord>,
	#[serde(default)]
	pub edges: Vec<EdgeRecord>,
}

impl NetworkPayload {
	pub fn from_json(raw: &str) -> Result<Self> {
		Ok(serde_json::from_str(raw)?)
	}
}
