//! Error types shared by the globe and network components.

use wasm_bindgen::JsValue;

use crate::components::network::ItemId;

/// Errors raised while mounting or feeding a visualization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VizError {
	/// No element with the given id exists in the document.
	#[error("mount point `#{0}` not found in document")]
	MissingMountPoint(String),
	/// The node/edge payload violates an identifier invariant.
	#[error("malformed payload: {0}")]
	MalformedPayload(PayloadIssue),
	/// The payload or a config attribute is not the expected JSON shape.
	#[error("decode error: {0}")]
	Decode(String),
	/// A browser API call threw.
	#[error("dom error: {0}")]
	Dom(String),
}

/// First offending record found when validating a payload strictly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadIssue {
	/// Two node records share an identifier.
	#[error("duplicate node id {id} at position {index}")]
	DuplicateNode {
		/// Position of the second occurrence in `nodes`.
		index: usize,
		/// The repeated identifier.
		id: ItemId,
	},
	/// An edge endpoint names no node in the payload.
	#[error("edge {index} references unknown node {id}")]
	DanglingEdge {
		/// Position of the edge in `edges`.
		index: usize,
		/// The missing endpoint identifier.
		id: ItemId,
	},
}

impl From<JsValue> for VizError {
	fn from(value: JsValue) -> Self {
		let message = value
			.as_string()
			.or_else(|| {
				js_sys::JSON::stringify(&value)
					.ok()
					.and_then(|s| s.as_string())
			})
			.unwrap_or_else(|| format!("{value:?}"));
		VizError::Dom(message)
	}
}

impl From<serde_json::Error> for VizError {
	fn from(err: serde_json::Error) -> Self {
		VizError::Decode(err.to_string())
	}
}

impl From<VizError> for JsValue {
	fn from(err: VizError) -> Self {
		JsValue::from_str(&err.to_string())
	}
}

/// Crate-wide result alias.
pub type Result<T, E = VizError> = std::result::Result<T, E>;
