//! Mount identifiers and globe scene settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, VizError};

/// Element id the globe canvas is mounted under.
pub const GLOBE_MOUNT_ID: &str = "globe-container";
/// Element id the network canvas is mounted under.
pub const NETWORK_MOUNT_ID: &str = "viz";
/// Id of an optional `<script type="application/json">` holding the network payload.
pub const GRAPH_DATA_ID: &str = "graph-data";
/// Attribute on the globe mount that may carry a JSON [`SceneConfig`] override.
pub const SCENE_CONFIG_ATTR: &str = "data-scene-config";

/// Camera, mesh, lighting and motion settings for the globe.
///
/// Every field has a default, so a partial JSON object is a valid override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
	/// Vertical field of view in degrees.
	pub fov_deg: f32,
	pub near: f32,
	pub far: f32,
	/// Initial camera position; the camera looks at the origin.
	pub camera_position: [f32; 3],
	pub sphere_radius: f32,
	pub width_segments: u32,
	pub height_segments: u32,
	/// Mesh colour as `0xRRGGBB`.
	pub color: u32,
	pub ambient_color: u32,
	pub ambient_intensity: f32,
	/// Radians added to the mesh's Y rotation every frame.
	pub rotation_step: f64,
	pub enable_damping: bool,
	pub damping_factor: f32,
	/// Canvas clear colour (CSS syntax).
	pub background: String,
}

impl Default for SceneConfig {
	fn default() -> Self {
		Self {
			fov_deg: 60.0,
			near: 0.1,
			far: 5000.0,
			camera_position: [0.0, 0.0, 350.0],
			sphere_radius: 100.0,
			width_segments: 64,
			height_segments: 64,
			color: 0x2266ff,
			ambient_color: 0xffffff,
			ambient_intensity: 1.0,
			rotation_step: 0.002,
			enable_damping: true,
			damping_factor: 0.05,
			background: "#000000".into(),
		}
	}
}

impl SceneConfig {
	/// Parses a (possibly partial) JSON override; missing fields keep their defaults.
	pub fn from_json(raw: &str) -> Result<Self> {
		Ok(serde_json::from_str(raw)?)
	}

	/// Applies a JSON object of overrides on top of `self`; fields the object
	/// does not name keep their current values.
	pub fn overlay(&self, raw: &str) -> Result<Self> {
		let Value::Object(overrides) = serde_json::from_str::<Value>(raw)? else {
			return Err(VizError::Decode("scene config override must be a JSON object".into()));
		};
		let mut merged = serde_json::to_value(self)?;
		if let Value::Object(fields) = &mut merged {
			fields.extend(overrides);
		}
		Ok(serde_json::from_value(merged)?)
	}
}
