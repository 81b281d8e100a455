use serde::{Deserialize, Serialize};

/// Declarative display options applied uniformly to every node and edge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkOptions {
	pub nodes: NodeStyle,
	pub edges: EdgeStyle,
	pub physics: PhysicsOptions,
	pub interaction: InteractionOptions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
	#[default]
	Dot,
	Square,
	Triangle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStyle {
	pub shape: NodeShape,
	/// Radius in graph units.
	pub size: f64,
	pub color: NodeColor,
	pub font: Font,
}

impl Default for NodeStyle {
	fn default() -> Self {
		Self {
			shape: NodeShape::Dot,
			size: 12.0,
			color: NodeColor::default(),
			font: Font::default(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeColor {
	pub background: String,
	pub border: String,
}

impl Default for NodeColor {
	fn default() -> Self {
		Self {
			background: "#66aaff".into(),
			border: "#88bbff".into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Font {
	pub color: String,
	pub size: f64,
}

impl Default for Font {
	fn default() -> Self {
		Self {
			color: "#ffffff".into(),
			size: 14.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeStyle {
	pub color: String,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			color: "#444".into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicsOptions {
	pub enabled: bool,
	/// Settle the layout before the first draw instead of animating it live.
	pub stabilization: bool,
	pub barnes_hut: BarnesHut,
}

impl Default for PhysicsOptions {
	fn default() -> Self {
		Self {
			enabled: true,
			stabilization: false,
			barnes_hut: BarnesHut::default(),
		}
	}
}

/// Force-simulation constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarnesHut {
	/// 0 disables overlap avoidance; 1 keeps nodes a full diameter apart.
	pub avoid_overlap: f64,
	pub charge: f32,
	pub spring: f32,
	pub max_force: f32,
	pub node_speed: f32,
	pub damping: f32,
}

impl Default for BarnesHut {
	fn default() -> Self {
		Self {
			avoid_overlap: 0.5,
			charge: 150.0,
			spring: 0.05,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionOptions {
	pub drag_nodes: bool,
	pub hover: bool,
	/// Background drag pans, wheel zooms.
	pub drag_view: bool,
	pub zoom_view: bool,
}

impl Default for InteractionOptions {
	fn default() -> Self {
		Self {
			drag_nodes: true,
			hover: true,
			drag_view: true,
			zoom_view: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn defaults_match_page_options() {
		let value = serde_json::to_value(NetworkOptions::default()).unwrap();
		assert_eq!(value["nodes"]["shape"], "dot");
		assert_eq!(value["nodes"]["size"], 12.0);
		assert_eq!(value["nodes"]["color"], json!({"background": "#66aaff", "border": "#88bbff"}));
		assert_eq!(value["nodes"]["font"]["color"], "#ffffff");
		assert_eq!(value["edges"]["color"], "#444");
		assert_eq!(value["physics"]["stabilization"], false);
		assert_eq!(value["physics"]["barnesHut"]["avoidOverlap"], 0.5);
		assert_eq!(value["interaction"]["dragNodes"], true);
		assert_eq!(value["interaction"]["hover"], true);
	}

	#[test]
	fn partial_options_fill_in_defaults() {
		let opts: NetworkOptions =
			serde_json::from_str(r#"{"nodes": {"shape": "square"}, "interaction": {"hover": false}}"#)
				.unwrap();
		assert_eq!(opts.nodes.shape, NodeShape::Square);
		assert_eq!(opts.nodes.size, 12.0);
		assert!(!opts.interaction.hover);
		assert!(opts.interaction.drag_nodes);
		assert_eq!(opts.physics, PhysicsOptions::default());
	}
}
