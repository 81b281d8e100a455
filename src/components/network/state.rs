use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::dataset::NetworkData;
use super::options::NetworkOptions;

/// Fixed simulation step, seconds.
pub const STEP: f32 = 0.016;
/// Layout iterations run up front when stabilization is on.
pub const STABILIZATION_ITERATIONS: usize = 300;
/// Extra pick distance around a node, graph units.
const HIT_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub title: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Live layout and interaction state of one mounted network.
pub struct NetworkState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub options: NetworkOptions,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl NetworkState {
	pub fn new(data: &NetworkData, options: NetworkOptions, width: f64, height: f64) -> Self {
		let bh = &options.physics.barnes_hut;
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: bh.charge,
			force_spring: bh.spring,
			force_max: bh.max_force,
			node_speed: bh.node_speed,
			damping_factor: bh.damping,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		let count = data.nodes.len().max(1) as f64;
		let ring = 100.0_f64.max(options.nodes.size * count / PI);
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					title: node.title.clone(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for edge in data.connected_edges() {
			let (src, tgt) = (id_to_idx[&edge.from], id_to_idx[&edge.to]);
			graph.add_edge(src, tgt, EdgeData::default());
			edges.push((src, tgt));
		}

		let mut state = Self {
			graph,
			options,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
		};
		if state.options.physics.enabled && state.options.physics.stabilization {
			for _ in 0..STABILIZATION_ITERATIONS {
				state.step_layout(STEP);
			}
		}
		state
	}

	pub fn node_count(&self) -> usize {
		let mut n = 0;
		self.graph.visit_nodes(|_| n += 1);
		n
	}

	pub fn edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx)] {
		&self.edges
	}

	pub fn node_radius(&self) -> f64 {
		self.options.nodes.size
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x(), node.y()));
			}
		});
		pos
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let hit = self.node_radius() + HIT_SLOP;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if !self.options.interaction.hover || self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Press: grab the node under the pointer, or start panning.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		let grabbed = if self.options.interaction.drag_nodes {
			self.node_at_position(x, y)
		} else {
			None
		};
		if let Some(idx) = grabbed {
			let (nx, ny) = self.node_position(idx).unwrap_or_default();
			self.drag = DragState {
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: nx,
				node_start_y: ny,
			};
		} else if self.options.interaction.drag_view {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.drag.node_idx {
			let (nx, ny) = (
				self.drag.node_start_x + ((x - self.drag.start_x) / self.transform.k) as f32,
				self.drag.node_start_y + ((y - self.drag.start_y) / self.transform.k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
			return;
		}
		let hovered = self.node_at_position(x, y);
		self.set_hover(hovered);
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Release: a dragged node stays pinned where it was dropped.
	pub fn pointer_up(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	/// Zooms by one wheel notch around the pointer.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		if !self.options.interaction.zoom_view {
			return;
		}
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	fn step_layout(&mut self, dt: f32) {
		self.graph.update(dt);
		self.separate_overlaps();
	}

	/// Pushes apart free nodes closer than `2 * size * avoidOverlap`.
	pub fn separate_overlaps(&mut self) {
		let min_dist = (2.0 * self.node_radius() * self.options.physics.barnes_hut.avoid_overlap) as f32;
		if min_dist <= 0.0 {
			return;
		}
		let mut nodes = Vec::new();
		self.graph
			.visit_nodes(|node| nodes.push((node.index(), node.x(), node.y(), node.data.is_anchor)));

		let mut push: HashMap<DefaultNodeIdx, (f32, f32)> = HashMap::new();
		for (i, &(a, ax, ay, a_pinned)) in nodes.iter().enumerate() {
			for &(b, bx, by, b_pinned) in &nodes[i + 1..] {
				let (dx, dy) = (bx - ax, by - ay);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist >= min_dist || dist < f32::EPSILON {
					continue;
				}
				let overlap = min_dist - dist;
				let (ux, uy) = (dx / dist, dy / dist);
				let (share_a, share_b) = match (a_pinned, b_pinned) {
					(true, true) => continue,
					(true, false) => (0.0, 1.0),
					(false, true) => (1.0, 0.0),
					(false, false) => (0.5, 0.5),
				};
				let pa = push.entry(a).or_default();
				pa.0 -= ux * overlap * share_a;
				pa.1 -= uy * overlap * share_a;
				let pb = push.entry(b).or_default();
				pb.0 += ux * overlap * share_b;
				pb.1 += uy * overlap * share_b;
			}
		}
		if push.is_empty() {
			return;
		}
		self.graph.visit_nodes_mut(|node| {
			if let Some(&(px, py)) = push.get(&node.index()) {
				node.data.x += px;
				node.data.y += py;
			}
		});
	}

	pub fn tick(&mut self, dt: f32) {
		if self.options.physics.enabled {
			self.step_layout(dt);
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network::dataset::{PayloadPolicy, shape_payload};
	use crate::components::network::types::{EdgeRecord, NetworkPayload, NodeRecord};

	fn data(nodes: &[i64], edges: &[(i64, i64)]) -> NetworkData {
		shape_payload(
			NetworkPayload {
				nodes: nodes.iter().map(|&id| NodeRecord::new(id)).collect(),
				edges: edges.iter().map(|&(a, b)| EdgeRecord::new(a, b)).collect(),
			},
			PayloadPolicy::Lenient,
		)
		.unwrap()
	}

	fn still() -> NetworkOptions {
		let mut options = NetworkOptions::default();
		options.physics.enabled = false;
		options
	}

	fn screen_of(state: &NetworkState, idx: DefaultNodeIdx) -> (f64, f64) {
		let (x, y) = state.node_position(idx).unwrap();
		(
			x as f64 * state.transform.k + state.transform.x,
			y as f64 * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn builds_nodes_and_skips_dangling_edges() {
		let state = NetworkState::new(&data(&[1, 2, 3], &[(1, 2), (2, 3), (3, 7)]), still(), 800.0, 600.0);
		assert_eq!(state.node_count(), 3);
		assert_eq!(state.edges().len(), 2);
	}

	#[test]
	fn node_info_carries_display_fields() {
		let payload = NetworkPayload {
			nodes: vec![NodeRecord::new(1).with_label("ISS"), NodeRecord::new(2)],
			edges: vec![],
		};
		let mut data = shape_payload(payload, PayloadPolicy::Lenient).unwrap();
		let mut with_title = NodeRecord::new(3);
		with_title.title = Some("alt=420".into());
		data.nodes.insert(with_title);

		let state = NetworkState::new(&data, still(), 800.0, 600.0);
		let mut infos = Vec::new();
		state
			.graph
			.visit_nodes(|n| infos.push((n.data.user_data.label.clone(), n.data.user_data.title.clone())));
		assert_eq!(
			infos,
			vec![
				(Some("ISS".to_owned()), None),
				(None, None),
				(None, Some("alt=420".to_owned())),
			]
		);
	}

	#[test]
	fn hover_highlights_neighbours() {
		let mut state = NetworkState::new(&data(&[1, 2, 3], &[(1, 2)]), still(), 800.0, 600.0);
		let (a, b) = state.edges()[0];
		state.set_hover(Some(a));
		assert!(state.is_hovered(a));
		assert!(state.is_highlighted(b));
		assert_eq!(state.hover.neighbors.len(), 1);

		state.set_hover(None);
		assert!(state.has_active_highlight());
		for _ in 0..600 {
			state.tick(STEP);
		}
		assert!(!state.has_active_highlight());
	}

	#[test]
	fn hover_can_be_disabled() {
		let mut options = still();
		options.interaction.hover = false;
		let mut state = NetworkState::new(&data(&[1, 2], &[(1, 2)]), options, 800.0, 600.0);
		let (a, _) = state.edges()[0];
		state.set_hover(Some(a));
		assert!(!state.has_active_highlight());
	}

	#[test]
	fn dragging_pins_the_node() {
		let mut state = NetworkState::new(&data(&[1, 2], &[(1, 2)]), still(), 800.0, 600.0);
		let (a, _) = state.edges()[0];
		let (sx, sy) = screen_of(&state, a);
		let before = state.node_position(a).unwrap();

		state.pointer_down(sx, sy);
		state.pointer_move(sx + 30.0, sy - 10.0);
		state.pointer_up();

		let after = state.node_position(a).unwrap();
		assert!((after.0 - before.0 - 30.0).abs() < 1e-3);
		assert!((after.1 - before.1 + 10.0).abs() < 1e-3);
		let mut pinned = false;
		state.graph.visit_nodes(|n| {
			if n.index() == a {
				pinned = n.data.is_anchor;
			}
		});
		assert!(pinned);
	}

	#[test]
	fn node_drag_disabled_pans_instead() {
		let mut options = still();
		options.interaction.drag_nodes = false;
		let mut state = NetworkState::new(&data(&[1, 2], &[(1, 2)]), options, 800.0, 600.0);
		let (a, _) = state.edges()[0];
		let (sx, sy) = screen_of(&state, a);
		let before = state.node_position(a).unwrap();

		state.pointer_down(sx, sy);
		state.pointer_move(sx + 30.0, sy);
		state.pointer_up();

		assert_eq!(state.node_position(a).unwrap(), before);
		assert_eq!(state.transform.x, 430.0);
	}

	#[test]
	fn zoom_keeps_pointer_fixed() {
		let mut state = NetworkState::new(&data(&[1], &[]), still(), 800.0, 600.0);
		let anchor = state.screen_to_graph(100.0, 50.0);
		state.zoom_at(100.0, 50.0, -1.0);
		let after = state.screen_to_graph(100.0, 50.0);
		assert!((anchor.0 - after.0).abs() < 1e-9 && (anchor.1 - after.1).abs() < 1e-9);
		assert!((state.transform.k - 1.1).abs() < 1e-12);
	}

	#[test]
	fn overlapping_nodes_are_pushed_apart() {
		let mut state = NetworkState::new(&data(&[1, 2], &[]), still(), 800.0, 600.0);
		let mut first = true;
		state.graph.visit_nodes_mut(|n| {
			n.data.x = if first { 0.0 } else { 2.0 };
			n.data.y = 0.0;
			first = false;
		});
		state.separate_overlaps();

		let mut xs = Vec::new();
		state.graph.visit_nodes(|n| xs.push(n.x()));
		let min_dist = 2.0 * 12.0 * 0.5;
		assert!(((xs[1] - xs[0]).abs() - min_dist).abs() < 1e-3);
	}

	#[test]
	fn stabilization_settles_before_first_draw() {
		let graph = data(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4)]);
		let live = NetworkState::new(&graph, NetworkOptions::default(), 800.0, 600.0);
		let mut options = NetworkOptions::default();
		options.physics.stabilization = true;
		let settled = NetworkState::new(&graph, options, 800.0, 600.0);

		let positions = |s: &NetworkState| {
			let mut v = Vec::new();
			s.graph.visit_nodes(|n| v.push((n.x(), n.y())));
			v
		};
		assert_ne!(positions(&live), positions(&settled));
	}

	#[test]
	fn resize_keeps_view_centred() {
		let mut state = NetworkState::new(&data(&[1], &[]), still(), 800.0, 600.0);
		state.resize(1000.0, 500.0);
		assert_eq!((state.transform.x, state.transform.y), (500.0, 250.0));
		assert_eq!((state.width, state.height), (1000.0, 500.0));
	}
}
