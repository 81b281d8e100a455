use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::camera::PerspectiveCamera;

const MIN_POLAR: f32 = 1e-6;
const MAX_POLAR: f32 = PI - 1e-6;
const ZOOM_STEP: f32 = 0.95;
const SETTLED: f32 = 1e-6;

/// Orbit-style camera controller with optional damped (inertial) motion.
///
/// Pointer and wheel input only accumulate deltas; [`OrbitControls::update`]
/// applies them to the camera. With damping on, each update consumes a
/// `damping_factor` share of the remaining delta, so motion eases out over
/// several frames.
#[derive(Clone, Debug)]
pub struct OrbitControls {
	pub target: Vec3,
	pub enable_damping: bool,
	pub damping_factor: f32,
	pub rotate_speed: f32,
	pub min_distance: f32,
	pub max_distance: f32,
	delta_theta: f32,
	delta_phi: f32,
	scale: f32,
	drag_from: Option<(f64, f64)>,
}

impl OrbitControls {
	pub fn new(enable_damping: bool, damping_factor: f32) -> Self {
		Self {
			target: Vec3::ZERO,
			enable_damping,
			damping_factor,
			rotate_speed: 1.0,
			min_distance: 0.0,
			max_distance: f32::INFINITY,
			delta_theta: 0.0,
			delta_phi: 0.0,
			scale: 1.0,
			drag_from: None,
		}
	}

	pub fn rotate_left(&mut self, angle: f32) {
		self.delta_theta -= angle;
	}

	pub fn rotate_up(&mut self, angle: f32) {
		self.delta_phi -= angle;
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.drag_from = Some((x, y));
	}

	/// Converts a drag into rotation: a full surface height of travel is one turn.
	pub fn pointer_move(&mut self, x: f64, y: f64, surface_height: f64) {
		let Some((px, py)) = self.drag_from else {
			return;
		};
		let h = surface_height.max(1.0) as f32;
		self.rotate_left(TAU * (x - px) as f32 / h * self.rotate_speed);
		self.rotate_up(TAU * (y - py) as f32 / h * self.rotate_speed);
		self.drag_from = Some((x, y));
	}

	pub fn pointer_up(&mut self) {
		self.drag_from = None;
	}

	pub fn is_dragging(&self) -> bool {
		self.drag_from.is_some()
	}

	/// Positive `delta_y` (scroll down) moves the camera away.
	pub fn wheel(&mut self, delta_y: f64) {
		if delta_y > 0.0 {
			self.scale /= ZOOM_STEP;
		} else if delta_y < 0.0 {
			self.scale *= ZOOM_STEP;
		}
	}

	/// Advances the controller one step. Returns whether the camera moved.
	pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
		let offset = camera.position - self.target;
		let radius = offset.length();
		if radius <= f32::EPSILON {
			return false;
		}
		let mut theta = offset.x.atan2(offset.z);
		let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

		let share = if self.enable_damping {
			self.damping_factor
		} else {
			1.0
		};
		theta += self.delta_theta * share;
		phi = (phi + self.delta_phi * share).clamp(MIN_POLAR, MAX_POLAR);
		let new_radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

		let next = self.target
			+ Vec3::new(
				new_radius * phi.sin() * theta.sin(),
				new_radius * phi.cos(),
				new_radius * phi.sin() * theta.cos(),
			);

		if self.enable_damping {
			self.delta_theta *= 1.0 - self.damping_factor;
			self.delta_phi *= 1.0 - self.damping_factor;
		} else {
			self.delta_theta = 0.0;
			self.delta_phi = 0.0;
		}
		self.scale = 1.0;
		if self.delta_theta.abs() < SETTLED {
			self.delta_theta = 0.0;
		}
		if self.delta_phi.abs() < SETTLED {
			self.delta_phi = 0.0;
		}

		let moved = next.distance_squared(camera.position) > SETTLED;
		camera.position = next;
		camera.target = self.target;
		moved
	}
}
