use glam::{Mat4, Vec3, Vec4};

/// Perspective camera looking at a target point.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
	pub fov_y_deg: f32,
	/// Width over height, kept in `f64` so it is exactly `w / h`.
	pub aspect: f64,
	pub near: f32,
	pub far: f32,
	pub position: Vec3,
	pub target: Vec3,
	pub up: Vec3,
	projection: Mat4,
}

impl PerspectiveCamera {
	pub fn new(fov_y_deg: f32, aspect: f64, near: f32, far: f32) -> Self {
		let mut camera = Self {
			fov_y_deg,
			aspect,
			near,
			far,
			position: Vec3::ZERO,
			target: Vec3::ZERO,
			up: Vec3::Y,
			projection: Mat4::IDENTITY,
		};
		camera.update_projection_matrix();
		camera
	}

	/// Recomputes the projection from the current fov, aspect and clip planes.
	pub fn update_projection_matrix(&mut self) {
		self.projection = Mat4::perspective_rh_gl(
			self.fov_y_deg.to_radians(),
			self.aspect as f32,
			self.near,
			self.far,
		);
	}

	pub fn projection_matrix(&self) -> Mat4 {
		self.projection
	}

	pub fn view_matrix(&self) -> Mat4 {
		Mat4::look_at_rh(self.position, self.target, self.up)
	}

	pub fn view_projection(&self) -> Mat4 {
		self.projection * self.view_matrix()
	}

	/// Projects a world-space point to pixel coordinates on a `width` x `height`
	/// surface. `None` when the point is behind the camera.
	pub fn project(&self, point: Vec3, width: f64, height: f64) -> Option<(f64, f64)> {
		let clip = self.view_projection() * Vec4::new(point.x, point.y, point.z, 1.0);
		if clip.w <= 0.0 {
			return None;
		}
		let ndc = clip.truncate() / clip.w;
		Some((
			(ndc.x as f64 + 1.0) * 0.5 * width,
			(1.0 - ndc.y as f64) * 0.5 * height,
		))
	}
}
