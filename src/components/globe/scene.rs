use glam::Vec3;

use super::camera::PerspectiveCamera;
use super::controls::OrbitControls;
use crate::config::SceneConfig;

/// Sphere tessellation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereGeometry {
	pub radius: f32,
	pub width_segments: u32,
	pub height_segments: u32,
}

/// Single-colour lit material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhongMaterial {
	pub color: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
	pub color: u32,
	pub intensity: f32,
}

/// The one drawable of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
	pub geometry: SphereGeometry,
	pub material: PhongMaterial,
	/// Euler rotation in radians.
	pub rotation: Vec3,
}

/// What a [`Scene3D`] surface needs to draw one frame.
pub struct SceneView<'a> {
	pub camera: &'a PerspectiveCamera,
	pub mesh: &'a Mesh,
	pub light: &'a AmbientLight,
}

/// A render surface able to draw the globe scene.
pub trait Scene3D {
	/// Resize the drawing buffer to `width` x `height` pixels.
	fn set_size(&mut self, width: f64, height: f64);
	/// Draw the scene from the camera's current viewpoint.
	fn render(&mut self, view: &SceneView<'_>);
}

/// Owns the scene, camera, controls and surface of one globe, and implements
/// the resize and per-frame update steps.
pub struct SceneRenderer<S> {
	surface: S,
	camera: PerspectiveCamera,
	controls: OrbitControls,
	mesh: Mesh,
	light: AmbientLight,
	rotation_step: f64,
	rotation_angle: f64,
	viewport: (f64, f64),
}

impl<S: Scene3D> SceneRenderer<S> {
	/// Builds the scene for a container of `width` x `height` and sizes the surface to it.
	pub fn new(surface: S, width: f64, height: f64, config: &SceneConfig) -> Self {
		let aspect = if height > 0.0 { width / height } else { 1.0 };
		let mut camera = PerspectiveCamera::new(config.fov_deg, aspect, config.near, config.far);
		camera.position = Vec3::from_array(config.camera_position);

		let mut renderer = Self {
			surface,
			camera,
			controls: OrbitControls::new(config.enable_damping, config.damping_factor),
			mesh: Mesh {
				geometry: SphereGeometry {
					radius: config.sphere_radius,
					width_segments: config.width_segments,
					height_segments: config.height_segments,
				},
				material: PhongMaterial {
					color: config.color,
				},
				rotation: Vec3::ZERO,
			},
			light: AmbientLight {
				color: config.ambient_color,
				intensity: config.ambient_intensity,
			},
			rotation_step: config.rotation_step,
			rotation_angle: 0.0,
			viewport: (0.0, 0.0),
		};
		renderer.resize(width, height);
		renderer
	}

	/// Matches camera aspect and surface size to the container's current size.
	///
	/// A zero height leaves the aspect untouched.
	pub fn resize(&mut self, width: f64, height: f64) {
		if height > 0.0 {
			self.camera.aspect = width / height;
			self.camera.update_projection_matrix();
		}
		self.surface.set_size(width, height);
		self.viewport = (width, height);
		log::debug!("globe viewport {}x{}", width, height);
	}

	/// One animation step: rotate the mesh, integrate the controls, draw.
	pub fn frame(&mut self) {
		self.rotation_angle += self.rotation_step;
		self.mesh.rotation.y = self.rotation_angle as f32;
		self.controls.update(&mut self.camera);
		self.surface.render(&SceneView {
			camera: &self.camera,
			mesh: &self.mesh,
			light: &self.light,
		});
	}

	pub fn rotation_angle(&self) -> f64 {
		self.rotation_angle
	}

	pub fn viewport(&self) -> (f64, f64) {
		self.viewport
	}

	pub fn camera(&self) -> &PerspectiveCamera {
		&self.camera
	}

	pub fn controls_mut(&mut self) -> &mut OrbitControls {
		&mut self.controls
	}

	pub fn mesh(&self) -> &Mesh {
		&self.mesh
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use super::*;

	/// Records what the renderer asked of it.
	#[derive(Default, Debug)]
	pub struct FakeSurface {
		pub size: (f64, f64),
		pub resizes: usize,
		pub renders: usize,
		pub last_rotation: Option<f32>,
		pub last_aspect: Option<f64>,
	}

	impl Scene3D for FakeSurface {
		fn set_size(&mut self, width: f64, height: f64) {
			self.size = (width, height);
			self.resizes += 1;
		}

		fn render(&mut self, view: &SceneView<'_>) {
			self.renders += 1;
			self.last_rotation = Some(view.mesh.rotation.y);
			self.last_aspect = Some(view.camera.aspect);
		}
	}
}
