use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{Scene3D, SceneView};

/// Tessellation lines drawn per graticule line.
const GRID_STRIDE: u32 = 8;

/// Draws the globe on a 2d canvas: a lit silhouette plus a rotating graticule.
pub struct CanvasScene {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	background: String,
	width: f64,
	height: f64,
}

impl CanvasScene {
	pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, background: String) -> Self {
		Self {
			canvas,
			ctx,
			background,
			width: 0.0,
			height: 0.0,
		}
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}

	fn draw_graticule(&self, view: &SceneView<'_>, model: Mat4, stroke: &str) {
		let geometry = view.mesh.geometry;
		let (w_seg, h_seg) = (geometry.width_segments.max(3), geometry.height_segments.max(2));
		let eye = view.camera.position;
		let radius = geometry.radius;
		let ctx = &self.ctx;
		ctx.set_stroke_style_str(stroke);
		ctx.set_line_width(1.0);

		// parallels
		for j in (GRID_STRIDE..h_seg).step_by(GRID_STRIDE as usize) {
			let phi = PI * j as f32 / h_seg as f32;
			let points: Vec<Vec3> = (0..=w_seg)
				.map(|i| sphere_point(radius, phi, TAU * i as f32 / w_seg as f32))
				.collect();
			self.stroke_visible(view, model, eye, &points);
		}
		// meridians
		for i in (0..w_seg).step_by(GRID_STRIDE as usize) {
			let theta = TAU * i as f32 / w_seg as f32;
			let points: Vec<Vec3> = (0..=h_seg)
				.map(|j| sphere_point(radius, PI * j as f32 / h_seg as f32, theta))
				.collect();
			self.stroke_visible(view, model, eye, &points);
		}
	}

	/// Strokes the polyline, breaking it wherever it turns away from the eye.
	fn stroke_visible(&self, view: &SceneView<'_>, model: Mat4, eye: Vec3, points: &[Vec3]) {
		let ctx = &self.ctx;
		let mut pen_down = false;
		ctx.begin_path();
		for local in points {
			let world = model.transform_point3(*local);
			let facing = world.normalize_or_zero().dot(eye - world) > 0.0;
			let screen = facing
				.then(|| view.camera.project(world, self.width, self.height))
				.flatten();
			match screen {
				Some((x, y)) if pen_down => ctx.line_to(x, y),
				Some((x, y)) => {
					ctx.move_to(x, y);
					pen_down = true;
				}
				None => pen_down = false,
			}
		}
		ctx.stroke();
	}
}

impl Scene3D for CanvasScene {
	fn set_size(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	fn render(&mut self, view: &SceneView<'_>) {
		let ctx = &self.ctx;
		ctx.set_fill_style_str(&self.background);
		ctx.fill_rect(0.0, 0.0, self.width, self.height);

		let camera = view.camera;
		let Some((cx, cy)) = camera.project(Vec3::ZERO, self.width, self.height) else {
			return;
		};
		let radius = silhouette_radius(
			camera.position.length(),
			view.mesh.geometry.radius,
			camera.fov_y_deg,
			self.height,
		);
		if radius <= 0.0 {
			return;
		}

		let base = lit_color(view.mesh.material.color, view.light.color, view.light.intensity);
		ctx.begin_path();
		let _ = ctx.arc(cx, cy, radius, 0.0, std::f64::consts::TAU);
		ctx.set_fill_style_str(&css_rgb(base, 1.0));
		ctx.fill();

		let model = Mat4::from_rotation_y(view.mesh.rotation.y)
			* Mat4::from_rotation_x(view.mesh.rotation.x)
			* Mat4::from_rotation_z(view.mesh.rotation.z);
		self.draw_graticule(view, model, &css_rgb(brighten(base, 0.35), 0.6));
	}
}

fn sphere_point(radius: f32, phi: f32, theta: f32) -> Vec3 {
	Vec3::new(
		-radius * theta.cos() * phi.sin(),
		radius * phi.cos(),
		radius * theta.sin() * phi.sin(),
	)
}

/// Screen-space radius of a sphere of `radius` seen from `distance` at its centre.
pub(crate) fn silhouette_radius(distance: f32, radius: f32, fov_y_deg: f32, height: f64) -> f64 {
	if distance <= radius {
		return 0.0;
	}
	let angular = (radius / distance).asin();
	let half_fov = (fov_y_deg.to_radians() * 0.5).tan();
	(angular.tan() / half_fov) as f64 * height * 0.5
}

/// Material colour under ambient light only.
pub(crate) fn lit_color(material: u32, light: u32, intensity: f32) -> [u8; 3] {
	let channel = |shift: u32| {
		let m = ((material >> shift) & 0xff) as f32 / 255.0;
		let l = ((light >> shift) & 0xff) as f32 / 255.0;
		((m * l * intensity).clamp(0.0, 1.0) * 255.0).round() as u8
	};
	[channel(16), channel(8), channel(0)]
}

fn brighten(rgb: [u8; 3], amount: f32) -> [u8; 3] {
	rgb.map(|c| (c as f32 + (255.0 - c as f32) * amount).round() as u8)
}

fn css_rgb([r, g, b]: [u8; 3], alpha: f64) -> String {
	format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}
