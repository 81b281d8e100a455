//! Rotating 3D globe on a 2d canvas.

mod camera;
mod component;
mod controls;
mod render;
mod scene;

pub use camera::PerspectiveCamera;
pub use component::{GlobeCanvas, GlobeHandle, SceneHandle, init_globe, init_scene_renderer};
pub use controls::OrbitControls;
pub use render::CanvasScene;
pub use scene::{
	AmbientLight, Mesh, PhongMaterial, Scene3D, SceneRenderer, SceneView, SphereGeometry,
};
