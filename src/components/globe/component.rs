use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Document, WheelEvent};

use super::render::CanvasScene;
use super::scene::SceneRenderer;
use crate::animation::{AnimationHandle, RafScheduler, start_loop};
use crate::config::{GLOBE_MOUNT_ID, SCENE_CONFIG_ATTR, SceneConfig};
use crate::dom::{self, EventListener};
use crate::error::Result;

/// A running globe. Dropping it (or calling [`SceneHandle::stop`]) stops the
/// frame loop and detaches every listener.
pub struct SceneHandle {
	renderer: Rc<RefCell<SceneRenderer<CanvasScene>>>,
	animation: AnimationHandle,
	listeners: RefCell<Vec<EventListener>>,
}

impl SceneHandle {
	pub fn stop(&self) {
		self.animation.stop();
		self.listeners.borrow_mut().clear();
	}

	pub fn is_running(&self) -> bool {
		self.animation.is_running()
	}

	pub fn rotation_angle(&self) -> f64 {
		self.renderer.borrow().rotation_angle()
	}
}

impl Drop for SceneHandle {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Mounts a rotating globe under `#mount_id` and starts its frame loop.
///
/// `config` is overlaid by a JSON object in the mount's `data-scene-config`
/// attribute when one is present.
pub fn init_scene_renderer(
	document: &Document,
	mount_id: &str,
	config: SceneConfig,
) -> Result<SceneHandle> {
	let mount = dom::mount_point(document, mount_id)?;
	let config = match mount.get_attribute(SCENE_CONFIG_ATTR) {
		Some(raw) => config.overlay(&raw)?,
		None => config,
	};
	let (width, height) = dom::client_size(&mount);
	let (canvas, ctx) = dom::create_canvas(document, "globe-canvas", "grab")?;
	let surface = CanvasScene::new(canvas.clone(), ctx, config.background.clone());
	let renderer = Rc::new(RefCell::new(SceneRenderer::new(
		surface, width, height, &config,
	)));

	let window = dom::window()?;
	let mut listeners = Vec::new();

	let (r, resize_mount) = (renderer.clone(), mount.clone());
	listeners.push(EventListener::new(&window, "resize", move |_| {
		let (w, h) = dom::client_size(&resize_mount);
		r.borrow_mut().resize(w, h);
	})?);

	let (r, c) = (renderer.clone(), canvas.clone());
	listeners.push(EventListener::mouse(&canvas, "mousedown", move |ev| {
		let (x, y) = dom::pointer_position(&c, ev);
		r.borrow_mut().controls_mut().pointer_down(x, y);
	})?);

	let (r, c) = (renderer.clone(), canvas.clone());
	listeners.push(EventListener::mouse(&canvas, "mousemove", move |ev| {
		let mut renderer = r.borrow_mut();
		if !renderer.controls_mut().is_dragging() {
			return;
		}
		let (x, y) = dom::pointer_position(&c, ev);
		let height = renderer.viewport().1;
		renderer.controls_mut().pointer_move(x, y, height);
	})?);

	for kind in ["mouseup", "mouseleave"] {
		let r = renderer.clone();
		listeners.push(EventListener::mouse(&canvas, kind, move |_| {
			r.borrow_mut().controls_mut().pointer_up();
		})?);
	}

	let r = renderer.clone();
	listeners.push(EventListener::new(&canvas, "wheel", move |ev| {
		if let Some(ev) = ev.dyn_ref::<WheelEvent>() {
			ev.prevent_default();
			r.borrow_mut().controls_mut().wheel(ev.delta_y());
		}
	})?);

	dom::attach(&mount, &canvas)?;
	log::info!("globe mounted on #{} at {}x{}", mount_id, width, height);

	let r = renderer.clone();
	let animation = start_loop(Rc::new(RafScheduler::new(window)), move || {
		let mut renderer = r.borrow_mut();
		if !renderer.surface().canvas().is_connected() {
			log::debug!("globe canvas detached, stopping");
			return ControlFlow::Break(());
		}
		renderer.frame();
		ControlFlow::Continue(())
	});

	Ok(SceneHandle {
		renderer,
		animation,
		listeners: RefCell::new(listeners),
	})
}

/// JS-facing handle returned by `initGlobe`.
#[wasm_bindgen]
pub struct GlobeHandle(SceneHandle);

#[wasm_bindgen]
impl GlobeHandle {
	/// Stops the frame loop and detaches listeners.
	pub fn stop(&self) {
		self.0.stop();
	}

	#[wasm_bindgen(getter, js_name = rotationAngle)]
	pub fn rotation_angle(&self) -> f64 {
		self.0.rotation_angle()
	}
}

/// Mounts the globe from page script: `initGlobe()` or `initGlobe("some-id")`.
#[wasm_bindgen(js_name = initGlobe)]
pub fn init_globe(mount_id: Option<String>) -> std::result::Result<GlobeHandle, JsValue> {
	let document = dom::document()?;
	let mount_id = mount_id.as_deref().unwrap_or(GLOBE_MOUNT_ID);
	Ok(GlobeHandle(init_scene_renderer(
		&document,
		mount_id,
		SceneConfig::default(),
	)?))
}

/// Container div with the globe mounted into it.
#[component]
pub fn GlobeCanvas(#[prop(default = SceneConfig::default())] config: SceneConfig) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let handle: Rc<RefCell<Option<SceneHandle>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		if container_ref.get().is_none() || handle.borrow().is_some() {
			return;
		}
		let mounted = dom::document()
			.and_then(|document| init_scene_renderer(&document, GLOBE_MOUNT_ID, config.clone()));
		match mounted {
			Ok(h) => *handle.borrow_mut() = Some(h),
			Err(err) => log::error!("globe init failed: {}", err),
		}
	});

	view! {
		<div
			node_ref=container_ref
			id=GLOBE_MOUNT_ID
			class="globe-container"
			style="width: 100%; height: 100vh; cursor: grab;"
		/>
	}
}
