use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, WheelEvent};

use super::dataset::{NetworkData, PayloadPolicy};
use super::options::NetworkOptions;
use super::render;
use super::state::{NetworkState, STEP};
use super::types::NetworkPayload;
use super::view::{NetworkGraphView, NetworkRenderer};
use crate::animation::{AnimationHandle, RafScheduler, start_loop};
use crate::config::{GRAPH_DATA_ID, NETWORK_MOUNT_ID};
use crate::dom::{self, EventListener};
use crate::error::Result;

/// Canvas-backed network engine: force layout, hover, drag, pan and zoom.
pub struct CanvasNetworkView {
	document: Document,
}

impl CanvasNetworkView {
	pub fn new(document: Document) -> Self {
		Self { document }
	}
}

/// One mounted network; destroyed through [`NetworkGraphView::destroy`].
pub struct NetworkInstance {
	canvas: HtmlCanvasElement,
	animation: AnimationHandle,
	_listeners: Vec<EventListener>,
}

impl NetworkGraphView for CanvasNetworkView {
	type Handle = NetworkInstance;

	fn mount(
		&mut self,
		mount_id: &str,
		data: NetworkData,
		options: &NetworkOptions,
	) -> Result<NetworkInstance> {
		let mount = dom::mount_point(&self.document, mount_id)?;
		let (w, h) = dom::client_size(&mount);
		let (canvas, ctx) = dom::create_canvas(&self.document, "network-canvas", "grab")?;
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let state = Rc::new(RefCell::new(NetworkState::new(&data, options.clone(), w, h)));
		let mut listeners = Vec::new();

		let (s, c) = (state.clone(), canvas.clone());
		listeners.push(EventListener::mouse(&canvas, "mousedown", move |ev| {
			let (x, y) = dom::pointer_position(&c, ev);
			s.borrow_mut().pointer_down(x, y);
		})?);

		let (s, c) = (state.clone(), canvas.clone());
		listeners.push(EventListener::mouse(&canvas, "mousemove", move |ev| {
			let (x, y) = dom::pointer_position(&c, ev);
			s.borrow_mut().pointer_move(x, y);
		})?);

		let s = state.clone();
		listeners.push(EventListener::mouse(&canvas, "mouseup", move |_| {
			s.borrow_mut().pointer_up();
		})?);

		let s = state.clone();
		listeners.push(EventListener::mouse(&canvas, "mouseleave", move |_| {
			s.borrow_mut().pointer_leave();
		})?);

		let (s, c) = (state.clone(), canvas.clone());
		listeners.push(EventListener::new(&canvas, "wheel", move |ev| {
			if let Some(ev) = ev.dyn_ref::<WheelEvent>() {
				ev.prevent_default();
				let (x, y) = dom::pointer_position(&c, ev);
				s.borrow_mut().zoom_at(x, y, ev.delta_y());
			}
		})?);

		let window = dom::window()?;
		let (s, c, m) = (state.clone(), canvas.clone(), mount.clone());
		listeners.push(EventListener::new(&window, "resize", move |_| {
			let (w, h) = dom::client_size(&m);
			c.set_width(w as u32);
			c.set_height(h as u32);
			s.borrow_mut().resize(w, h);
		})?);

		dom::attach(&mount, &canvas)?;

		let (s, c) = (state, canvas.clone());
		let animation = start_loop(Rc::new(RafScheduler::new(window)), move || {
			if !c.is_connected() {
				return ControlFlow::Break(());
			}
			let mut state = s.borrow_mut();
			state.tick(STEP);
			render::render(&state, &ctx);
			ControlFlow::Continue(())
		});

		Ok(NetworkInstance {
			canvas,
			animation,
			_listeners: listeners,
		})
	}

	fn destroy(&mut self, handle: NetworkInstance) {
		handle.animation.stop();
		handle.canvas.remove();
	}
}

/// Reads a payload embedded in the page as JSON text, if the element exists.
pub fn embedded_payload(document: &Document, id: &str) -> Option<Result<NetworkPayload>> {
	let element = document.get_element_by_id(id)?;
	let raw = element.text_content().unwrap_or_default();
	Some(NetworkPayload::from_json(&raw))
}

thread_local! {
	static PAGE_RENDERER: RefCell<Option<NetworkRenderer<CanvasNetworkView>>> =
		const { RefCell::new(None) };
}

/// Page-script entry point: `renderGraph({ nodes, edges })` draws into `#viz`.
///
/// Calling it again replaces the previous network.
#[wasm_bindgen(js_name = renderGraph)]
pub fn render_graph(data: JsValue) -> std::result::Result<(), JsValue> {
	let raw: String = js_sys::JSON::stringify(&data)?.into();
	let payload = NetworkPayload::from_json(&raw)?;
	PAGE_RENDERER.with(|slot| {
		let mut slot = slot.borrow_mut();
		let mut renderer = match slot.take() {
			Some(renderer) => renderer,
			None => NetworkRenderer::new(
				CanvasNetworkView::new(dom::document()?),
				NetworkOptions::default(),
			),
		};
		let rendered = renderer.render(payload, NETWORK_MOUNT_ID);
		*slot = Some(renderer);
		rendered
	})?;
	Ok(())
}

/// Container div with a network visualization of `payload` mounted into it.
///
/// A new payload replaces the drawn network.
#[component]
pub fn NetworkCanvas(
	#[prop(into)] payload: Signal<NetworkPayload>,
	#[prop(default = NetworkOptions::default())] options: NetworkOptions,
	#[prop(default = PayloadPolicy::Lenient)] policy: PayloadPolicy,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let renderer: Rc<RefCell<Option<NetworkRenderer<CanvasNetworkView>>>> =
		Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let payload = payload.get();
		if container_ref.get().is_none() {
			return;
		}
		let mut slot = renderer.borrow_mut();
		if slot.is_none() {
			match dom::document() {
				Ok(document) => {
					*slot = Some(
						NetworkRenderer::new(CanvasNetworkView::new(document), options.clone())
							.with_policy(policy),
					)
				}
				Err(err) => {
					log::error!("network init failed: {}", err);
					return;
				}
			}
		}
		if let Some(renderer) = slot.as_mut() {
			if let Err(err) = renderer.render(payload, NETWORK_MOUNT_ID) {
				log::error!("network render failed: {}", err);
			}
		}
	});

	view! {
		<div
			node_ref=container_ref
			id=NETWORK_MOUNT_ID
			class="viz"
			style="width: 100%; height: 100vh;"
		/>
	}
}

/// Payload embedded in the page under `#graph-data`, if any.
pub fn page_payload() -> Option<NetworkPayload> {
	let document = dom::document().ok()?;
	match embedded_payload(&document, GRAPH_DATA_ID)? {
		Ok(payload) => Some(payload),
		Err(err) => {
			log::warn!("ignoring embedded graph data: {}", err);
			None
		}
	}
}
