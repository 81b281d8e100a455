//! Thin helpers over `web-sys` used by both components.

use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Element, Event, EventTarget, HtmlCanvasElement, MouseEvent,
	Window,
};

use crate::error::{Result, VizError};

pub fn window() -> Result<Window> {
	web_sys::window().ok_or_else(|| VizError::Dom("no global window".into()))
}

pub fn document() -> Result<Document> {
	window()?
		.document()
		.ok_or_else(|| VizError::Dom("window has no document".into()))
}

/// Looks up a mount element by id.
pub fn mount_point(document: &Document, id: &str) -> Result<Element> {
	document
		.get_element_by_id(id)
		.ok_or_else(|| VizError::MissingMountPoint(id.to_owned()))
}

/// Current client size of an element in CSS pixels.
pub fn client_size(element: &Element) -> (f64, f64) {
	(element.client_width() as f64, element.client_height() as f64)
}

/// Creates a detached block-level canvas and its 2d context.
///
/// Listeners can be registered on it before [`attach`] puts it in the page,
/// so a failed setup leaves nothing behind in the mount.
pub fn create_canvas(
	document: &Document,
	class: &str,
	cursor: &str,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d)> {
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")?
		.dyn_into()
		.map_err(|_| VizError::Dom("created element is not a canvas".into()))?;
	canvas.set_class_name(class);
	let style = canvas.style();
	style.set_property("display", "block")?;
	style.set_property("cursor", cursor)?;

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| VizError::Dom("canvas has no 2d context".into()))?
		.dyn_into()
		.map_err(|_| VizError::Dom("2d context has an unexpected type".into()))?;
	Ok((canvas, ctx))
}

/// Appends `canvas` under `mount`.
pub fn attach(mount: &Element, canvas: &HtmlCanvasElement) -> Result<()> {
	mount.append_child(canvas)?;
	Ok(())
}

/// Pointer position relative to the canvas' top-left corner.
pub fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// An attached event listener; dropping it detaches the callback.
pub struct EventListener {
	target: EventTarget,
	kind: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	pub fn new<F>(target: &EventTarget, kind: &'static str, callback: F) -> Result<Self>
	where
		F: FnMut(Event) + 'static,
	{
		let callback = Closure::<dyn FnMut(Event)>::new(callback);
		target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			kind,
			callback,
		})
	}

	/// Listener whose callback receives the event as a [`MouseEvent`]; other events are ignored.
	pub fn mouse<F>(target: &EventTarget, kind: &'static str, mut callback: F) -> Result<Self>
	where
		F: FnMut(&MouseEvent) + 'static,
	{
		Self::new(target, kind, move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				callback(ev);
			}
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
	}
}
