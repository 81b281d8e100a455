//! DOM-level checks; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use orbit_views::VizError;
use orbit_views::components::network::{
	CanvasNetworkView, NetworkData, NetworkGraphView, NetworkOptions,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
	web_sys::window().unwrap().document().unwrap()
}

fn mount(id: &str) -> Element {
	let doc = document();
	let div = doc.create_element("div").unwrap();
	div.set_id(id);
	div.set_attribute("style", "width: 300px; height: 200px;").unwrap();
	doc.body().unwrap().append_child(&div).unwrap();
	div
}

#[wasm_bindgen_test]
fn network_canvas_is_styled_and_removed_on_destroy() {
	let host = mount("viz-styled");
	let mut view = CanvasNetworkView::new(document());
	let handle = view
		.mount("viz-styled", NetworkData::default(), &NetworkOptions::default())
		.unwrap();

	assert_eq!(host.child_element_count(), 1);
	let canvas: HtmlElement = host.first_element_child().unwrap().dyn_into().unwrap();
	assert_eq!(canvas.style().get_property_value("cursor").unwrap(), "grab");
	assert_eq!(canvas.style().get_property_value("display").unwrap(), "block");

	view.destroy(handle);
	assert_eq!(host.child_element_count(), 0);
	host.remove();
}

#[wasm_bindgen_test]
fn missing_network_mount_leaves_page_untouched() {
	let before = document().body().unwrap().child_element_count();
	let mut view = CanvasNetworkView::new(document());
	let err = view
		.mount("viz-absent", NetworkData::default(), &NetworkOptions::default())
		.err()
		.unwrap();
	assert_eq!(err, VizError::MissingMountPoint("viz-absent".into()));
	assert_eq!(document().body().unwrap().child_element_count(), before);
}

#[wasm_bindgen_test]
fn globe_attaches_one_canvas_and_bad_override_attaches_none() {
	use orbit_views::components::globe::init_scene_renderer;
	use orbit_views::config::SceneConfig;

	let host = mount("globe-ok");
	let handle = init_scene_renderer(&document(), "globe-ok", SceneConfig::default()).unwrap();
	assert_eq!(host.child_element_count(), 1);
	handle.stop();
	host.remove();

	let host = mount("globe-bad");
	host.set_attribute("data-scene-config", "{fovDeg:").unwrap();
	let err = init_scene_renderer(&document(), "globe-bad", SceneConfig::default()).err();
	assert!(matches!(err, Some(VizError::Decode(_))));
	assert_eq!(host.child_element_count(), 0);
	host.remove();
}
