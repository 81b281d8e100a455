use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::rc::Rc;

use orbit_views::animation::{FrameScheduler, start_loop};
use orbit_views::components::globe::{Scene3D, SceneRenderer, SceneView};
use orbit_views::components::network::{
	EdgeRecord, ItemId, NetworkData, NetworkGraphView, NetworkOptions, NetworkPayload,
	NetworkRenderer, NodeRecord, PayloadPolicy,
};
use orbit_views::config::SceneConfig;
use orbit_views::{PayloadIssue, VizError};

#[derive(Default)]
struct Frames {
	queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl Frames {
	fn run_frame(&self) {
		let batch: Vec<_> = self.queue.borrow_mut().drain(..).collect();
		for frame in batch {
			frame();
		}
	}
}

impl FrameScheduler for Frames {
	fn request_frame(&self, frame: Box<dyn FnOnce()>) {
		self.queue.borrow_mut().push_back(frame);
	}
}

#[derive(Default)]
struct Surface {
	size: (f64, f64),
	renders: Rc<Cell<usize>>,
}

impl Scene3D for Surface {
	fn set_size(&mut self, width: f64, height: f64) {
		self.size = (width, height);
	}

	fn render(&mut self, _view: &SceneView<'_>) {
		self.renders.set(self.renders.get() + 1);
	}
}

#[test]
fn globe_end_to_end_800x600() {
	let renders = Rc::new(Cell::new(0));
	let surface = Surface {
		renders: renders.clone(),
		..Default::default()
	};
	let renderer = Rc::new(RefCell::new(SceneRenderer::new(
		surface,
		800.0,
		600.0,
		&SceneConfig::default(),
	)));
	assert_eq!(renderer.borrow().surface().size, (800.0, 600.0));
	assert!((renderer.borrow().camera().aspect - 4.0 / 3.0).abs() < 1e-12);

	let frames = Rc::new(Frames::default());
	let r = renderer.clone();
	let handle = start_loop(frames.clone(), move || {
		r.borrow_mut().frame();
		ControlFlow::Continue(())
	});

	frames.run_frame();
	assert_eq!(renders.get(), 1);
	assert!((renderer.borrow().rotation_angle() - 0.002).abs() < 1e-12);

	for _ in 0..99 {
		frames.run_frame();
	}
	assert_eq!(renders.get(), 100);
	assert!((renderer.borrow().rotation_angle() - 0.2).abs() < 1e-9);

	renderer.borrow_mut().resize(1280.0, 720.0);
	assert_eq!(renderer.borrow().camera().aspect, 1280.0 / 720.0);
	assert_eq!(renderer.borrow().surface().size, (1280.0, 720.0));

	handle.stop();
	frames.run_frame();
	assert_eq!(renders.get(), 100);
}

#[derive(Default)]
struct RecordingView {
	mounted: Vec<(String, usize, usize)>,
	live: usize,
}

impl NetworkGraphView for RecordingView {
	type Handle = ();

	fn mount(
		&mut self,
		mount_id: &str,
		data: NetworkData,
		_options: &NetworkOptions,
	) -> Result<(), VizError> {
		self.mounted
			.push((mount_id.to_owned(), data.nodes.len(), data.edges.len()));
		self.live += 1;
		Ok(())
	}

	fn destroy(&mut self, _handle: ()) {
		self.live -= 1;
	}
}

#[test]
fn network_payload_from_page_json() {
	let payload = NetworkPayload::from_json(
		r#"{"nodes": [{"id": 1}, {"id": 2}, {"id": 3}],
		    "edges": [{"from": 1, "to": 2}, {"from": 2, "to": 3}]}"#,
	)
	.unwrap();

	let mut renderer = NetworkRenderer::new(RecordingView::default(), NetworkOptions::default());
	renderer.render(payload.clone(), "viz").unwrap();
	renderer.render(payload, "viz").unwrap();
	assert_eq!(renderer.view().mounted, vec![("viz".to_owned(), 3, 2); 2]);
	assert_eq!(renderer.view().live, 1);
}

#[test]
fn duplicate_ids_resolve_deterministically() {
	let payload = || NetworkPayload {
		nodes: vec![
			NodeRecord::new(1).with_label("a"),
			NodeRecord::new(1).with_label("b"),
		],
		edges: vec![EdgeRecord::new(1, 1)],
	};

	let mut lenient = NetworkRenderer::new(RecordingView::default(), NetworkOptions::default());
	lenient.render(payload(), "viz").unwrap();
	assert_eq!(lenient.view().mounted[0].1, 1);

	let mut strict = NetworkRenderer::new(RecordingView::default(), NetworkOptions::default())
		.with_policy(PayloadPolicy::Strict);
	assert_eq!(
		strict.render(payload(), "viz").unwrap_err(),
		VizError::MalformedPayload(PayloadIssue::DuplicateNode {
			index: 1,
			id: ItemId::Int(1),
		})
	);
	assert!(strict.view().mounted.is_empty());
}
