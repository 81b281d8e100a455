use super::dataset::{NetworkData, PayloadPolicy, shape_payload};
use super::options::NetworkOptions;
use super::types::NetworkPayload;
use crate::error::Result;

/// A graph-drawing engine able to mount live network visualizations.
pub trait NetworkGraphView {
	/// Handle to one mounted visualization.
	type Handle;

	/// Mounts a visualization of `data` under `#mount_id` and starts its own loop.
	fn mount(
		&mut self,
		mount_id: &str,
		data: NetworkData,
		options: &NetworkOptions,
	) -> Result<Self::Handle>;

	/// Stops and removes a visualization previously returned by `mount`.
	fn destroy(&mut self, handle: Self::Handle);
}

/// Turns node/edge payloads into mounted visualizations.
///
/// Holds on to the live visualization: rendering again destroys the previous
/// one before mounting the new one.
pub struct NetworkRenderer<V: NetworkGraphView> {
	view: V,
	options: NetworkOptions,
	policy: PayloadPolicy,
	active: Option<V::Handle>,
}

impl<V: NetworkGraphView> NetworkRenderer<V> {
	pub fn new(view: V, options: NetworkOptions) -> Self {
		Self {
			view,
			options,
			policy: PayloadPolicy::default(),
			active: None,
		}
	}

	pub fn with_policy(mut self, policy: PayloadPolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn options(&self) -> &NetworkOptions {
		&self.options
	}

	/// Shapes `payload` and mounts it under `#mount_id`, replacing any
	/// visualization this renderer mounted before.
	///
	/// A payload rejected by the policy leaves the current visualization alone.
	pub fn render(&mut self, payload: NetworkPayload, mount_id: &str) -> Result<()> {
		let data = shape_payload(payload, self.policy)?;
		let (nodes, edges) = (data.nodes.len(), data.edges.len());
		if let Some(previous) = self.active.take() {
			log::debug!("replacing previous network");
			self.view.destroy(previous);
		}
		self.active = Some(self.view.mount(mount_id, data, &self.options)?);
		log::info!("network mounted on #{} ({} nodes, {} edges)", mount_id, nodes, edges);
		Ok(())
	}

	/// Destroys the live visualization, if any.
	pub fn clear(&mut self) {
		if let Some(handle) = self.active.take() {
			self.view.destroy(handle);
		}
	}

	pub fn is_mounted(&self) -> bool {
		self.active.is_some()
	}

	pub fn view(&self) -> &V {
		&self.view
	}
}

impl<V: NetworkGraphView> Drop for NetworkRenderer<V> {
	fn drop(&mut self) {
		self.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network::types::{EdgeRecord, ItemId, NodeRecord};
	use crate::error::VizError;

	#[derive(Default)]
	struct FakeView {
		mounts: Vec<String>,
		live: Vec<usize>,
		destroyed: Vec<usize>,
		last: Option<NetworkData>,
		next: usize,
	}

	impl NetworkGraphView for FakeView {
		type Handle = usize;

		fn mount(
			&mut self,
			mount_id: &str,
			data: NetworkData,
			_options: &NetworkOptions,
		) -> Result<usize> {
			if mount_id != "viz" {
				return Err(VizError::MissingMountPoint(mount_id.into()));
			}
			self.mounts.push(mount_id.into());
			self.last = Some(data);
			self.next += 1;
			self.live.push(self.next);
			Ok(self.next)
		}

		fn destroy(&mut self, handle: usize) {
			self.live.retain(|h| *h != handle);
			self.destroyed.push(handle);
		}
	}

	fn payload() -> NetworkPayload {
		NetworkPayload {
			nodes: vec![NodeRecord::new(1), NodeRecord::new(2), NodeRecord::new(3)],
			edges: vec![EdgeRecord::new(1, 2), EdgeRecord::new(2, 3)],
		}
	}

	#[test]
	fn render_hands_keyed_sets_to_view() {
		let mut r = NetworkRenderer::new(FakeView::default(), NetworkOptions::default());
		r.render(payload(), "viz").unwrap();
		let data = r.view().last.as_ref().unwrap();
		assert_eq!(data.nodes.len(), 3);
		assert_eq!(data.edges.len(), 2);
		assert!(data.nodes.contains(&ItemId::Int(3)));
		assert!(r.is_mounted());
	}

	#[test]
	fn second_render_replaces_first() {
		let mut r = NetworkRenderer::new(FakeView::default(), NetworkOptions::default());
		r.render(payload(), "viz").unwrap();
		r.render(payload(), "viz").unwrap();
		assert_eq!(r.view().live, vec![2]);
		assert_eq!(r.view().destroyed, vec![1]);
	}

	#[test]
	fn missing_mount_is_reported() {
		let mut r = NetworkRenderer::new(FakeView::default(), NetworkOptions::default());
		let err = r.render(payload(), "nowhere").unwrap_err();
		assert_eq!(err, VizError::MissingMountPoint("nowhere".into()));
		assert!(!r.is_mounted());
	}

	#[test]
	fn rejected_payload_keeps_current_view() {
		let mut r = NetworkRenderer::new(FakeView::default(), NetworkOptions::default())
			.with_policy(PayloadPolicy::Strict);
		r.render(payload(), "viz").unwrap();
		let mut bad = payload();
		bad.edges.push(EdgeRecord::new(3, 4));
		assert!(matches!(r.render(bad, "viz"), Err(VizError::MalformedPayload(_))));
		assert_eq!(r.view().live, vec![1]);
	}

	#[test]
	fn clear_destroys_live_view() {
		let mut r = NetworkRenderer::new(FakeView::default(), NetworkOptions::default());
		r.render(payload(), "viz").unwrap();
		r.clear();
		assert!(r.view().live.is_empty());
		assert!(!r.is_mounted());
	}
}
