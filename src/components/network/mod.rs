//! Node/edge network diagrams with a live force layout.

mod component;
mod dataset;
mod options;
mod render;
mod state;
mod types;
mod view;

pub use component::{
	CanvasNetworkView, NetworkCanvas, NetworkInstance, embedded_payload, page_payload, render_graph,
};
pub use dataset::{DataSet, Keyed, NetworkData, PayloadPolicy, shape_payload};
pub use options::{
	BarnesHut, EdgeStyle, Font, InteractionOptions, NetworkOptions, NodeColor, NodeShape, NodeStyle,
	PhysicsOptions,
};
pub use state::NetworkState;
pub use types::{EdgeRecord, ItemId, NetworkPayload, NodeRecord};
pub use view::{NetworkGraphView, NetworkRenderer};
