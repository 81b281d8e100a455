use std::collections::HashMap;

use super::types::{EdgeRecord, ItemId, NetworkPayload, NodeRecord};
use crate::error::{PayloadIssue, Result, VizError};

/// A record that may carry an identifier.
pub trait Keyed {
	fn key(&self) -> Option<&ItemId>;
}

impl Keyed for NodeRecord {
	fn key(&self) -> Option<&ItemId> {
		Some(&self.id)
	}
}

impl Keyed for EdgeRecord {
	fn key(&self) -> Option<&ItemId> {
		self.id.as_ref()
	}
}

/// Identifier-keyed, order-preserving record container.
///
/// Inserting a record whose id is already present replaces the stored record
/// in place (last write wins, first position kept). Records without an id
/// are always appended.
#[derive(Clone, Debug)]
pub struct DataSet<T> {
	items: Vec<T>,
	index: HashMap<ItemId, usize>,
}

impl<T> Default for DataSet<T> {
	fn default() -> Self {
		Self {
			items: Vec::new(),
			index: HashMap::new(),
		}
	}
}

impl<T: Keyed> DataSet<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts `item`, returning the record it replaced, if any.
	pub fn insert(&mut self, item: T) -> Option<T> {
		let Some(key) = item.key().cloned() else {
			self.items.push(item);
			return None;
		};
		match self.index.get(&key) {
			Some(&pos) => Some(std::mem::replace(&mut self.items[pos], item)),
			None => {
				self.index.insert(key, self.items.len());
				self.items.push(item);
				None
			}
		}
	}

	pub fn get(&self, id: &ItemId) -> Option<&T> {
		self.index.get(id).map(|&pos| &self.items[pos])
	}

	pub fn contains(&self, id: &ItemId) -> bool {
		self.index.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> {
		self.items.iter()
	}
}

impl<T: Keyed> FromIterator<T> for DataSet<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut set = Self::new();
		for item in iter {
			set.insert(item);
		}
		set
	}
}

/// How payload identifier problems are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PayloadPolicy {
	/// Collapse duplicate node ids (last write wins) and keep dangling edges;
	/// both are logged. The drawing backend skips dangling edges.
	#[default]
	Lenient,
	/// Reject the payload at the first duplicate node id or dangling edge.
	Strict,
}

/// Node and edge sets ready to hand to a view.
#[derive(Clone, Debug, Default)]
pub struct NetworkData {
	pub nodes: DataSet<NodeRecord>,
	pub edges: DataSet<EdgeRecord>,
}

impl NetworkData {
	/// Edges whose both endpoints are present in `nodes`.
	pub fn connected_edges(&self) -> impl Iterator<Item = &EdgeRecord> {
		self.edges
			.iter()
			.filter(|e| self.nodes.contains(&e.from) && self.nodes.contains(&e.to))
	}
}

/// Wraps the payload's sequences into keyed sets under `policy`.
pub fn shape_payload(payload: NetworkPayload, policy: PayloadPolicy) -> Result<NetworkData> {
	let mut nodes = DataSet::new();
	for (index, node) in payload.nodes.into_iter().enumerate() {
		let id = node.id.clone();
		if nodes.insert(node).is_some() {
			if policy == PayloadPolicy::Strict {
				return Err(VizError::MalformedPayload(PayloadIssue::DuplicateNode {
					index,
					id,
				}));
			}
			log::warn!("duplicate node id {} at position {}, keeping the later record", id, index);
		}
	}

	for (index, edge) in payload.edges.iter().enumerate() {
		let missing = [&edge.from, &edge.to]
			.into_iter()
			.find(|id| !nodes.contains(id));
		if let Some(id) = missing {
			if policy == PayloadPolicy::Strict {
				return Err(VizError::MalformedPayload(PayloadIssue::DanglingEdge {
					index,
					id: id.clone(),
				}));
			}
			log::warn!("edge {} references unknown node {}", index, id);
		}
	}

	Ok(NetworkData {
		nodes,
		edges: payload.edges.into_iter().collect(),
	})
}
