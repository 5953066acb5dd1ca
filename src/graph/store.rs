use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::error::{GraphError, Result};
use super::types::{Edge, FilterLevel, GraphData, Node};

/// Single source of truth for nodes, edges and the active confidence filter.
///
/// Readers get shared slices; only the interaction layer holds `&mut`.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	id_to_idx: HashMap<String, usize>,
	edges: Vec<Edge>,
	filter: FilterLevel,
	dirty: bool,
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a store from a seed dataset, rejecting duplicate ids and edges
	/// whose endpoints are missing.
	pub fn from_data(data: &GraphData) -> Result<Self> {
		let mut store = Self::new();
		for node in &data.nodes {
			store.insert_node(Node::new(
				node.id.clone(),
				node.label.clone(),
				node.confidence,
				node.tier,
				node.x,
				node.y,
			))?;
		}
		for link in &data.links {
			store.insert_edge(Edge::new(
				link.source.clone(),
				link.target.clone(),
				link.strength,
			))?;
		}
		debug!(
			"graph store seeded with {} nodes, {} edges",
			store.nodes.len(),
			store.edges.len()
		);
		Ok(store)
	}

	pub fn insert_node(&mut self, node: Node) -> Result<()> {
		if self.id_to_idx.contains_key(&node.id) {
			return Err(GraphError::DuplicateNode(node.id));
		}
		self.id_to_idx.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(node);
		self.dirty = true;
		Ok(())
	}

	pub fn insert_edge(&mut self, edge: Edge) -> Result<()> {
		if !self.contains(&edge.source) || !self.contains(&edge.target) {
			return Err(GraphError::DanglingEdge {
				from: edge.source,
				to: edge.target,
			});
		}
		self.edges.push(edge);
		self.dirty = true;
		Ok(())
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Result<&Node> {
		self.id_to_idx
			.get(id)
			.map(|&idx| &self.nodes[idx])
			.ok_or_else(|| GraphError::NotFound(id.to_string()))
	}

	pub fn contains(&self, id: &str) -> bool {
		self.id_to_idx.contains_key(id)
	}

	pub fn filter(&self) -> FilterLevel {
		self.filter
	}

	pub fn set_filter(&mut self, level: FilterLevel) {
		self.filter = level;
		self.dirty = true;
	}

	/// Shifts every confidence by a uniform integer delta in
	/// `[-delta_range, +delta_range]`, clamped to `[0, 100]`.
	pub fn perturb_confidence<R: Rng + ?Sized>(&mut self, delta_range: u8, rng: &mut R) {
		let range = i32::from(delta_range);
		for node in &mut self.nodes {
			let delta = rng.gen_range(-range..=range);
			node.set_confidence(i32::from(node.confidence()) + delta);
		}
		self.dirty = true;
	}

	/// Returns whether the graph or filter changed since the last call and
	/// clears the flag. Derived values keyed on the store use it to skip
	/// recomputation.
	pub fn take_dirty(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}
}
