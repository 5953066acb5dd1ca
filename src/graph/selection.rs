use std::collections::HashSet;

use log::debug;

use super::derive::{is_uncertain, visibility};
use super::error::Result;
use super::seed::describe;
use super::store::GraphStore;
use super::types::Node;

/// Placeholder freshness text shown in the detail panel.
pub const LAST_UPDATED: &str = "2 days ago";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedNode {
	pub id: String,
	pub label: String,
}

/// View model for the node detail panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDetails {
	pub id: String,
	pub label: String,
	pub confidence_percent: u8,
	pub source_count_estimate: u32,
	pub connection_count: usize,
	pub description: String,
	pub last_updated: &'static str,
	pub uncertain: bool,
	pub related_nodes: Vec<RelatedNode>,
}

impl NodeDetails {
	fn build(store: &GraphStore, node: &Node) -> Self {
		let confidence = node.confidence();
		Self {
			id: node.id.clone(),
			label: node.label.clone(),
			confidence_percent: confidence,
			source_count_estimate: u32::from(confidence) / 10 + 5,
			connection_count: connection_count(store, &node.id),
			description: describe(&node.id).to_string(),
			last_updated: LAST_UPDATED,
			uncertain: is_uncertain(confidence),
			related_nodes: related_nodes(store, &node.id)
				.into_iter()
				.map(|n| RelatedNode {
					id: n.id.clone(),
					label: n.label.clone(),
				})
				.collect(),
		}
	}
}

/// Number of edges touching `id`, in either direction.
pub fn connection_count(store: &GraphStore, id: &str) -> usize {
	store.edges().iter().filter(|e| e.touches(id)).count()
}

/// Distinct direct neighbours of `id`, in store order.
pub fn related_nodes<'a>(store: &'a GraphStore, id: &str) -> Vec<&'a Node> {
	let related: HashSet<&str> = store
		.edges()
		.iter()
		.filter_map(|e| e.other_end(id))
		.collect();
	store
		.nodes()
		.iter()
		.filter(|n| related.contains(n.id.as_str()))
		.collect()
}

/// Selection state machine: `None` or `Selected(id)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionController {
	selected: Option<String>,
}

impl SelectionController {
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Selects `id` and returns its detail view. An unknown id fails with
	/// `NotFound` and leaves the current selection alone.
	pub fn select_node(&mut self, store: &GraphStore, id: &str) -> Result<NodeDetails> {
		let node = store.node(id)?;
		let details = NodeDetails::build(store, node);
		debug!(
			"selected {} ({} connections)",
			node.id, details.connection_count
		);
		self.selected = Some(node.id.clone());
		Ok(details)
	}

	pub fn close_selection(&mut self) {
		self.selected = None;
	}

	/// Detail view for the current selection, rebuilt from the latest store.
	pub fn details(&self, store: &GraphStore) -> Option<NodeDetails> {
		let id = self.selected.as_deref()?;
		store.node(id).ok().map(|node| NodeDetails::build(store, node))
	}

	/// Drops the selection when its node is gone or hidden by the active
	/// filter. Returns `true` if the selection was closed.
	pub fn reconcile(&mut self, store: &GraphStore) -> bool {
		let Some(id) = self.selected.as_deref() else {
			return false;
		};
		let keep = store
			.node(id)
			.map(|node| visibility(node, store.filter()))
			.unwrap_or(false);
		if !keep {
			debug!("closing selection of hidden node {id}");
			self.selected = None;
		}
		!keep
	}
}

/// Per-node dimming produced by a label search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchHints {
	dimmed: HashSet<String>,
}

impl SearchHints {
	pub fn is_dimmed(&self, id: &str) -> bool {
		self.dimmed.contains(id)
	}

	pub fn is_clear(&self) -> bool {
		self.dimmed.is_empty()
	}
}

/// Case-insensitive substring match on labels. Non-matching nodes are dimmed;
/// an empty query dims nothing. Whitespace is part of the pattern.
pub fn search_nodes(store: &GraphStore, query: &str) -> SearchHints {
	let query = query.to_lowercase();
	if query.is_empty() {
		return SearchHints::default();
	}
	let dimmed = store
		.nodes()
		.iter()
		.filter(|n| !n.label.to_lowercase().contains(&query))
		.map(|n| n.id.clone())
		.collect();
	SearchHints { dimmed }
}
