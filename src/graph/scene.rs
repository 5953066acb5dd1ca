//! Pure scene construction. A `Scene` is everything a presentation surface
//! needs to draw the graph; building one never touches the display.

use super::derive::{color, is_uncertain, radius, visibility};
use super::selection::SearchHints;
use super::store::GraphStore;

pub const EDGE_STROKE: &str = "#444";
pub const NODE_STROKE: &str = "#333";
pub const LABEL_FILL: &str = "#e8e8e8";
pub const CONFIDENCE_FILL: &str = "#fff";
pub const WARNING_FILL: &str = "#ffaa00";
pub const WARNING_GLYPH: &str = "\u{26a0}\u{fe0f}";

const EDGE_MAX_WIDTH: f64 = 3.0;
const LABEL_OFFSET: f64 = 35.0;
const CONFIDENCE_OFFSET: f64 = 5.0;
const WARNING_OFFSET: (f64, f64) = (25.0, -20.0);
const NODE_STROKE_WIDTH: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneText {
	pub x: f64,
	pub y: f64,
	pub text: String,
	pub font_size: f64,
	pub bold: bool,
	pub fill: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub stroke: &'static str,
	pub width: f64,
	pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub fill: &'static str,
	pub stroke: &'static str,
	pub stroke_width: f64,
	/// 1.0 normally, lowered when a search dims the node.
	pub opacity: f64,
	pub selected: bool,
	pub label: SceneText,
	pub confidence: SceneText,
	pub warning: Option<SceneText>,
}

/// Knobs the renderer takes from the host configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneOptions {
	pub width: f64,
	pub height: f64,
	pub dim_opacity: f64,
}

impl Default for SceneOptions {
	fn default() -> Self {
		Self {
			width: 800.0,
			height: 600.0,
			dim_opacity: 0.3,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub width: f64,
	pub height: f64,
	pub lines: Vec<SceneLine>,
	pub nodes: Vec<SceneNode>,
}

impl Scene {
	/// Node under a point in graph coordinates. Later nodes are drawn on top,
	/// so they win ties.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&str> {
		self.nodes
			.iter()
			.rev()
			.find(|n| {
				let (dx, dy) = (n.x - x, n.y - y);
				(dx * dx + dy * dy).sqrt() <= n.radius
			})
			.map(|n| n.id.as_str())
	}
}

/// Full rebuild of the scene from the current store state.
pub fn build_scene(
	store: &GraphStore,
	hints: &SearchHints,
	selected: Option<&str>,
	options: &SceneOptions,
) -> Scene {
	let filter = store.filter();

	let lines = store
		.edges()
		.iter()
		.filter_map(|edge| {
			let source = store.node(&edge.source).ok()?;
			let target = store.node(&edge.target).ok()?;
			if !(visibility(source, filter) && visibility(target, filter)) {
				return None;
			}
			Some(SceneLine {
				x1: source.x,
				y1: source.y,
				x2: target.x,
				y2: target.y,
				stroke: EDGE_STROKE,
				width: edge.strength * EDGE_MAX_WIDTH,
				opacity: edge.strength,
			})
		})
		.collect();

	let nodes = store
		.nodes()
		.iter()
		.filter(|node| visibility(node, filter))
		.map(|node| {
			let confidence = node.confidence();
			let (x, y) = (node.x, node.y);
			SceneNode {
				id: node.id.clone(),
				x,
				y,
				radius: radius(node.tier),
				fill: color(confidence),
				stroke: NODE_STROKE,
				stroke_width: NODE_STROKE_WIDTH,
				opacity: if hints.is_dimmed(&node.id) {
					options.dim_opacity
				} else {
					1.0
				},
				selected: selected == Some(node.id.as_str()),
				label: SceneText {
					x,
					y: y + LABEL_OFFSET,
					text: node.label.clone(),
					font_size: 12.0,
					bold: false,
					fill: LABEL_FILL,
				},
				confidence: SceneText {
					x,
					y: y + CONFIDENCE_OFFSET,
					text: format!("{confidence}%"),
					font_size: 14.0,
					bold: true,
					fill: CONFIDENCE_FILL,
				},
				warning: is_uncertain(confidence).then(|| SceneText {
					x: x + WARNING_OFFSET.0,
					y: y + WARNING_OFFSET.1,
					text: WARNING_GLYPH.to_string(),
					font_size: 20.0,
					bold: false,
					fill: WARNING_FILL,
				}),
			}
		})
		.collect();

	Scene {
		width: options.width,
		height: options.height,
		lines,
		nodes,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::derive::{COLOR_DANGER, COLOR_GOOD};
	use crate::graph::seed::reference_dataset;
	use crate::graph::selection::search_nodes;
	use crate::graph::types::FilterLevel;

	fn store() -> GraphStore {
		GraphStore::from_data(&reference_dataset()).unwrap()
	}

	fn plain_scene(store: &GraphStore) -> Scene {
		build_scene(store, &SearchHints::default(), None, &SceneOptions::default())
	}

	#[test]
	fn full_scene_has_every_node_and_edge() {
		let scene = plain_scene(&store());
		assert_eq!(scene.nodes.len(), 10);
		assert_eq!(scene.lines.len(), 10);
		assert_eq!((scene.width, scene.height), (800.0, 600.0));
	}

	#[test]
	fn node_shapes_follow_derivations() {
		let scene = plain_scene(&store());
		let hub = &scene.nodes[0];
		assert_eq!(hub.id, "n1");
		assert_eq!(hub.radius, 30.0);
		assert_eq!(hub.fill, COLOR_GOOD);
		assert_eq!(hub.confidence.text, "98%");
		assert!(hub.confidence.bold);
		assert_eq!(hub.label.y, 335.0);
		assert!(hub.warning.is_none());

		let weak = scene.nodes.iter().find(|n| n.id == "n7").unwrap();
		assert_eq!(weak.fill, COLOR_DANGER);
		let warning = weak.warning.as_ref().unwrap();
		assert_eq!((warning.x, warning.y), (675.0, 330.0));
	}

	#[test]
	fn edge_weight_scales_with_strength() {
		let scene = plain_scene(&store());
		let line = scene
			.lines
			.iter()
			.find(|l| (l.x1, l.y1, l.x2, l.y2) == (500.0, 400.0, 650.0, 350.0))
			.unwrap();
		assert!((line.width - 1.5).abs() < 1e-9);
		assert!((line.opacity - 0.5).abs() < 1e-9);
	}

	#[test]
	fn edges_need_both_endpoints_visible() {
		let mut store = store();
		store.set_filter(FilterLevel::High);
		let scene = plain_scene(&store);
		assert_eq!(scene.nodes.len(), 6);
		// n1-n2, n1-n3, n1-n4, n1-n5, n4-n9
		assert_eq!(scene.lines.len(), 5);

		store.set_filter(FilterLevel::Low);
		let scene = plain_scene(&store);
		assert_eq!(scene.nodes.len(), 1);
		assert!(scene.lines.is_empty());
	}

	#[test]
	fn rebuild_is_idempotent() {
		let store = store();
		let hints = search_nodes(&store, "power");
		let options = SceneOptions::default();
		let first = build_scene(&store, &hints, Some("n2"), &options);
		let second = build_scene(&store, &hints, Some("n2"), &options);
		assert_eq!(first, second);
	}

	#[test]
	fn search_dims_and_selection_marks() {
		let store = store();
		let hints = search_nodes(&store, "power");
		let scene = build_scene(&store, &hints, Some("n2"), &SceneOptions::default());
		for node in &scene.nodes {
			let expected = if node.id == "n2" { 1.0 } else { 0.3 };
			assert_eq!(node.opacity, expected, "{}", node.id);
			assert_eq!(node.selected, node.id == "n2");
		}
	}

	#[test]
	fn hit_test_maps_points_to_nodes() {
		let scene = plain_scene(&store());
		assert_eq!(scene.node_at(405.0, 310.0), Some("n1"));
		assert_eq!(scene.node_at(650.0, 364.0), Some("n7"));
		assert_eq!(scene.node_at(20.0, 20.0), None);
	}

	#[test]
	fn empty_store_renders_empty_scene() {
		let scene = plain_scene(&GraphStore::new());
		assert!(scene.nodes.is_empty());
		assert!(scene.lines.is_empty());
	}
}
