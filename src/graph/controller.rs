use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::derive::{TrustScore, color, trust_score, visibility};
use super::error::Result;
use super::scene::{Scene, SceneOptions, build_scene};
use super::selection::{NodeDetails, SearchHints, SelectionController, search_nodes};
use super::store::GraphStore;
use super::types::{FilterLevel, GraphData, Tier, ViewMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyLevel {
	Info,
	Success,
	Error,
}

impl NotifyLevel {
	pub fn as_str(self) -> &'static str {
		match self {
			NotifyLevel::Info => "info",
			NotifyLevel::Success => "success",
			NotifyLevel::Error => "error",
		}
	}
}

/// Sink for transient status messages, owned by the hosting page.
pub trait Notifier {
	fn notify(&self, message: &str, level: NotifyLevel);
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	pub scene: SceneOptions,
	/// Largest confidence change a single refresh may apply to a node.
	pub refresh_delta: u8,
	/// Pause between announcing a refresh and applying it. Pacing only.
	pub refresh_delay_ms: u32,
	pub seed: u64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			scene: SceneOptions::default(),
			refresh_delta: 5,
			refresh_delay_ms: 1000,
			seed: 0x5eed,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingRow {
	pub rank: usize,
	pub id: String,
	pub label: String,
	pub confidence: u8,
	pub tier: Tier,
	pub color: &'static str,
}

/// Command surface of the knowledge-graph view. Every command runs to
/// completion and leaves `scene()` reflecting the latest state.
pub struct KnowledgeGraph {
	config: GraphConfig,
	store: GraphStore,
	selection: SelectionController,
	query: String,
	hints: SearchHints,
	view_mode: ViewMode,
	scene: Scene,
	/// Bumped whenever a rebuild produces a different scene.
	revision: u64,
	trust: TrustScore,
	refreshing: bool,
	rng: SmallRng,
	notifier: Box<dyn Notifier>,
}

impl KnowledgeGraph {
	pub fn new(config: GraphConfig, notifier: Box<dyn Notifier>) -> Self {
		let rng = SmallRng::seed_from_u64(config.seed);
		let store = GraphStore::new();
		Self {
			scene: Scene {
				width: config.scene.width,
				height: config.scene.height,
				..Scene::default()
			},
			revision: 0,
			trust: trust_score(store.nodes()),
			config,
			store,
			selection: SelectionController::default(),
			query: String::new(),
			hints: SearchHints::default(),
			view_mode: ViewMode::default(),
			refreshing: false,
			rng,
			notifier,
		}
	}

	/// Replaces the graph with `data` and draws it. On error the previous
	/// graph stays in place.
	pub fn initialize_graph(&mut self, data: &GraphData) -> Result<()> {
		let mut store = GraphStore::from_data(data)?;
		store.set_filter(self.store.filter());
		self.store = store;
		self.selection.close_selection();
		info!(
			"knowledge graph initialized: {} nodes, {} edges",
			self.store.nodes().len(),
			self.store.edges().len()
		);
		self.render();
		Ok(())
	}

	/// Full redraw. Closes the selection if its node is no longer visible.
	pub fn render(&mut self) -> &Scene {
		self.selection.reconcile(&self.store);
		self.rebuild();
		&self.scene
	}

	fn rebuild(&mut self) {
		if self.store.take_dirty() {
			self.trust = trust_score(self.store.nodes());
		}
		self.hints = search_nodes(&self.store, &self.query);
		let scene = build_scene(
			&self.store,
			&self.hints,
			self.selection.selected(),
			&self.config.scene,
		);
		if scene != self.scene {
			self.scene = scene;
			self.revision += 1;
		}
		debug!(
			"scene rebuilt (rev {}): {} nodes, {} lines",
			self.revision,
			self.scene.nodes.len(),
			self.scene.lines.len()
		);
	}

	/// Changes each time the scene differs from the previous rebuild, so
	/// views can skip repainting an unchanged scene.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	pub fn config(&self) -> &GraphConfig {
		&self.config
	}

	pub fn filter(&self) -> FilterLevel {
		self.store.filter()
	}

	/// Applies a filter named by `level`. Unknown names are rejected and the
	/// current filter is kept.
	pub fn set_filter(&mut self, level: &str) -> Result<FilterLevel> {
		let level = level.parse::<FilterLevel>().inspect_err(|err| {
			warn!("{err}");
		})?;
		self.apply_filter(level);
		Ok(level)
	}

	pub fn apply_filter(&mut self, level: FilterLevel) {
		debug!("filter -> {level}");
		self.store.set_filter(level);
		self.render();
	}

	/// Dims nodes whose label does not contain `query`. An empty query
	/// restores full opacity.
	pub fn search(&mut self, query: &str) -> &SearchHints {
		self.query = query.to_string();
		self.rebuild();
		if self.hints.is_clear() {
			debug!("search cleared");
		}
		&self.hints
	}

	pub fn select_node(&mut self, id: &str) -> Result<NodeDetails> {
		let details = self.selection.select_node(&self.store, id).inspect_err(|err| {
			warn!("select rejected: {err}");
		})?;
		self.rebuild();
		Ok(details)
	}

	/// Detail view of the current selection against the latest confidences.
	pub fn details(&self) -> Option<NodeDetails> {
		self.selection.details(&self.store)
	}

	pub fn close_selection(&mut self) {
		self.selection.close_selection();
		self.rebuild();
	}

	/// Announces a refresh. The host applies it with `refresh` once its
	/// pacing delay has elapsed.
	pub fn begin_refresh(&mut self) {
		self.refreshing = true;
		self.notifier
			.notify("Refreshing knowledge graph...", NotifyLevel::Info);
	}

	pub fn is_refreshing(&self) -> bool {
		self.refreshing
	}

	/// Perturbs every confidence, redraws and recomputes the trust score.
	pub fn refresh(&mut self) -> TrustScore {
		self.store
			.perturb_confidence(self.config.refresh_delta, &mut self.rng);
		self.render();
		self.refreshing = false;
		info!(
			"knowledge graph refreshed, trust {}% ({})",
			self.trust.percent,
			self.trust.level.label()
		);
		self.notifier
			.notify("Knowledge graph updated", NotifyLevel::Success);
		self.trust
	}

	pub fn trust_score(&self) -> TrustScore {
		self.trust
	}

	pub fn view_mode(&self) -> ViewMode {
		self.view_mode
	}

	pub fn set_view_mode(&mut self, mode: &str) -> Result<ViewMode> {
		let mode = mode.parse::<ViewMode>().inspect_err(|err| {
			warn!("{err}");
		})?;
		self.apply_view_mode(mode);
		Ok(mode)
	}

	pub fn apply_view_mode(&mut self, mode: ViewMode) {
		self.view_mode = mode;
		debug!("view mode -> {}", mode.as_str());
		if mode.uses_graph_renderer() {
			self.render();
		}
	}

	/// Cycles network, hierarchy, ranking and back to network.
	pub fn toggle_view_mode(&mut self) -> ViewMode {
		let next = self.view_mode.next();
		self.apply_view_mode(next);
		next
	}

	/// Visible nodes ordered by confidence, highest first.
	pub fn ranking(&self) -> Vec<RankingRow> {
		let filter = self.store.filter();
		let mut nodes: Vec<_> = self
			.store
			.nodes()
			.iter()
			.filter(|n| visibility(n, filter))
			.collect();
		nodes.sort_by(|a, b| {
			b.confidence()
				.cmp(&a.confidence())
				.then_with(|| a.label.cmp(&b.label))
		});
		nodes
			.into_iter()
			.enumerate()
			.map(|(i, n)| RankingRow {
				rank: i + 1,
				id: n.id.clone(),
				label: n.label.clone(),
				confidence: n.confidence(),
				tier: n.tier,
				color: color(n.confidence()),
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::graph::derive::TrustLevel;
	use crate::graph::error::GraphError;
	use crate::graph::seed::reference_dataset;
	use crate::graph::types::{GraphLink, GraphNode, Node};

	#[derive(Clone, Default)]
	struct Recorder(Rc<RefCell<Vec<(String, NotifyLevel)>>>);

	impl Notifier for Recorder {
		fn notify(&self, message: &str, level: NotifyLevel) {
			self.0.borrow_mut().push((message.to_string(), level));
		}
	}

	fn graph() -> (KnowledgeGraph, Recorder) {
		let recorder = Recorder::default();
		let mut kg = KnowledgeGraph::new(GraphConfig::default(), Box::new(recorder.clone()));
		kg.initialize_graph(&reference_dataset()).unwrap();
		(kg, recorder)
	}

	#[test]
	fn initialize_renders_and_scores() {
		let (mut kg, _) = graph();
		assert_eq!(kg.scene().nodes.len(), 10);
		assert_eq!(kg.trust_score().percent, 79);
		assert_eq!(kg.trust_score().level, TrustLevel::Medium);
		assert!(!kg.store.take_dirty());
	}

	#[test]
	fn revision_tracks_scene_changes() {
		let (mut kg, _) = graph();
		let start = kg.revision();
		kg.render();
		kg.search("");
		assert_eq!(kg.revision(), start);

		kg.set_filter("high").unwrap();
		let filtered = kg.revision();
		assert!(filtered > start);

		kg.select_node("n2").unwrap();
		assert!(kg.revision() > filtered);
	}

	#[test]
	fn trust_follows_store_changes_only() {
		let (mut kg, _) = graph();
		kg.search("power");
		kg.select_node("n2").unwrap();
		assert_eq!(kg.trust_score().percent, 79);

		kg.store
			.insert_node(Node::new("n11", "Crane Availability", 100, Tier::High, 700.0, 550.0))
			.unwrap();
		kg.render();
		// (792 + 100) / 11
		assert_eq!(kg.trust_score().percent, 81);
	}

	#[test]
	fn bad_dataset_keeps_previous_graph() {
		let (mut kg, _) = graph();
		let data = GraphData {
			nodes: vec![GraphNode {
				id: "a".into(),
				label: "A".into(),
				confidence: 10,
				tier: Tier::Low,
				x: 0.0,
				y: 0.0,
			}],
			links: vec![GraphLink {
				source: "a".into(),
				target: "b".into(),
				strength: 0.5,
			}],
		};
		assert!(matches!(
			kg.initialize_graph(&data),
			Err(GraphError::DanglingEdge { .. })
		));
		assert_eq!(kg.store.nodes().len(), 10);
	}

	#[test]
	fn render_twice_is_identical() {
		let (mut kg, _) = graph();
		let first = kg.render().clone();
		let second = kg.render().clone();
		assert_eq!(first, second);
	}

	#[test]
	fn invalid_filter_keeps_prior() {
		let (mut kg, _) = graph();
		kg.set_filter("high").unwrap();
		assert_eq!(
			kg.set_filter("everything"),
			Err(GraphError::InvalidFilter("everything".into()))
		);
		assert_eq!(kg.filter(), FilterLevel::High);
		assert_eq!(kg.scene().nodes.len(), 6);
	}

	#[test]
	fn filter_hiding_selection_closes_it() {
		let (mut kg, _) = graph();
		kg.select_node("n7").unwrap();
		kg.set_filter("low").unwrap();
		assert_eq!(kg.selection.selected(), Some("n7"));

		kg.set_filter("high").unwrap();
		assert_eq!(kg.selection.selected(), None);
		assert_eq!(kg.details(), None);
	}

	#[test]
	fn unknown_select_is_reported() {
		let (mut kg, _) = graph();
		kg.select_node("n1").unwrap();
		assert_eq!(
			kg.select_node("missing"),
			Err(GraphError::NotFound("missing".into()))
		);
		assert_eq!(kg.selection.selected(), Some("n1"));
		assert!(kg.scene().nodes.iter().any(|n| n.id == "n1" && n.selected));
	}

	#[test]
	fn close_clears_selection_ring() {
		let (mut kg, _) = graph();
		kg.select_node("n3").unwrap();
		kg.close_selection();
		assert_eq!(kg.selection.selected(), None);
		assert!(kg.scene().nodes.iter().all(|n| !n.selected));
	}

	#[test]
	fn search_survives_rerender_until_cleared() {
		let (mut kg, _) = graph();
		kg.search("safety");
		kg.render();
		let dimmed = kg.scene().nodes.iter().filter(|n| n.opacity < 1.0).count();
		assert_eq!(dimmed, 9);

		assert!(kg.search("").is_clear());
		assert!(kg.scene().nodes.iter().all(|n| n.opacity == 1.0));
	}

	#[test]
	fn refresh_notifies_and_stays_bounded() {
		let (mut kg, recorder) = graph();
		let before: Vec<u8> = kg.store.nodes().iter().map(|n| n.confidence()).collect();
		kg.begin_refresh();
		assert!(kg.is_refreshing());
		kg.refresh();
		assert!(!kg.is_refreshing());

		for (node, prev) in kg.store.nodes().iter().zip(before) {
			assert!((i32::from(node.confidence()) - i32::from(prev)).abs() <= 5);
			assert!(node.confidence() <= 100);
		}
		assert_eq!(
			recorder.0.borrow().as_slice(),
			&[
				("Refreshing knowledge graph...".to_string(), NotifyLevel::Info),
				("Knowledge graph updated".to_string(), NotifyLevel::Success),
			]
		);
	}

	#[test]
	fn refresh_updates_open_details() {
		let (mut kg, _) = graph();
		kg.select_node("n1").unwrap();
		let mut saw_change = false;
		for _ in 0..20 {
			kg.refresh();
			let details = kg.details().unwrap();
			let node = kg.store.node("n1").unwrap();
			assert_eq!(details.confidence_percent, node.confidence());
			saw_change |= details.confidence_percent != 98;
		}
		assert!(saw_change);
	}

	#[test]
	fn view_modes_cycle_and_validate() {
		let (mut kg, _) = graph();
		assert_eq!(kg.toggle_view_mode(), ViewMode::Hierarchy);
		assert_eq!(kg.toggle_view_mode(), ViewMode::Ranking);
		assert_eq!(kg.toggle_view_mode(), ViewMode::Network);
		assert_eq!(kg.set_view_mode("ranking"), Ok(ViewMode::Ranking));
		assert!(matches!(
			kg.set_view_mode("timeline"),
			Err(GraphError::InvalidViewMode(_))
		));
		assert_eq!(kg.view_mode(), ViewMode::Ranking);
	}

	#[test]
	fn ranking_orders_visible_nodes() {
		let (mut kg, _) = graph();
		let rows = kg.ranking();
		assert_eq!(rows.len(), 10);
		assert_eq!(rows[0].id, "n1");
		assert_eq!(rows[1].id, "n2");
		assert_eq!(rows[9].id, "n7");
		assert_eq!(rows[9].rank, 10);

		kg.set_filter("medium").unwrap();
		let ids: Vec<_> = kg.ranking().into_iter().map(|r| r.id).collect();
		assert_eq!(ids, vec!["n6", "n8", "n10"]);
	}

	#[test]
	fn empty_graph_degrades() {
		let mut kg = KnowledgeGraph::new(GraphConfig::default(), Box::new(Recorder::default()));
		assert!(kg.render().nodes.is_empty());
		assert_eq!(kg.trust_score().level, TrustLevel::NoData);
		kg.refresh();
		assert!(kg.ranking().is_empty());
	}
}
