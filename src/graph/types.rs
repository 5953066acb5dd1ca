use std::fmt;
use std::str::FromStr;

use super::error::GraphError;

/// Importance bucket assigned when a node is created. Controls render size only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
	Critical,
	High,
	Medium,
	Low,
	/// Anything a dataset supplies that is not one of the known tiers.
	Unknown,
}

impl Tier {
	pub fn as_str(self) -> &'static str {
		match self {
			Tier::Critical => "critical",
			Tier::High => "high",
			Tier::Medium => "medium",
			Tier::Low => "low",
			Tier::Unknown => "unknown",
		}
	}
}

impl From<&str> for Tier {
	fn from(value: &str) -> Self {
		match value.trim().to_ascii_lowercase().as_str() {
			"critical" => Tier::Critical,
			"high" => Tier::High,
			"medium" => Tier::Medium,
			"low" => Tier::Low,
			_ => Tier::Unknown,
		}
	}
}

/// Confidence bucket used to hide nodes. Never mutates the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterLevel {
	#[default]
	All,
	High,
	Medium,
	Low,
}

impl FilterLevel {
	pub const ALL: [FilterLevel; 4] = [
		FilterLevel::All,
		FilterLevel::High,
		FilterLevel::Medium,
		FilterLevel::Low,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			FilterLevel::All => "all",
			FilterLevel::High => "high",
			FilterLevel::Medium => "medium",
			FilterLevel::Low => "low",
		}
	}

	/// Button caption for the filter bar.
	pub fn caption(self) -> &'static str {
		match self {
			FilterLevel::All => "All",
			FilterLevel::High => "High (80%+)",
			FilterLevel::Medium => "Medium (50-79%)",
			FilterLevel::Low => "Low (<50%)",
		}
	}
}

impl FromStr for FilterLevel {
	type Err = GraphError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"all" => Ok(FilterLevel::All),
			"high" => Ok(FilterLevel::High),
			"medium" => Ok(FilterLevel::Medium),
			"low" => Ok(FilterLevel::Low),
			other => Err(GraphError::InvalidFilter(other.to_string())),
		}
	}
}

impl fmt::Display for FilterLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// How the graph panel presents the store.
///
/// `Hierarchy` has no layout of its own yet and draws through the network
/// renderer; `Ranking` swaps the canvas for a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
	#[default]
	Network,
	Hierarchy,
	Ranking,
}

impl ViewMode {
	pub const ALL: [ViewMode; 3] = [ViewMode::Network, ViewMode::Hierarchy, ViewMode::Ranking];

	pub fn as_str(self) -> &'static str {
		match self {
			ViewMode::Network => "network",
			ViewMode::Hierarchy => "hierarchy",
			ViewMode::Ranking => "ranking",
		}
	}

	pub fn next(self) -> Self {
		match self {
			ViewMode::Network => ViewMode::Hierarchy,
			ViewMode::Hierarchy => ViewMode::Ranking,
			ViewMode::Ranking => ViewMode::Network,
		}
	}

	pub fn uses_graph_renderer(self) -> bool {
		!matches!(self, ViewMode::Ranking)
	}
}

impl FromStr for ViewMode {
	type Err = GraphError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"network" => Ok(ViewMode::Network),
			"hierarchy" => Ok(ViewMode::Hierarchy),
			"ranking" => Ok(ViewMode::Ranking),
			other => Err(GraphError::InvalidViewMode(other.to_string())),
		}
	}
}

/// A tracked variable in the graph. Position is in the fixed 800x600 space.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub label: String,
	confidence: u8,
	pub tier: Tier,
	pub x: f64,
	pub y: f64,
}

impl Node {
	pub fn new(
		id: impl Into<String>,
		label: impl Into<String>,
		confidence: i32,
		tier: Tier,
		x: f64,
		y: f64,
	) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			confidence: clamp_confidence(confidence),
			tier,
			x,
			y,
		}
	}

	pub fn confidence(&self) -> u8 {
		self.confidence
	}

	pub fn set_confidence(&mut self, value: i32) {
		self.confidence = clamp_confidence(value);
	}
}

pub(crate) fn clamp_confidence(value: i32) -> u8 {
	value.clamp(0, 100) as u8
}

/// Connection between two nodes. Stored oriented, treated as undirected.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub source: String,
	pub target: String,
	pub strength: f64,
}

impl Edge {
	pub fn new(source: impl Into<String>, target: impl Into<String>, strength: f64) -> Self {
		let strength = if strength.is_finite() {
			strength.clamp(0.0, 1.0)
		} else {
			0.0
		};
		Self {
			source: source.into(),
			target: target.into(),
			strength,
		}
	}

	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	/// The endpoint opposite `id`, if the edge touches it.
	pub fn other_end(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(&self.target)
		} else if self.target == id {
			Some(&self.source)
		} else {
			None
		}
	}
}

#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub confidence: i32,
	pub tier: Tier,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub strength: f64,
}

/// Seed dataset handed to `KnowledgeGraph::initialize_graph`.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
