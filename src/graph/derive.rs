//! Visual attributes and aggregate trust derived from a graph snapshot.
//!
//! Everything here is a pure function of its arguments.

use std::f64::consts::PI;

use super::types::{FilterLevel, Node, Tier};

pub const HIGH_CONFIDENCE: u8 = 80;
pub const MEDIUM_CONFIDENCE: u8 = 50;
const TRUST_HIGH: f64 = 80.0;
const TRUST_MEDIUM: f64 = 60.0;

pub const COLOR_GOOD: &str = "#00ff88";
pub const COLOR_WARNING: &str = "#ffaa00";
pub const COLOR_DANGER: &str = "#ff4444";

/// Radius of the trust meter ring, in SVG user units.
pub const METER_RADIUS: f64 = 90.0;

pub fn visibility(node: &Node, filter: FilterLevel) -> bool {
	let c = node.confidence();
	match filter {
		FilterLevel::All => true,
		FilterLevel::High => c >= HIGH_CONFIDENCE,
		FilterLevel::Medium => (MEDIUM_CONFIDENCE..HIGH_CONFIDENCE).contains(&c),
		FilterLevel::Low => c < MEDIUM_CONFIDENCE,
	}
}

pub fn radius(tier: Tier) -> f64 {
	match tier {
		Tier::Critical => 30.0,
		Tier::High => 25.0,
		Tier::Medium => 20.0,
		Tier::Low => 15.0,
		Tier::Unknown => 20.0,
	}
}

pub fn color(confidence: u8) -> &'static str {
	if confidence >= HIGH_CONFIDENCE {
		COLOR_GOOD
	} else if confidence >= MEDIUM_CONFIDENCE {
		COLOR_WARNING
	} else {
		COLOR_DANGER
	}
}

pub fn is_uncertain(confidence: u8) -> bool {
	confidence < MEDIUM_CONFIDENCE
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrustLevel {
	High,
	Medium,
	Low,
	NoData,
}

impl TrustLevel {
	pub fn label(self) -> &'static str {
		match self {
			TrustLevel::High => "High Confidence",
			TrustLevel::Medium => "Medium Confidence",
			TrustLevel::Low => "Low Confidence",
			TrustLevel::NoData => "No Data",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrustScore {
	/// Unrounded mean, `None` for an empty graph.
	pub mean: Option<f64>,
	/// Mean rounded for display; 0 when there is no data.
	pub percent: u8,
	pub level: TrustLevel,
}

impl TrustScore {
	/// Stroke dash offset for a ring of `METER_RADIUS`: a full circumference
	/// means an empty meter.
	pub fn meter_offset(&self) -> f64 {
		let circumference = 2.0 * PI * METER_RADIUS;
		let fraction = self.mean.unwrap_or(0.0) / 100.0;
		circumference - fraction * circumference
	}
}

/// Mean confidence of `nodes`. The qualitative level is judged on the
/// unrounded mean.
pub fn trust_score<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> TrustScore {
	let (sum, count) = nodes
		.into_iter()
		.fold((0u32, 0u32), |(sum, count), node| {
			(sum + u32::from(node.confidence()), count + 1)
		});
	if count == 0 {
		return TrustScore {
			mean: None,
			percent: 0,
			level: TrustLevel::NoData,
		};
	}
	let mean = f64::from(sum) / f64::from(count);
	let level = if mean >= TRUST_HIGH {
		TrustLevel::High
	} else if mean >= TRUST_MEDIUM {
		TrustLevel::Medium
	} else {
		TrustLevel::Low
	};
	TrustScore {
		mean: Some(mean),
		percent: mean.round() as u8,
		level,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::seed::reference_dataset;
	use crate::graph::store::GraphStore;

	fn store() -> GraphStore {
		GraphStore::from_data(&reference_dataset()).unwrap()
	}

	fn visible_ids(store: &GraphStore, filter: FilterLevel) -> Vec<&str> {
		store
			.nodes()
			.iter()
			.filter(|n| visibility(n, filter))
			.map(|n| n.id.as_str())
			.collect()
	}

	#[test]
	fn filters_partition_reference_nodes() {
		let store = store();
		assert_eq!(visible_ids(&store, FilterLevel::All).len(), 10);
		assert_eq!(visible_ids(&store, FilterLevel::Low), vec!["n7"]);
		assert_eq!(
			visible_ids(&store, FilterLevel::Medium),
			vec!["n6", "n8", "n10"]
		);
		assert_eq!(
			visible_ids(&store, FilterLevel::High),
			vec!["n1", "n2", "n3", "n4", "n5", "n9"]
		);
	}

	#[test]
	fn bucket_edges() {
		let at = |c| Node::new("x", "x", c, Tier::Low, 0.0, 0.0);
		assert!(visibility(&at(80), FilterLevel::High));
		assert!(!visibility(&at(80), FilterLevel::Medium));
		assert!(visibility(&at(50), FilterLevel::Medium));
		assert!(!visibility(&at(50), FilterLevel::Low));
		assert!(visibility(&at(49), FilterLevel::Low));

		assert_eq!(color(80), COLOR_GOOD);
		assert_eq!(color(79), COLOR_WARNING);
		assert_eq!(color(50), COLOR_WARNING);
		assert_eq!(color(49), COLOR_DANGER);
		assert!(is_uncertain(49));
		assert!(!is_uncertain(50));
	}

	#[test]
	fn radius_by_tier() {
		assert_eq!(radius(Tier::Critical), 30.0);
		assert_eq!(radius(Tier::High), 25.0);
		assert_eq!(radius(Tier::Medium), 20.0);
		assert_eq!(radius(Tier::Low), 15.0);
		assert_eq!(radius(Tier::from("bogus")), 20.0);
	}

	#[test]
	fn reference_trust_score_is_medium() {
		let store = store();
		let score = trust_score(store.nodes());
		assert!((score.mean.unwrap() - 79.2).abs() < 1e-9);
		assert_eq!(score.percent, 79);
		assert_eq!(score.level, TrustLevel::Medium);
		assert_eq!(score.level.label(), "Medium Confidence");
	}

	#[test]
	fn empty_graph_has_no_data() {
		let score = trust_score(std::iter::empty());
		assert_eq!(score.percent, 0);
		assert_eq!(score.level, TrustLevel::NoData);
		assert!((score.meter_offset() - 2.0 * PI * METER_RADIUS).abs() < 1e-9);
	}

	#[test]
	fn level_uses_unrounded_mean() {
		let nodes = [
			Node::new("a", "a", 79, Tier::Low, 0.0, 0.0),
			Node::new("b", "b", 80, Tier::Low, 0.0, 0.0),
		];
		let score = trust_score(&nodes);
		assert_eq!(score.percent, 80);
		assert_eq!(score.level, TrustLevel::Medium);
	}
}
