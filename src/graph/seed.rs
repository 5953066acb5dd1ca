//! Reference construction-project dataset the viewer starts with.

use super::types::{GraphData, GraphLink, GraphNode, Tier};

const NODES: &[(&str, &str, i32, Tier, f64, f64)] = &[
	("n1", "Data Center Capacity", 98, Tier::Critical, 400.0, 300.0),
	("n2", "Power Infrastructure", 95, Tier::High, 200.0, 200.0),
	("n3", "Cooling Systems", 92, Tier::High, 600.0, 200.0),
	("n4", "Regulatory Compliance", 88, Tier::High, 300.0, 400.0),
	("n5", "Project Timeline", 82, Tier::Medium, 500.0, 400.0),
	("n6", "Budget Allocation", 75, Tier::Medium, 150.0, 350.0),
	("n7", "Subcontractor Performance", 45, Tier::Low, 650.0, 350.0),
	("n8", "Environmental Impact", 68, Tier::Medium, 400.0, 150.0),
	("n9", "Safety Protocols", 94, Tier::High, 250.0, 500.0),
	("n10", "Supply Chain Status", 55, Tier::Low, 550.0, 500.0),
];

const LINKS: &[(&str, &str, f64)] = &[
	("n1", "n2", 0.9),
	("n1", "n3", 0.9),
	("n1", "n4", 0.7),
	("n1", "n5", 0.8),
	("n2", "n8", 0.6),
	("n3", "n8", 0.6),
	("n4", "n9", 0.8),
	("n5", "n6", 0.9),
	("n5", "n7", 0.5),
	("n6", "n10", 0.6),
];

const DESCRIPTIONS: &[(&str, &str)] = &[
	(
		"n1",
		"Core infrastructure metric tracking available capacity across all data centers. Critical for expansion planning.",
	),
	(
		"n2",
		"Power distribution and backup systems ensuring 99.99% uptime requirements.",
	),
	(
		"n3",
		"HVAC and cooling infrastructure maintaining optimal operating temperatures.",
	),
	(
		"n4",
		"Compliance status with local, state, and federal regulations.",
	),
	(
		"n5",
		"Master project schedule tracking all major milestones and dependencies.",
	),
	("n6", "Financial allocation across project phases and cost centers."),
	(
		"n7",
		"Performance metrics for contracted vendors and service providers.",
	),
	(
		"n8",
		"Environmental impact assessments and sustainability metrics.",
	),
	("n9", "Safety protocol compliance and incident tracking."),
	(
		"n10",
		"Supply chain visibility and material availability tracking.",
	),
];

pub const DEFAULT_DESCRIPTION: &str = "No detailed description available.";

pub fn reference_dataset() -> GraphData {
	let nodes = NODES
		.iter()
		.map(|&(id, label, confidence, tier, x, y)| GraphNode {
			id: id.into(),
			label: label.into(),
			confidence,
			tier,
			x,
			y,
		})
		.collect();
	let links = LINKS
		.iter()
		.map(|&(source, target, strength)| GraphLink {
			source: source.into(),
			target: target.into(),
			strength,
		})
		.collect();
	GraphData { nodes, links }
}

/// Static description for a node id, with a fallback for ids not in the table.
pub fn describe(id: &str) -> &'static str {
	DESCRIPTIONS
		.iter()
		.find(|(known, _)| *known == id)
		.map(|(_, text)| *text)
		.unwrap_or(DEFAULT_DESCRIPTION)
}
