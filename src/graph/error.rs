use thiserror::Error;

/// Failures raised by the knowledge-graph core. All are local and reported
/// straight back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	#[error("node not found: {0}")]
	NotFound(String),

	#[error("invalid confidence filter: {0:?}")]
	InvalidFilter(String),

	#[error("invalid view mode: {0:?}")]
	InvalidViewMode(String),

	#[error("duplicate node id: {0}")]
	DuplicateNode(String),

	#[error("edge {from} -> {to} references a missing node")]
	DanglingEdge { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
