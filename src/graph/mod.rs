//! UI-agnostic knowledge-graph core: store, derivations, scene building,
//! selection and the command facade the page drives.

mod controller;
pub mod derive;
mod error;
pub mod scene;
pub mod seed;
pub mod selection;
mod store;
mod types;

pub use controller::{GraphConfig, KnowledgeGraph, Notifier, NotifyLevel, RankingRow};
pub use error::{GraphError, Result};
pub use types::{FilterLevel, GraphData, ViewMode};
