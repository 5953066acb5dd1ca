pub mod knowledge_graph;
pub mod notifications;
