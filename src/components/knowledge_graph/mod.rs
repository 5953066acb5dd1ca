mod component;
mod panels;
mod render;
mod surface;

pub use component::KnowledgeGraphView;
