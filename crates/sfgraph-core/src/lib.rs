//! sfgraph core — component/edge model, weight calculator, object registry
//! and the graph accumulator

pub mod graph;
pub mod model;
pub mod registry;
pub mod view;
pub mod weight;


pub use graph::{DependencyGraph, GraphBuilder};
pub use model::{component_id, split_id, Component, ComponentType, Dependency, EdgeType, UnknownComponentType};
pub use registry::{ObjectRegistry, STANDARD_OBJECTS};
pub use view::GraphView;
pub use weight::{calculate_weight, DEFAULT_WEIGHT, WEIGHT_LEVELS};
