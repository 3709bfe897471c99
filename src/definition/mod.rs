//! The immutable, validated definition model and its derived graph view.

pub mod action;
pub mod graph;
pub mod machine;
pub mod registry;
pub mod state;
pub mod transition;

pub use action::ActionDefinition;
pub use graph::StateMachineGraph;
pub use machine::StateMachineDefinition;
pub use registry::DefinitionRegistry;
pub use state::{StateDefinition, EMPTY_STATE};
pub use transition::TransitionDefinition;
