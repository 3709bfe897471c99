//! Stateline: declarative state machines for persisted entities
//!
//! Stateline lets an application declare a finite-state machine (states,
//! input symbols called "actions", and the transitions between them) and
//! then safely invoke those transitions against persisted entities,
//! verifying at runtime that the entity actually lands in one of the states
//! the declaration permits.
//!
//! # Core Concepts
//!
//! - **Builder**: placeholders from any front-end are validated into an
//!   immutable [`StateMachineDefinition`](definition::StateMachineDefinition)
//! - **Definition**: the frozen machine, shareable across threads, with a
//!   lazily derived graph view for analysis and rendering
//! - **Invocation**: guard-check, business-logic dispatch and
//!   post-condition assertion for a single transition, with well-defined
//!   failure semantics
//! - **Graph utilities**: a generic attributed graph, DFS/BFS traversal and
//!   union-find over identifiers, used to validate and analyze topology
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stateline::builder::StateMachineDefinitionBuilder;
//! use stateline::definition::EMPTY_STATE;
//! use stateline::invoke::{AllowAll, HandlerRegistry, TransitionInvoker};
//!
//! let mut builder = StateMachineDefinitionBuilder::new("Document");
//! builder.add_state("Draft").unwrap();
//! builder.add_state("Published").unwrap();
//! builder.add_transition("create", EMPTY_STATE, ["Draft"]).unwrap();
//! builder.add_transition("publish", "Draft", ["Published"]).unwrap();
//!
//! let definition = Arc::new(builder.build().unwrap());
//!
//! // One edge per (transition, target state) pair.
//! let publish = definition.transition_for("publish", "Draft").unwrap().clone();
//! let graph = definition.graph();
//! assert_eq!(graph.edges_by_transition(&publish).unwrap().len(), 1);
//!
//! let mut handlers = HandlerRegistry::new();
//! handlers.register("create", |event| {
//!     event.set_new_id(1u64);
//!     Ok(())
//! });
//! handlers.register("publish", |_event| Ok(()));
//!
//! let invoker = TransitionInvoker::new(definition, AllowAll, handlers);
//! assert!(invoker.handlers_complete().is_ok());
//! ```

pub mod builder;
pub mod definition;
pub mod graph;
pub mod invoke;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineDefinitionBuilder};
pub use definition::{DefinitionRegistry, StateMachineDefinition, EMPTY_STATE};
pub use invoke::{EntityId, EntityRef, HandlerRegistry, InvokeError, TransitionInvoker};
