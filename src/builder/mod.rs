//! Builder API turning loosely-specified placeholders into an immutable,
//! internally consistent [`StateMachineDefinition`](crate::definition::StateMachineDefinition).

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::{
    ActionPlaceholder, StateMachineDefinitionBuilder, StatePlaceholder, TransitionPlaceholder,
};
