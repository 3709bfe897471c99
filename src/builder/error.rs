//! Build errors for state machine declarations.
//!
//! All of these are non-recoverable, fix-the-declaration errors: they occur
//! during placeholder registration or `build()` and never after a definition
//! is frozen.

use thiserror::Error;

/// Errors raised while declaring or building a state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("State machine '{machine_type}' already declares a state named '{name}'")]
    DuplicateState { machine_type: String, name: String },

    #[error("State machine '{machine_type}' already declares an action named '{name}'")]
    DuplicateAction { machine_type: String, name: String },

    #[error(
        "Action '{action}' already has a transition from state '{source_state}' \
         in state machine '{machine_type}'"
    )]
    DuplicateTransition {
        machine_type: String,
        action: String,
        source_state: String,
    },

    #[error(
        "Transition '{transition}' references undefined state '{state}' \
         in state machine '{machine_type}'"
    )]
    UndefinedState {
        machine_type: String,
        transition: String,
        state: String,
    },

    #[error("Transition '{transition}' declares no target states in state machine '{machine_type}'")]
    MissingTargetStates {
        machine_type: String,
        transition: String,
    },
}
