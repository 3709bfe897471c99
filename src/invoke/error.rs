//! Invocation-time errors.
//!
//! Nothing here is swallowed: every failure propagates to the invoker with
//! enough context (machine type, state names, transition name) to diagnose
//! without a debugger.

use crate::builder::BuildError;
use thiserror::Error;

/// Error type business-logic handlers may fail with.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while invoking a transition.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// No transition with this name is declared from the entity's current
    /// state. A caller error; not retried by the core.
    #[error(
        "No transition named '{transition}' is declared from state '{state}' \
         in state machine '{machine_type}'"
    )]
    UndefinedTransition {
        machine_type: String,
        transition: String,
        state: String,
    },

    /// The definition itself failed to build. Fatal; surfaced immediately.
    #[error("State machine '{machine_type}' has declaration errors")]
    DefinitionHasErrors {
        machine_type: String,
        #[source]
        source: BuildError,
    },

    /// No definition is registered for this machine type.
    #[error("No state machine definition is registered for '{machine_type}'")]
    UnknownMachineType { machine_type: String },

    /// The guard denied the transition. Expected and user-visible, not a
    /// bug; no business logic ran and no state was mutated.
    #[error(
        "Guard denied transition '{transition}' from state '{state}' \
         in state machine '{machine_type}'"
    )]
    AccessDenied {
        machine_type: String,
        transition: String,
        state: String,
    },

    /// A declared transition has no registered handler. A programmer error.
    #[error(
        "No handler is registered for transition '{transition}' \
         in state machine '{machine_type}'"
    )]
    MissingHandler {
        machine_type: String,
        transition: String,
    },

    /// Business logic left the entity in a state outside the declared
    /// target set. Indicates a bug in the declaration or the
    /// implementation; never silently downgraded.
    #[error(
        "Transition '{transition}' of state machine '{machine_type}' left the entity \
         in state '{observed}', which is not among the declared targets {expected:?} \
         from state '{source_state}'"
    )]
    PostStateNotAllowed {
        machine_type: String,
        transition: String,
        source_state: String,
        observed: String,
        expected: Vec<String>,
    },

    /// The business-logic handler failed. Propagated unchanged; the
    /// post-invocation steps are skipped.
    #[error("Handler for transition '{transition}' failed")]
    Handler {
        transition: String,
        #[source]
        source: HandlerError,
    },
}
