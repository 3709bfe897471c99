//! Business-logic dispatch by transition name.
//!
//! Handlers are registered per transition name in an explicit map instead of
//! being discovered by reflection, so a missing implementation is a
//! diagnosable error and can even be checked up front against a definition.

use crate::definition::StateMachineDefinition;
use crate::invoke::error::{HandlerError, InvokeError};
use crate::invoke::event::TransitionEvent;
use std::collections::HashMap;

/// Boxed business-logic callable for one transition name.
pub type TransitionHandler =
    Box<dyn Fn(&mut TransitionEvent<'_>) -> Result<(), HandlerError> + Send + Sync>;

/// Registry mapping transition names to business-logic handlers.
///
/// # Example
///
/// ```rust
/// use stateline::invoke::HandlerRegistry;
///
/// let mut handlers = HandlerRegistry::new();
/// handlers.register("publish", |event| {
///     event.set_return_value(serde_json::json!("published"));
///     Ok(())
/// });
/// assert!(handlers.contains("publish"));
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, TransitionHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a transition name, replacing any previous
    /// one.
    pub fn register<F>(&mut self, transition: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut TransitionEvent<'_>) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(transition.into(), Box::new(handler));
        self
    }

    pub fn contains(&self, transition: &str) -> bool {
        self.handlers.contains_key(transition)
    }

    pub(crate) fn get(&self, transition: &str) -> Option<&TransitionHandler> {
        self.handlers.get(transition)
    }

    /// Check up front that every action of a definition has a handler.
    ///
    /// Reports the first missing transition (in name order) as
    /// [`InvokeError::MissingHandler`], turning a call-time surprise into a
    /// construction-time check.
    pub fn verify_against(&self, definition: &StateMachineDefinition) -> Result<(), InvokeError> {
        let mut names: Vec<&str> = definition.actions().keys().map(String::as_str).collect();
        names.sort_unstable();
        for name in names {
            if !self.handlers.contains_key(name) {
                return Err(InvokeError::MissingHandler {
                    machine_type: definition.machine_type().to_string(),
                    transition: name.to_string(),
                });
            }
        }
        Ok(())
    }
}
