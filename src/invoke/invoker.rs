//! The transition invocation protocol.
//!
//! One `invoke` call runs, strictly in order: resolve, guard, business
//! logic, identity propagation, invalidate-and-reload, post-condition
//! assertion, notification. The first two steps are pure checks and safe to
//! retry; the business-logic step performs the actual side effect and is
//! never retried by the core. The telemetry finalizer runs regardless of
//! outcome.

use crate::definition::{StateMachineDefinition, TransitionDefinition};
use crate::invoke::entity::EntityRef;
use crate::invoke::error::InvokeError;
use crate::invoke::event::TransitionEvent;
use crate::invoke::guard::TransitionGuard;
use crate::invoke::handler::HandlerRegistry;
use crate::invoke::observer::{TransitionObserver, TransitionRecord};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Guards, executes and verifies single state transitions against persisted
/// entities, per one frozen [`StateMachineDefinition`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use stateline::builder::StateMachineDefinitionBuilder;
/// use stateline::definition::EMPTY_STATE;
/// use stateline::invoke::{AllowAll, HandlerRegistry, TransitionInvoker};
///
/// let mut builder = StateMachineDefinitionBuilder::new("Document");
/// builder.add_state("Draft").unwrap();
/// builder.add_transition("create", EMPTY_STATE, ["Draft"]).unwrap();
/// let definition = Arc::new(builder.build().unwrap());
///
/// let mut handlers = HandlerRegistry::new();
/// handlers.register("create", |event| {
///     event.set_new_id(1u64);
///     Ok(())
/// });
///
/// let invoker = TransitionInvoker::new(definition, AllowAll, handlers);
/// ```
pub struct TransitionInvoker {
    definition: Arc<StateMachineDefinition>,
    guard: Box<dyn TransitionGuard>,
    handlers: HandlerRegistry,
    observer: Option<Arc<dyn TransitionObserver>>,
}

impl TransitionInvoker {
    pub fn new(
        definition: Arc<StateMachineDefinition>,
        guard: impl TransitionGuard + 'static,
        handlers: HandlerRegistry,
    ) -> Self {
        Self {
            definition,
            guard: Box::new(guard),
            handlers,
            observer: None,
        }
    }

    /// Attach an observer for post-transition notifications and the
    /// finalizer hook.
    pub fn with_observer(mut self, observer: Arc<dyn TransitionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn definition(&self) -> &Arc<StateMachineDefinition> {
        &self.definition
    }

    /// Check that every declared action has a registered handler, so a
    /// missing implementation surfaces at construction time rather than
    /// mid-invocation.
    pub fn handlers_complete(&self) -> Result<(), InvokeError> {
        self.handlers.verify_against(&self.definition)
    }

    /// Whether the named transition could be invoked for this entity right
    /// now.
    ///
    /// Resolves the transition and consults the guard; cheap and
    /// side-effect-free, for UI/menu-style queries. Fails if no transition
    /// with this name is declared from the entity's current state.
    pub fn is_transition_allowed(
        &self,
        entity: &dyn EntityRef,
        transition: &str,
    ) -> Result<bool, InvokeError> {
        let state = entity.current_state();
        let definition = self.resolve(transition, &state)?;
        Ok(self.guard.is_transition_allowed(entity, &definition))
    }

    /// Invoke the named transition against the entity.
    ///
    /// Returns the handler's return value on success. The finalizer
    /// (observer hook and a tracing event) runs on every path.
    pub fn invoke(
        &self,
        entity: &mut dyn EntityRef,
        transition: &str,
        args: Vec<Value>,
    ) -> Result<Option<Value>, InvokeError> {
        let result = self.invoke_inner(entity, transition, args);

        if let Some(observer) = &self.observer {
            observer.invocation_finished(transition, result.is_ok());
        }
        match &result {
            Ok(_) => debug!(
                machine_type = %self.definition.machine_type(),
                transition,
                "transition invocation succeeded"
            ),
            Err(error) => warn!(
                machine_type = %self.definition.machine_type(),
                transition,
                %error,
                "transition invocation failed"
            ),
        }

        result
    }

    fn invoke_inner(
        &self,
        entity: &mut dyn EntityRef,
        transition: &str,
        args: Vec<Value>,
    ) -> Result<Option<Value>, InvokeError> {
        // 1. Resolve the transition for the entity's current state.
        let source_state = entity.current_state();
        let definition = self.resolve(transition, &source_state)?;

        // 2. Guard. No business logic has run and no state is mutated yet.
        if !self.guard.is_transition_allowed(entity, &definition) {
            return Err(InvokeError::AccessDenied {
                machine_type: self.definition.machine_type().to_string(),
                transition: transition.to_string(),
                state: source_state,
            });
        }

        // 3. Dispatch to the business-logic handler.
        let handler =
            self.handlers
                .get(transition)
                .ok_or_else(|| InvokeError::MissingHandler {
                    machine_type: self.definition.machine_type().to_string(),
                    transition: transition.to_string(),
                })?;

        let mut event = TransitionEvent::new(entity, transition.to_string(), args);
        debug!(
            machine_type = %self.definition.machine_type(),
            transition,
            event_id = %event.event_id(),
            source_state = %source_state,
            "dispatching transition handler"
        );
        handler(&mut event).map_err(|source| InvokeError::Handler {
            transition: transition.to_string(),
            source,
        })?;
        let (new_id, return_value, event_id, started_at) = event.into_outcome();

        // 4. Propagate a signaled identity change before re-reading state.
        if let Some(id) = new_id {
            entity.set_id(id);
        }

        // 5. Invalidate cached data and reload from the backing store.
        entity.invalidate();
        let observed = entity.current_state();

        // 6. Assert the observed state is among the declared targets.
        if !definition.allows_target(&observed) {
            return Err(InvokeError::PostStateNotAllowed {
                machine_type: self.definition.machine_type().to_string(),
                transition: transition.to_string(),
                source_state,
                observed,
                expected: definition.target_names().map(String::from).collect(),
            });
        }

        // 7. Post-transition notification.
        if let Some(observer) = &self.observer {
            observer.transition_applied(&TransitionRecord {
                machine_type: self.definition.machine_type().to_string(),
                transition: transition.to_string(),
                from: source_state,
                to: observed,
                entity_id: entity.id(),
                event_id,
                started_at,
                finished_at: Utc::now(),
            });
        }

        Ok(return_value)
    }

    fn resolve(
        &self,
        transition: &str,
        state: &str,
    ) -> Result<Arc<TransitionDefinition>, InvokeError> {
        self.definition
            .transition_for(transition, state)
            .cloned()
            .ok_or_else(|| InvokeError::UndefinedTransition {
                machine_type: self.definition.machine_type().to_string(),
                transition: transition.to_string(),
                state: state.to_string(),
            })
    }
}
