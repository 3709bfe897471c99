//! Guard predicates deciding whether a transition may be invoked.

use crate::definition::TransitionDefinition;
use crate::invoke::entity::EntityRef;

/// Pluggable predicate deciding whether a transition may be invoked for a
/// given entity and caller context (e.g. an access-control-policy engine).
///
/// Must be cheap and side-effect-free: the same guard backs both the
/// invocation protocol and standalone "can this be done" queries for
/// UI/menu-style checks.
///
/// Any matching closure is a guard:
///
/// ```rust
/// use stateline::definition::TransitionDefinition;
/// use stateline::invoke::{EntityRef, TransitionGuard};
///
/// fn takes_guard(_guard: impl TransitionGuard) {}
///
/// takes_guard(|_entity: &dyn EntityRef, transition: &TransitionDefinition| {
///     transition.name() != "delete"
/// });
/// ```
pub trait TransitionGuard: Send + Sync {
    fn is_transition_allowed(
        &self,
        entity: &dyn EntityRef,
        transition: &TransitionDefinition,
    ) -> bool;
}

impl<F> TransitionGuard for F
where
    F: Fn(&dyn EntityRef, &TransitionDefinition) -> bool + Send + Sync,
{
    fn is_transition_allowed(
        &self,
        entity: &dyn EntityRef,
        transition: &TransitionDefinition,
    ) -> bool {
        self(entity, transition)
    }
}

/// Guard that permits every transition.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl TransitionGuard for AllowAll {
    fn is_transition_allowed(
        &self,
        _entity: &dyn EntityRef,
        _transition: &TransitionDefinition,
    ) -> bool {
        true
    }
}
