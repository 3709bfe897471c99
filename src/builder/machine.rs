//! Builder for state machine definitions.
//!
//! Construction is split in two: mutable placeholders gathered from whatever
//! front-end populates the builder, then one `build()` pass that resolves
//! every placeholder into the immutable definition. A half-valid
//! [`StateMachineDefinition`] is never observable, and multiple independent
//! front-ends can populate the same builder before the final validation.

use crate::builder::error::BuildError;
use crate::definition::{
    ActionDefinition, StateDefinition, StateMachineDefinition, TransitionDefinition, EMPTY_STATE,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Mutable placeholder for a state, created by
/// [`StateMachineDefinitionBuilder::add_state`].
#[derive(Clone, Debug)]
pub struct StatePlaceholder {
    name: String,
    color: Option<String>,
    label: Option<String>,
}

impl StatePlaceholder {
    fn new(name: String) -> Self {
        Self {
            name,
            color: None,
            label: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set presentation color metadata.
    pub fn color(&mut self, color: impl Into<String>) -> &mut Self {
        self.color = Some(color.into());
        self
    }

    /// Set presentation label metadata.
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }
}

/// Mutable placeholder for an action.
#[derive(Clone, Debug)]
pub struct ActionPlaceholder {
    name: String,
}

impl ActionPlaceholder {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Mutable placeholder for a transition.
#[derive(Clone, Debug)]
pub struct TransitionPlaceholder {
    action: String,
    source_state: String,
    target_states: Vec<String>,
}

impl TransitionPlaceholder {
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn source_state(&self) -> &str {
        &self.source_state
    }

    pub fn target_states(&self) -> &[String] {
        &self.target_states
    }
}

/// Mutable construction API producing an immutable
/// [`StateMachineDefinition`].
///
/// The sentinel empty state is declared implicitly by the constructor.
///
/// # Example
///
/// ```rust
/// use stateline::builder::StateMachineDefinitionBuilder;
/// use stateline::definition::EMPTY_STATE;
///
/// let mut builder = StateMachineDefinitionBuilder::new("Invoice");
/// builder.add_state("Open").unwrap().color("#dd0000");
/// builder.add_state("Paid").unwrap();
/// builder.add_transition("create", EMPTY_STATE, ["Open"]).unwrap();
/// builder.add_transition("pay", "Open", ["Paid"]).unwrap();
///
/// let definition = builder.build().unwrap();
/// assert_eq!(definition.machine_type(), "Invoice");
/// assert_eq!(definition.state("Open").unwrap().color(), Some("#dd0000"));
/// ```
#[derive(Debug)]
pub struct StateMachineDefinitionBuilder {
    machine_type: String,
    states: Vec<StatePlaceholder>,
    actions: Vec<ActionPlaceholder>,
    transitions: Vec<TransitionPlaceholder>,
}

impl StateMachineDefinitionBuilder {
    /// Start declaring a machine for the given entity type.
    pub fn new(machine_type: impl Into<String>) -> Self {
        Self {
            machine_type: machine_type.into(),
            states: vec![StatePlaceholder::new(EMPTY_STATE.to_string())],
            actions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn machine_type(&self) -> &str {
        &self.machine_type
    }

    /// Declare a state. Fails if the name was already declared.
    pub fn add_state(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut StatePlaceholder, BuildError> {
        let name = name.into();
        if self.states.iter().any(|s| s.name == name) {
            return Err(BuildError::DuplicateState {
                machine_type: self.machine_type.clone(),
                name,
            });
        }
        self.states.push(StatePlaceholder::new(name));
        Ok(self.states.last_mut().expect("state was just pushed"))
    }

    /// Declare an action. Fails if the name was already declared.
    ///
    /// Explicit declaration is optional: an action is implicitly declared by
    /// its first transition.
    pub fn add_action(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut ActionPlaceholder, BuildError> {
        let name = name.into();
        if self.actions.iter().any(|a| a.name == name) {
            return Err(BuildError::DuplicateAction {
                machine_type: self.machine_type.clone(),
                name,
            });
        }
        self.actions.push(ActionPlaceholder { name });
        Ok(self.actions.last_mut().expect("action was just pushed"))
    }

    /// Declare a transition of `action` from `source_state` to one or more
    /// target states.
    ///
    /// Fails if the `(action, source_state)` pair is already registered (the
    /// determinism invariant) or if no targets are given. Duplicate target
    /// names are collapsed, preserving first-appearance order. The action is
    /// declared implicitly if it was not declared before.
    pub fn add_transition<I, S>(
        &mut self,
        action: impl Into<String>,
        source_state: impl Into<String>,
        target_states: I,
    ) -> Result<&mut TransitionPlaceholder, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let action = action.into();
        let source_state = source_state.into();
        if self
            .transitions
            .iter()
            .any(|t| t.action == action && t.source_state == source_state)
        {
            return Err(BuildError::DuplicateTransition {
                machine_type: self.machine_type.clone(),
                action,
                source_state,
            });
        }

        let mut targets = Vec::new();
        let mut seen = HashSet::new();
        for target in target_states {
            let target = target.into();
            if seen.insert(target.clone()) {
                targets.push(target);
            }
        }
        if targets.is_empty() {
            return Err(BuildError::MissingTargetStates {
                machine_type: self.machine_type.clone(),
                transition: action,
            });
        }

        if !self.actions.iter().any(|a| a.name == action) {
            self.actions.push(ActionPlaceholder {
                name: action.clone(),
            });
        }

        self.transitions.push(TransitionPlaceholder {
            action,
            source_state,
            target_states: targets,
        });
        Ok(self
            .transitions
            .last_mut()
            .expect("transition was just pushed"))
    }

    /// Resolve every placeholder into the immutable definition.
    ///
    /// Transition source and target names are resolved against the state
    /// table, failing with [`BuildError::UndefinedState`] naming the
    /// offending state and transition. Action definitions are built last,
    /// each receiving the finished source-state map for its name. Build is a
    /// pure function of the placeholders; calling it again re-resolves the
    /// same placeholders to an equivalent definition.
    pub fn build(&self) -> Result<StateMachineDefinition, BuildError> {
        let states: HashMap<String, Arc<StateDefinition>> = self
            .states
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    Arc::new(StateDefinition::new(
                        p.name.clone(),
                        p.color.clone(),
                        p.label.clone(),
                    )),
                )
            })
            .collect();

        let mut transitions = Vec::with_capacity(self.transitions.len());
        let mut by_action: HashMap<String, HashMap<String, Arc<TransitionDefinition>>> =
            HashMap::new();

        for placeholder in &self.transitions {
            let source =
                self.resolve_state(&states, &placeholder.source_state, &placeholder.action)?;
            let targets = placeholder
                .target_states
                .iter()
                .map(|name| self.resolve_state(&states, name, &placeholder.action))
                .collect::<Result<Vec<_>, _>>()?;

            let transition = Arc::new(TransitionDefinition::new(
                placeholder.action.clone(),
                source,
                targets,
            ));
            transitions.push(Arc::clone(&transition));
            by_action
                .entry(placeholder.action.clone())
                .or_default()
                .insert(placeholder.source_state.clone(), transition);
        }

        // Actions last: each receives the finished source-state map.
        let actions: HashMap<String, Arc<ActionDefinition>> = self
            .actions
            .iter()
            .map(|p| {
                let by_source = by_action.remove(&p.name).unwrap_or_default();
                (
                    p.name.clone(),
                    Arc::new(ActionDefinition::new(p.name.clone(), by_source)),
                )
            })
            .collect();

        Ok(StateMachineDefinition::new(
            self.machine_type.clone(),
            states,
            actions,
            transitions,
        ))
    }

    fn resolve_state(
        &self,
        states: &HashMap<String, Arc<StateDefinition>>,
        name: &str,
        transition: &str,
    ) -> Result<Arc<StateDefinition>, BuildError> {
        states
            .get(name)
            .cloned()
            .ok_or_else(|| BuildError::UndefinedState {
                machine_type: self.machine_type.clone(),
                transition: transition.to_string(),
                state: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_state_is_declared_implicitly() {
        let builder = StateMachineDefinitionBuilder::new("Thing");
        let definition = builder.build().unwrap();
        assert!(definition.state(EMPTY_STATE).unwrap().is_sentinel());
    }

    #[test]
    fn duplicate_state_is_rejected() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Exists").unwrap();
        let err = builder.add_state("Exists").unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateState {
                machine_type: "Thing".to_string(),
                name: "Exists".to_string(),
            }
        );
    }

    #[test]
    fn redeclaring_the_sentinel_is_rejected() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        let err = builder.add_state(EMPTY_STATE).unwrap_err();
        assert!(matches!(err, BuildError::DuplicateState { .. }));
    }

    #[test]
    fn duplicate_action_is_rejected() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_action("create").unwrap();
        let err = builder.add_action("create").unwrap_err();
        assert!(matches!(err, BuildError::DuplicateAction { .. }));
    }

    #[test]
    fn duplicate_transition_pair_is_rejected() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Exists").unwrap();
        builder.add_state("Archived").unwrap();
        builder
            .add_transition("archive", "Exists", ["Archived"])
            .unwrap();
        let err = builder
            .add_transition("archive", "Exists", ["Exists"])
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateTransition {
                machine_type: "Thing".to_string(),
                action: "archive".to_string(),
                source_state: "Exists".to_string(),
            }
        );
    }

    #[test]
    fn same_action_from_another_state_is_allowed() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Draft").unwrap();
        builder.add_state("Published").unwrap();
        builder.add_state("Archived").unwrap();
        builder
            .add_transition("archive", "Draft", ["Archived"])
            .unwrap();
        builder
            .add_transition("archive", "Published", ["Archived"])
            .unwrap();

        let definition = builder.build().unwrap();
        let action = definition.action("archive").unwrap();
        assert_eq!(action.transitions_by_source_state().len(), 2);
    }

    #[test]
    fn transition_implicitly_declares_its_action() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Exists").unwrap();
        builder
            .add_transition("create", EMPTY_STATE, ["Exists"])
            .unwrap();

        // The implicit declaration occupies the name.
        let err = builder.add_action("create").unwrap_err();
        assert!(matches!(err, BuildError::DuplicateAction { .. }));

        let definition = builder.build().unwrap();
        assert!(definition.action("create").is_some());
    }

    #[test]
    fn empty_target_list_is_rejected() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Exists").unwrap();
        let err = builder
            .add_transition("noop", "Exists", Vec::<String>::new())
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingTargetStates { .. }));
    }

    #[test]
    fn duplicate_targets_are_collapsed_in_order() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Exists").unwrap();
        builder.add_state("Archived").unwrap();
        builder
            .add_transition("archive", "Exists", ["Exists", "Archived", "Exists"])
            .unwrap();

        let definition = builder.build().unwrap();
        let transition = definition.transition_for("archive", "Exists").unwrap();
        let targets: Vec<_> = transition.target_names().collect();
        assert_eq!(targets, vec!["Exists", "Archived"]);
    }

    #[test]
    fn undefined_source_state_fails_the_build() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Exists").unwrap();
        builder
            .add_transition("publish", "Draft", ["Exists"])
            .unwrap();

        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            BuildError::UndefinedState {
                machine_type: "Thing".to_string(),
                transition: "publish".to_string(),
                state: "Draft".to_string(),
            }
        );
    }

    #[test]
    fn undefined_target_state_fails_the_build() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Exists").unwrap();
        builder
            .add_transition("archive", "Exists", ["Archived"])
            .unwrap();

        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            BuildError::UndefinedState {
                machine_type: "Thing".to_string(),
                transition: "archive".to_string(),
                state: "Archived".to_string(),
            }
        );
    }

    #[test]
    fn build_resolves_cross_references() {
        let mut builder = StateMachineDefinitionBuilder::new("Document");
        builder.add_state("Draft").unwrap();
        builder.add_state("Published").unwrap();
        builder
            .add_transition("create", EMPTY_STATE, ["Draft"])
            .unwrap();
        builder
            .add_transition("publish", "Draft", ["Published"])
            .unwrap();

        let definition = builder.build().unwrap();

        for transition in definition.transitions() {
            assert!(definition.state(transition.source_state().name()).is_some());
            for target in transition.target_states() {
                assert!(definition.state(target.name()).is_some());
            }
            assert!(definition.action(transition.name()).is_some());
        }
    }

    #[test]
    fn build_can_be_repeated() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Exists").unwrap();
        builder
            .add_transition("create", EMPTY_STATE, ["Exists"])
            .unwrap();

        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first.states().len(), second.states().len());
        assert_eq!(first.transitions().len(), second.transitions().len());
    }

    #[test]
    fn self_loop_and_multi_target_creation_are_allowed() {
        let mut builder = StateMachineDefinitionBuilder::new("Thing");
        builder.add_state("Exists").unwrap();
        builder.add_state("Rejected").unwrap();
        // Non-deterministic creation: business logic decides the outcome.
        builder
            .add_transition("create", EMPTY_STATE, ["Exists", "Rejected"])
            .unwrap();
        builder
            .add_transition("touch", "Exists", ["Exists"])
            .unwrap();

        let definition = builder.build().unwrap();
        let create = definition.transition_for("create", EMPTY_STATE).unwrap();
        assert!(create.is_creation());
        assert_eq!(create.target_states().len(), 2);

        let touch = definition.transition_for("touch", "Exists").unwrap();
        assert!(touch.allows_target("Exists"));
    }
}
