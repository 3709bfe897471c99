//! Process-wide bag of built definitions, keyed by machine type.

use crate::builder::BuildError;
use crate::definition::machine::StateMachineDefinition;
use crate::invoke::InvokeError;
use std::collections::HashMap;
use std::sync::Arc;

/// Holds the per-machine-type outcome of building definitions, including
/// failed builds.
///
/// Front-ends typically build definitions lazily per entity type and cache
/// the result. Storing the failure too means every later invocation against
/// a broken declaration surfaces [`InvokeError::DefinitionHasErrors`]
/// immediately instead of retrying a build that cannot succeed.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    definitions: HashMap<String, Result<Arc<StateMachineDefinition>, BuildError>>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a build outcome under the definition's machine type.
    pub fn insert(
        &mut self,
        machine_type: impl Into<String>,
        outcome: Result<StateMachineDefinition, BuildError>,
    ) {
        self.definitions
            .insert(machine_type.into(), outcome.map(Arc::new));
    }

    pub fn contains(&self, machine_type: &str) -> bool {
        self.definitions.contains_key(machine_type)
    }

    /// Fetch the definition for a machine type.
    ///
    /// A stored failed build yields [`InvokeError::DefinitionHasErrors`]
    /// wrapping the original build error; an unknown machine type yields
    /// [`InvokeError::UnknownMachineType`].
    pub fn get(&self, machine_type: &str) -> Result<Arc<StateMachineDefinition>, InvokeError> {
        match self.definitions.get(machine_type) {
            None => Err(InvokeError::UnknownMachineType {
                machine_type: machine_type.to_string(),
            }),
            Some(Err(build_error)) => Err(InvokeError::DefinitionHasErrors {
                machine_type: machine_type.to_string(),
                source: build_error.clone(),
            }),
            Some(Ok(definition)) => Ok(Arc::clone(definition)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineDefinitionBuilder;
    use crate::definition::EMPTY_STATE;

    #[test]
    fn stores_and_returns_built_definitions() {
        let mut builder = StateMachineDefinitionBuilder::new("Invoice");
        builder.add_state("Open").unwrap();
        builder
            .add_transition("create", EMPTY_STATE, ["Open"])
            .unwrap();

        let mut registry = DefinitionRegistry::new();
        registry.insert("Invoice", builder.build());

        let definition = registry.get("Invoice").unwrap();
        assert_eq!(definition.machine_type(), "Invoice");
    }

    #[test]
    fn failed_builds_surface_as_definition_errors() {
        let mut builder = StateMachineDefinitionBuilder::new("Invoice");
        builder
            .add_transition("create", EMPTY_STATE, ["Open"])
            .unwrap();

        let mut registry = DefinitionRegistry::new();
        registry.insert("Invoice", builder.build());

        let err = registry.get("Invoice").unwrap_err();
        match err {
            InvokeError::DefinitionHasErrors {
                machine_type,
                source,
            } => {
                assert_eq!(machine_type, "Invoice");
                assert!(matches!(
                    source,
                    crate::builder::BuildError::UndefinedState { .. }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_machine_type_is_an_error() {
        let registry = DefinitionRegistry::new();
        let err = registry.get("Ghost").unwrap_err();
        assert!(matches!(err, InvokeError::UnknownMachineType { .. }));
    }
}
