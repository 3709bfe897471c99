//! Immutable state definitions.

use serde::{Deserialize, Serialize};

/// Reserved state name meaning "entity does not exist yet / no longer
/// exists".
///
/// It is the only legal source state for creating transitions and the only
/// legal target state for deleting transitions. Every builder declares it
/// implicitly.
pub const EMPTY_STATE: &str = "";

/// A named state of a machine, immutable after construction.
///
/// `color` and `label` are presentation metadata only; they carry no
/// semantics for validation or invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefinition {
    name: String,
    color: Option<String>,
    label: Option<String>,
}

impl StateDefinition {
    pub(crate) fn new(name: String, color: Option<String>, label: Option<String>) -> Self {
        Self { name, color, label }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether this is the reserved [`EMPTY_STATE`] sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.name == EMPTY_STATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_the_empty_name() {
        let sentinel = StateDefinition::new(EMPTY_STATE.to_string(), None, None);
        assert!(sentinel.is_sentinel());

        let named = StateDefinition::new("Exists".to_string(), None, None);
        assert!(!named.is_sentinel());
    }

    #[test]
    fn presentation_metadata_is_optional() {
        let state = StateDefinition::new(
            "Published".to_string(),
            Some("#00ff00".to_string()),
            Some("Published".to_string()),
        );
        assert_eq!(state.color(), Some("#00ff00"));
        assert_eq!(state.label(), Some("Published"));
    }
}
