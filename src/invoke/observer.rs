//! Post-transition notification and the always-run telemetry hook.

use crate::invoke::entity::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary of one successfully applied transition, handed to observers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub machine_type: String,
    pub transition: String,
    pub from: String,
    pub to: String,
    pub entity_id: Option<EntityId>,
    pub event_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Hook for external event/telemetry systems.
///
/// `transition_applied` fires after a successful invocation (the protocol's
/// notification step). `invocation_finished` is the finalizer: it runs on
/// success and on every failure path, including handler errors and
/// post-condition violations.
pub trait TransitionObserver: Send + Sync {
    fn transition_applied(&self, record: &TransitionRecord) {
        let _ = record;
    }

    fn invocation_finished(&self, transition: &str, succeeded: bool) {
        let _ = (transition, succeeded);
    }
}
