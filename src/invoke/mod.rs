//! Transition invocation protocol: guard-check, business-logic dispatch and
//! post-condition assertion for single transitions against persisted
//! entities.

pub mod entity;
pub mod error;
pub mod event;
pub mod guard;
pub mod handler;
pub mod invoker;
pub mod observer;

pub use entity::{EntityId, EntityRef};
pub use error::{HandlerError, InvokeError};
pub use event::TransitionEvent;
pub use guard::{AllowAll, TransitionGuard};
pub use handler::{HandlerRegistry, TransitionHandler};
pub use invoker::TransitionInvoker;
pub use observer::{TransitionObserver, TransitionRecord};
