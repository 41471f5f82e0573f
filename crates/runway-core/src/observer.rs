//! Observer pattern for model change notifications.
//!
//! A single event kind, "changed", carries no payload: observers receive a
//! shared reference to the model and read whatever fields they need.
//! Notification is synchronous and happens in registration order on the
//! call stack of the mutation that triggered it.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::model::GrowthModel;

/// Observer trait for receiving change notifications.
pub trait ChangeObserver: Send + Sync {
    /// Called after the model finished updating.
    fn on_changed(&self, model: &GrowthModel);
}

/// Subject that manages a collection of observers.
pub struct ChangeSubject {
    observers: RwLock<Vec<Arc<dyn ChangeObserver>>>,
}

impl ChangeSubject {
    /// Create a new subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn ChangeObserver>) {
        self.observers.write().push(observer);
    }

    /// Notify all observers that `model` changed.
    ///
    /// The observer list is copied first so an observer may register others
    /// from inside its callback; those fire from the next notification on.
    pub fn notify(&self, model: &GrowthModel) {
        let observers = self.observers.read().clone();
        trace!(observers = observers.len(), "Notifying change observers");
        for observer in &observers {
            observer.on_changed(model);
        }
    }

    /// Get the number of registered observers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.observers.read().len()
    }
}

impl Default for ChangeSubject {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSubject")
            .field("observers", &self.count())
            .finish()
    }
}
