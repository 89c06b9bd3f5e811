use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::controls::ChangeListener;
use crate::error::VerifyError;
use crate::fields::FieldName;
use crate::registry::FieldRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeOutcome {
    pub blocking: Option<(FieldName, VerifyError)>,
}

impl CascadeOutcome {
    pub fn can_submit(&self) -> bool {
        self.blocking.is_none()
    }

    pub fn message(&self) -> Option<String> {
        self.blocking
            .as_ref()
            .map(|(field, err)| format!("{field}: {err}"))
    }
}

/// Re-verifies every field in declared order after any edit.
///
/// Passes are synchronous and never nest: a trigger arriving while a pass is
/// running is dropped and the running pass decides the outcome.
pub struct Cascade {
    registry: Weak<FieldRegistry>,
    running: Cell<bool>,
    passes: Cell<u64>,
    reentrant: Cell<u64>,
    last: RefCell<CascadeOutcome>,
}

impl Cascade {
    pub fn new(registry: &Rc<FieldRegistry>) -> Rc<Self> {
        Rc::new(Self {
            registry: Rc::downgrade(registry),
            running: Cell::new(false),
            passes: Cell::new(0),
            reentrant: Cell::new(0),
            last: RefCell::new(CascadeOutcome::default()),
        })
    }

    /// Listener for editable controls. Holds the cascade weakly.
    pub fn trigger(self: &Rc<Self>) -> ChangeListener {
        let weak = Rc::downgrade(self);
        Rc::new(move || {
            if let Some(cascade) = weak.upgrade() {
                cascade.run();
            }
        })
    }

    pub fn run(&self) -> CascadeOutcome {
        if self.running.replace(true) {
            self.reentrant.set(self.reentrant.get() + 1);
            tracing::warn!("verification requested while a pass is running; ignored");
            return self.last_outcome();
        }

        let outcome = match self.registry.upgrade() {
            Some(registry) => {
                let blocking = registry.fields().iter().find_map(|field| {
                    field.verify().err().map(|err| (field.name(), err))
                });
                CascadeOutcome { blocking }
            }
            None => CascadeOutcome {
                blocking: Some((FieldName::Sender, VerifyError::InvalidSender)),
            },
        };

        if let Some((field, err)) = &outcome.blocking {
            tracing::debug!(%field, reason = %err, "verification blocked");
        }
        self.passes.set(self.passes.get() + 1);
        *self.last.borrow_mut() = outcome.clone();
        self.running.set(false);
        outcome
    }

    pub fn last_outcome(&self) -> CascadeOutcome {
        self.last.borrow().clone()
    }

    /// Completed passes since creation.
    pub fn passes(&self) -> u64 {
        self.passes.get()
    }

    /// Triggers dropped because a pass was already running.
    pub fn reentrant_triggers(&self) -> u64 {
        self.reentrant.get()
    }
}
