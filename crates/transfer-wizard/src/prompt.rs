use std::cell::RefCell;
use std::rc::Rc;

use transfer_wizard_core::{FeeDeadlineChoice, FeeDeadlinePort};

/// Fee/deadline port backed by the modal window.
///
/// egui cannot block inside `open()`, so the window records the user's answer
/// here first and the shell calls `submit()` afterwards.
#[derive(Debug, Clone, Default)]
pub struct PreparedFeeDeadline {
    answer: Rc<RefCell<Option<FeeDeadlineChoice>>>,
}

impl PreparedFeeDeadline {
    pub fn prepare(&self, choice: FeeDeadlineChoice) {
        *self.answer.borrow_mut() = Some(choice);
    }
}

impl FeeDeadlinePort for PreparedFeeDeadline {
    fn open(&self) -> FeeDeadlineChoice {
        self.answer
            .borrow_mut()
            .take()
            .unwrap_or(FeeDeadlineChoice::Cancelled)
    }
}
