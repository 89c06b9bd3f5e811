use std::cell::OnceCell;
use std::rc::Rc;

use crate::controls::{ChoiceInput, ControlHandle, ControlParent, ReadonlyText};
use crate::domain::{FieldValue, UserAccount};
use crate::error::VerifyError;

use super::{Field, FieldName};

/// The signing user, picked from the accounts the shell knows about.
#[derive(Debug)]
pub struct SenderField {
    users: Vec<UserAccount>,
    initial: Option<usize>,
    input: OnceCell<Rc<ChoiceInput>>,
    mirror: OnceCell<Rc<ReadonlyText>>,
}

impl SenderField {
    pub fn new(users: Vec<UserAccount>, initial: Option<usize>) -> Self {
        Self {
            users,
            initial,
            input: OnceCell::new(),
            mirror: OnceCell::new(),
        }
    }

    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    pub fn selected(&self) -> Option<UserAccount> {
        let index = self.input.get()?.selected_index()?;
        self.users.get(index).cloned()
    }
}

impl Field for SenderField {
    fn name(&self) -> FieldName {
        FieldName::Sender
    }

    fn value(&self) -> Option<FieldValue> {
        self.selected().map(FieldValue::Account)
    }

    fn create_editable_control(&self, parent: &ControlParent) -> ControlHandle {
        let input = self.input.get_or_init(|| {
            let input = Rc::new(ChoiceInput::new());
            for user in &self.users {
                input.add(user.display_label());
            }
            if let Some(index) = self.initial {
                input.select(index);
            }
            input.notifier().set_listener(parent.on_change());
            input
        });
        ControlHandle::Choice(Rc::clone(input))
    }

    fn create_readonly_control(&self, _parent: &ControlParent) -> ControlHandle {
        ControlHandle::Readonly(Rc::clone(self.mirror.get_or_init(Rc::default)))
    }

    fn verify(&self) -> Result<(), VerifyError> {
        let user = self.selected().ok_or(VerifyError::InvalidSender)?;
        if let Some(mirror) = self.mirror.get() {
            mirror.set_text(user.display_label());
        }
        Ok(())
    }
}
