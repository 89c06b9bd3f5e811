//! Form fields of the transfer wizard.
//!
//! A field owns one logical value, one editable control, one read-only mirror
//! and its validation rule. `value()` is always derived from current control
//! state and never fails; `verify()` reports why the value is unusable and
//! refreshes the mirror only on success.

mod asset;
mod comment;
mod quantity;
mod recipient;
mod sender;

use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::controls::{ControlHandle, ControlParent, ReadonlyText, TextInput};
use crate::domain::FieldValue;
use crate::error::VerifyError;
use crate::registry::FormContext;

pub use asset::{asset_label, AssetField};
pub use comment::CommentField;
pub use quantity::QuantityField;
pub use recipient::RecipientField;
pub use sender::SenderField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Sender,
    Recipient,
    Asset,
    Quantity,
    Comment,
}

impl FieldName {
    pub fn label(self) -> &'static str {
        match self {
            FieldName::Sender => "Sender",
            FieldName::Recipient => "Recipient",
            FieldName::Asset => "Asset",
            FieldName::Quantity => "Quantity",
            FieldName::Comment => "Comment",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub trait Field {
    fn name(&self) -> FieldName;

    fn label(&self) -> &str {
        self.name().label()
    }

    /// Current value, or `None` while the control content does not resolve.
    fn value(&self) -> Option<FieldValue>;

    fn create_editable_control(&self, parent: &ControlParent) -> ControlHandle;

    fn create_readonly_control(&self, parent: &ControlParent) -> ControlHandle;

    fn verify(&self) -> Result<(), VerifyError>;
}

pub type FieldHandle = Rc<dyn Field>;

pub type ContextRef = Weak<dyn FormContext>;

pub(crate) fn upstream_value(ctx: &ContextRef, name: FieldName) -> Option<FieldValue> {
    ctx.upgrade()?.value_of(name)
}

/// Editable text box plus its mirror, shared by the free-text fields.
#[derive(Debug, Default)]
pub(crate) struct TextControls {
    input: OnceCell<Rc<TextInput>>,
    mirror: OnceCell<Rc<ReadonlyText>>,
}

impl TextControls {
    pub(crate) fn create_editable(
        &self,
        field: FieldName,
        parent: &ControlParent,
        initial: &str,
    ) -> ControlHandle {
        if self.input.get().is_some() {
            tracing::debug!(%field, "editable control already created");
        }
        let input = self.input.get_or_init(|| {
            let input = Rc::new(TextInput::new(initial));
            input.notifier().set_listener(parent.on_change());
            input
        });
        ControlHandle::Text(Rc::clone(input))
    }

    pub(crate) fn create_readonly(&self) -> ControlHandle {
        let mirror = self.mirror.get_or_init(Rc::default);
        ControlHandle::Readonly(Rc::clone(mirror))
    }

    /// Trimmed control text; empty before the control exists.
    pub(crate) fn trimmed(&self) -> String {
        self.input
            .get()
            .map(|input| input.text().trim().to_owned())
            .unwrap_or_default()
    }

    pub(crate) fn mirror(&self, text: &str) {
        if let Some(mirror) = self.mirror.get() {
            mirror.set_text(text);
        }
    }
}
