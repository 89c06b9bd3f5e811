use crate::controls::{ControlHandle, ControlParent};
use crate::domain::FieldValue;
use crate::error::VerifyError;

use super::{Field, FieldName, TextControls};

#[derive(Debug, Default)]
pub struct RecipientField {
    controls: TextControls,
}

impl RecipientField {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Field for RecipientField {
    fn name(&self) -> FieldName {
        FieldName::Recipient
    }

    fn value(&self) -> Option<FieldValue> {
        let text = self.controls.trimmed();
        match text.parse::<u64>() {
            Ok(id) => Some(FieldValue::Id(id)),
            Err(e) => {
                tracing::debug!(text = %text, error = %e, "recipient id does not parse");
                None
            }
        }
    }

    fn create_editable_control(&self, parent: &ControlParent) -> ControlHandle {
        self.controls.create_editable(self.name(), parent, "")
    }

    fn create_readonly_control(&self, _parent: &ControlParent) -> ControlHandle {
        self.controls.create_readonly()
    }

    fn verify(&self) -> Result<(), VerifyError> {
        let text = self.controls.trimmed();
        if text == "0" {
            return Err(VerifyError::MissingRecipient);
        }
        if text.parse::<u64>().is_err() {
            return Err(VerifyError::InvalidRecipient);
        }
        self.controls.mirror(&text);
        Ok(())
    }
}
