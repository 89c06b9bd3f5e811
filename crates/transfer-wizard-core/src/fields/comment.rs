use crate::controls::{ControlHandle, ControlParent};
use crate::domain::FieldValue;
use crate::error::VerifyError;

use super::{Field, FieldName, TextControls};

#[derive(Debug)]
pub struct CommentField {
    controls: TextControls,
    max_length: usize,
}

impl CommentField {
    pub fn new(max_length: usize) -> Self {
        Self {
            controls: TextControls::default(),
            max_length,
        }
    }
}

impl Field for CommentField {
    fn name(&self) -> FieldName {
        FieldName::Comment
    }

    fn value(&self) -> Option<FieldValue> {
        Some(FieldValue::Text(self.controls.trimmed()))
    }

    fn create_editable_control(&self, parent: &ControlParent) -> ControlHandle {
        self.controls.create_editable(self.name(), parent, "")
    }

    fn create_readonly_control(&self, _parent: &ControlParent) -> ControlHandle {
        self.controls.create_readonly()
    }

    fn verify(&self) -> Result<(), VerifyError> {
        let comment = self.controls.trimmed();
        if comment.chars().count() > self.max_length {
            return Err(VerifyError::CommentTooLong {
                max: self.max_length,
            });
        }
        self.controls.mirror(&comment);
        Ok(())
    }
}
