use std::rc::{Rc, Weak};

use crate::domain::FieldValue;
use crate::fields::{Field, FieldHandle, FieldName, SenderField};

/// Read access to sibling fields, handed to fields that depend on upstream values.
pub trait FormContext {
    fn field(&self, name: FieldName) -> Option<FieldHandle>;

    fn value_of(&self, name: FieldName) -> Option<FieldValue> {
        self.field(name)?.value()
    }
}

/// Fields of one transaction definition in declared (dependency) order.
///
/// The sender is always first; everything else is supplied by the builder
/// closure, which receives a weak context to hand to dependent fields.
pub struct FieldRegistry {
    sender: Rc<SenderField>,
    fields: Vec<FieldHandle>,
}

impl FieldRegistry {
    pub fn build<B>(sender: SenderField, build_rest: B) -> Rc<Self>
    where
        B: FnOnce(Weak<dyn FormContext>) -> Vec<FieldHandle>,
    {
        Rc::new_cyclic(|weak: &Weak<FieldRegistry>| {
            let ctx: Weak<dyn FormContext> = weak.clone();
            let sender = Rc::new(sender);
            let mut fields: Vec<FieldHandle> = vec![Rc::clone(&sender) as FieldHandle];
            fields.extend(
                build_rest(ctx)
                    .into_iter()
                    .filter(|field| field.name() != FieldName::Sender),
            );
            FieldRegistry { sender, fields }
        })
    }

    pub fn fields(&self) -> &[FieldHandle] {
        &self.fields
    }

    pub fn sender(&self) -> &SenderField {
        &self.sender
    }
}

impl FormContext for FieldRegistry {
    fn field(&self, name: FieldName) -> Option<FieldHandle> {
        self.fields
            .iter()
            .find(|field| field.name() == name)
            .cloned()
    }
}
