use crate::amount::parse_quantity_qnt;
use crate::controls::{ControlHandle, ControlParent};
use crate::domain::{Asset, FieldValue};
use crate::error::VerifyError;

use super::{upstream_value, ContextRef, Field, FieldName, TextControls};

/// Quantity in minor units, scaled by the precision of the selected asset.
#[derive(Debug)]
pub struct QuantityField {
    controls: TextControls,
    ctx: ContextRef,
}

impl QuantityField {
    pub fn new(ctx: ContextRef) -> Self {
        Self {
            controls: TextControls::default(),
            ctx,
        }
    }

    fn selected_asset(&self) -> Option<Asset> {
        upstream_value(&self.ctx, FieldName::Asset)?.into_asset()
    }
}

impl Field for QuantityField {
    fn name(&self) -> FieldName {
        FieldName::Quantity
    }

    fn value(&self) -> Option<FieldValue> {
        let asset = self.selected_asset()?;
        let text = self.controls.trimmed();
        match parse_quantity_qnt(&text, asset.decimals) {
            Ok(qnt) => Some(FieldValue::Quantity(qnt)),
            Err(e) => {
                tracing::debug!(text = %text, decimals = asset.decimals, error = %e, "quantity does not scale");
                None
            }
        }
    }

    fn create_editable_control(&self, parent: &ControlParent) -> ControlHandle {
        self.controls.create_editable(self.name(), parent, "0")
    }

    fn create_readonly_control(&self, _parent: &ControlParent) -> ControlHandle {
        self.controls.create_readonly()
    }

    fn verify(&self) -> Result<(), VerifyError> {
        let asset = self.selected_asset().ok_or(VerifyError::AssetNotSet)?;
        let text = self.controls.trimmed();
        if parse_quantity_qnt(&text, asset.decimals).is_err() {
            return Err(VerifyError::InvalidQuantity);
        }
        self.controls.mirror(&text);
        Ok(())
    }
}
