use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::amount::{format_quantity_qnt, AmountError};
use crate::controls::{ChoiceInput, ControlHandle, ControlParent, ReadonlyText};
use crate::domain::{Asset, FieldValue, UserAccount};
use crate::error::VerifyError;
use crate::ports::AccountPort;

use super::{upstream_value, ContextRef, Field, FieldName};

/// Asset picker listing the holdings of the current sender.
///
/// The list is rebuilt whenever the sender differs from the one seen at the
/// previous verification. `verify` never fails: a sender without assets
/// leaves the selection empty and the quantity field reports it.
pub struct AssetField {
    accounts: Rc<dyn AccountPort>,
    ctx: ContextRef,
    input: OnceCell<Rc<ChoiceInput>>,
    mirror: OnceCell<Rc<ReadonlyText>>,
    state: RefCell<AssetListState>,
}

/// Assets parallel to the visible entries, plus the sender they were listed for.
#[derive(Debug, Default)]
struct AssetListState {
    assets: Vec<Asset>,
    current_sender: Option<UserAccount>,
}

impl fmt::Debug for AssetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetField")
            .field("input", &self.input)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl AssetField {
    pub fn new(accounts: Rc<dyn AccountPort>, ctx: ContextRef) -> Self {
        Self {
            accounts,
            ctx,
            input: OnceCell::new(),
            mirror: OnceCell::new(),
            state: RefCell::new(AssetListState::default()),
        }
    }

    fn sender(&self) -> Option<UserAccount> {
        upstream_value(&self.ctx, FieldName::Sender)?.into_account()
    }

    fn rebuild(&self, input: &ChoiceInput, sender: Option<&UserAccount>) {
        let _quiet = input.notifier().suppress();
        input.clear();
        let mut assets = Vec::new();
        if let Some(user) = sender.filter(|user| !user.read_only) {
            for (asset, label) in self.holdings(user) {
                input.add(label);
                assets.push(asset);
            }
        }
        self.state.borrow_mut().assets = assets;
        input.select(0);
    }

    fn holdings(&self, user: &UserAccount) -> Vec<(Asset, String)> {
        let balances = match self.accounts.asset_balances(user.account_id) {
            Ok(balances) => balances,
            Err(e) => {
                tracing::warn!(account = %user.account_id, error = %e, "asset balances unavailable");
                return Vec::new();
            }
        };
        balances
            .into_iter()
            .filter_map(|(asset_id, balance_qnt)| match self.accounts.asset(asset_id) {
                Ok(Some(asset)) => match asset_label(&asset, balance_qnt) {
                    Ok(label) => Some((asset, label)),
                    Err(e) => {
                        tracing::warn!(asset = %asset_id, error = %e, "held asset not listed");
                        None
                    }
                },
                Ok(None) => {
                    tracing::warn!(asset = %asset_id, "held asset has no metadata");
                    None
                }
                Err(e) => {
                    tracing::warn!(asset = %asset_id, error = %e, "asset lookup failed");
                    None
                }
            })
            .collect()
    }
}

pub fn asset_label(asset: &Asset, balance_qnt: i64) -> Result<String, AmountError> {
    Ok(format!(
        "Asset: {} Balance: {}",
        asset.name,
        format_quantity_qnt(balance_qnt, asset.decimals)?
    ))
}

impl Field for AssetField {
    fn name(&self) -> FieldName {
        FieldName::Asset
    }

    fn value(&self) -> Option<FieldValue> {
        let index = self.input.get()?.selected_index()?;
        self.state
            .borrow()
            .assets
            .get(index)
            .cloned()
            .map(FieldValue::Asset)
    }

    fn create_editable_control(&self, parent: &ControlParent) -> ControlHandle {
        let input = self.input.get_or_init(|| {
            let input = Rc::new(ChoiceInput::new());
            let sender = self.sender();
            self.rebuild(&input, sender.as_ref());
            self.state.borrow_mut().current_sender = sender;
            input.notifier().set_listener(parent.on_change());
            input
        });
        ControlHandle::Choice(Rc::clone(input))
    }

    fn create_readonly_control(&self, _parent: &ControlParent) -> ControlHandle {
        ControlHandle::Readonly(Rc::clone(self.mirror.get_or_init(Rc::default)))
    }

    fn verify(&self) -> Result<(), VerifyError> {
        let Some(input) = self.input.get() else {
            return Ok(());
        };

        let sender = self.sender();
        let sender_changed = self.state.borrow().current_sender != sender;
        if sender_changed {
            tracing::debug!(sender = ?sender.as_ref().map(|u| u.account_id), "sender changed, relisting assets");
            self.rebuild(input, sender.as_ref());
            self.state.borrow_mut().current_sender = sender;
        }

        if let Some(mirror) = self.mirror.get() {
            match input.selected_entry() {
                Some(label) => mirror.set_text(label),
                None => mirror.clear(),
            }
        }
        Ok(())
    }
}
