//! The transfer-asset transaction definition: its fields, the live sender
//! check and the verify → fee/deadline → build submission protocol.

use std::rc::Rc;

use crate::cascade::{Cascade, CascadeOutcome};
use crate::config::WizardConfig;
use crate::controls::{ControlHandle, ControlParent};
use crate::domain::{
    AccountId, Asset, AssetId, FeeDeadline, FeeDeadlineChoice, FieldValue, TransferOptions,
    TransferRequest, UserAccount,
};
use crate::error::{SubmitError, VerifyError};
use crate::fields::{
    AssetField, CommentField, FieldHandle, FieldName, QuantityField, RecipientField, SenderField,
};
use crate::ports::{AccountPort, FeeDeadlinePort, LedgerPort, PortError};
use crate::registry::{FieldRegistry, FormContext};
use crate::state_machine::{
    submit_transition, StateTransition, SubmitAction, SubmitState, TransitionError,
};

/// One laid-out field: its label and both of its controls.
#[derive(Debug, Clone)]
pub struct FieldRow {
    pub name: FieldName,
    pub label: String,
    pub editable: ControlHandle,
    pub readonly: ControlHandle,
}

#[derive(Debug, Clone, Default)]
pub struct FormPage {
    pub rows: Vec<FieldRow>,
}

impl FormPage {
    pub fn row(&self, name: FieldName) -> Option<&FieldRow> {
        self.rows.iter().find(|row| row.name == name)
    }
}

/// Everything the ledger call needs except fee and deadline.
#[derive(Debug, Clone)]
struct TransferDraft {
    sender: UserAccount,
    recipient: AccountId,
    asset_id: AssetId,
    quantity_qnt: i64,
}

pub struct TransferAssetWizard<A, L, F>
where
    A: AccountPort + 'static,
    L: LedgerPort,
    F: FeeDeadlinePort,
{
    pub accounts: Rc<A>,
    pub ledger: L,
    pub prompt: F,
    config: WizardConfig,
    registry: Rc<FieldRegistry>,
    cascade: Rc<Cascade>,
    page: FormPage,
    state: SubmitState,
    transitions: Vec<StateTransition>,
}

impl<A, L, F> TransferAssetWizard<A, L, F>
where
    A: AccountPort + 'static,
    L: LedgerPort,
    F: FeeDeadlinePort,
{
    /// Builds the fields, creates every control once and runs the first pass.
    pub fn new(
        config: WizardConfig,
        users: Vec<UserAccount>,
        initial_sender: Option<usize>,
        accounts: A,
        ledger: L,
        prompt: F,
    ) -> Self {
        let accounts = Rc::new(accounts);
        let account_port: Rc<dyn AccountPort> = accounts.clone();
        let max_comment_length = config.max_comment_length;
        let registry = FieldRegistry::build(SenderField::new(users, initial_sender), |ctx| {
            vec![
                Rc::new(RecipientField::new()) as FieldHandle,
                Rc::new(AssetField::new(account_port, ctx.clone())) as FieldHandle,
                Rc::new(QuantityField::new(ctx)) as FieldHandle,
                Rc::new(CommentField::new(max_comment_length)) as FieldHandle,
            ]
        });
        let cascade = Cascade::new(&registry);

        let parent = ControlParent::new(cascade.trigger());
        let rows = registry
            .fields()
            .iter()
            .map(|field| FieldRow {
                name: field.name(),
                label: field.label().to_owned(),
                editable: field.create_editable_control(&parent),
                readonly: field.create_readonly_control(&parent),
            })
            .collect();
        cascade.run();

        Self {
            accounts,
            ledger,
            prompt,
            config,
            registry,
            cascade,
            page: FormPage { rows },
            state: SubmitState::Editing,
            transitions: Vec::new(),
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn fields(&self) -> &[FieldHandle] {
        self.registry.fields()
    }

    pub fn page(&self) -> &FormPage {
        &self.page
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn last_outcome(&self) -> CascadeOutcome {
        self.cascade.last_outcome()
    }

    pub fn cascade(&self) -> &Rc<Cascade> {
        &self.cascade
    }

    pub fn value_of(&self, name: FieldName) -> Option<FieldValue> {
        self.registry.value_of(name)
    }

    pub fn sender(&self) -> Option<UserAccount> {
        self.registry.sender().selected()
    }

    pub fn verify_all(&self) -> CascadeOutcome {
        self.cascade.run()
    }

    /// Checks the sender against live balances. Runs immediately before every submission.
    pub fn verify_sender(&self) -> Result<(), VerifyError> {
        let user = self.sender().ok_or(VerifyError::InvalidSender)?;
        if user.read_only {
            return Err(VerifyError::ReadOnlyAccount);
        }

        let asset = self
            .value_of(FieldName::Asset)
            .and_then(FieldValue::into_asset);
        let quantity_qnt = self
            .value_of(FieldName::Quantity)
            .and_then(|v| v.as_quantity());
        if let (Some(asset), Some(quantity_qnt)) = (asset, quantity_qnt) {
            let balance = self
                .accounts
                .unconfirmed_asset_balance(user.account_id, asset.id)
                .map_err(account_unavailable)?;
            match balance {
                Some(balance) if quantity_qnt <= balance => {}
                _ => return Err(VerifyError::InsufficientAssetBalance),
            }
        }

        let native = self
            .accounts
            .native_balance(user.account_id)
            .map_err(account_unavailable)?;
        if native < self.config.min_native_balance_nqt {
            return Err(VerifyError::InsufficientNativeBalance);
        }
        Ok(())
    }

    /// Runs the submission protocol and returns the new transaction's id.
    ///
    /// Every failure leaves the wizard in [`SubmitState::Editing`] except a
    /// call made after a successful submission, which is rejected.
    pub fn submit(&mut self) -> Result<String, SubmitError> {
        if self.state != SubmitState::Editing {
            return Err(TransitionError {
                from: self.state,
                action: SubmitAction::RequestSubmit,
            }
            .into());
        }
        if let Some((_, err)) = self.cascade.run().blocking {
            return Err(err.into());
        }
        let draft = self.draft()?;

        self.advance(SubmitAction::RequestSubmit)?;
        if let Err(err) = self.verify_sender() {
            tracing::warn!(sender = %draft.sender.account_id, reason = %err, "sender check failed");
            self.advance(SubmitAction::SenderRejected)?;
            self.advance(SubmitAction::Resume)?;
            return Err(err.into());
        }
        self.advance(SubmitAction::SenderVerified)?;

        let fee_deadline = match self.prompt.open() {
            FeeDeadlineChoice::Confirmed(fee_deadline) => fee_deadline,
            FeeDeadlineChoice::Cancelled => {
                self.advance(SubmitAction::FeeDeadlineCancelled)?;
                return Err(SubmitError::InvalidFeeOrDeadline);
            }
        };
        self.advance(SubmitAction::FeeDeadlineConfirmed)?;

        let request = draft.into_request(fee_deadline);
        match self.ledger.build_transfer_transaction(&request) {
            Ok(tx) => {
                self.advance(SubmitAction::ServiceAccepted)?;
                tracing::info!(id = %tx.id, asset = %tx.asset_id, quantity = tx.quantity_qnt, "asset transfer created");
                Ok(tx.string_id())
            }
            Err(err) => {
                match &err {
                    PortError::Validation(_) => {
                        tracing::warn!(error = %err, "ledger rejected the transfer")
                    }
                    _ => tracing::error!(error = %err, "transfer transaction could not be built"),
                }
                self.advance(SubmitAction::ServiceRejected)?;
                self.advance(SubmitAction::Resume)?;
                Err(SubmitError::Service {
                    message: err.message().to_owned(),
                })
            }
        }
    }

    fn draft(&self) -> Result<TransferDraft, VerifyError> {
        let sender = self.sender().ok_or(VerifyError::InvalidSender)?;
        let recipient = self
            .value_of(FieldName::Recipient)
            .and_then(|v| v.as_id())
            .ok_or(VerifyError::InvalidRecipient)?;
        let asset: Asset = self
            .value_of(FieldName::Asset)
            .and_then(FieldValue::into_asset)
            .ok_or(VerifyError::AssetNotSet)?;
        let quantity_qnt = self
            .value_of(FieldName::Quantity)
            .and_then(|v| v.as_quantity())
            .ok_or(VerifyError::InvalidQuantity)?;
        Ok(TransferDraft {
            sender,
            recipient: AccountId(recipient),
            asset_id: asset.id,
            quantity_qnt,
        })
    }

    fn advance(&mut self, action: SubmitAction) -> Result<(), TransitionError> {
        let (next, transition) = submit_transition(self.state, action)?;
        tracing::info!(from = ?transition.from, to = ?transition.to, reason = transition.reason, "submit transition");
        self.state = next;
        self.transitions.push(transition);
        Ok(())
    }
}

impl TransferDraft {
    /// The comment field is checked and shown for review but never sent.
    fn into_request(self, fee_deadline: FeeDeadline) -> TransferRequest {
        TransferRequest {
            sender: self.sender,
            recipient: self.recipient,
            asset_id: self.asset_id,
            quantity_qnt: self.quantity_qnt,
            comment: String::new(),
            deadline_minutes: fee_deadline.deadline_minutes,
            fee_nqt: fee_deadline.fee_nqt,
            options: TransferOptions::default(),
        }
    }
}

fn account_unavailable(err: PortError) -> VerifyError {
    tracing::warn!(error = %err, "account lookup failed during sender check");
    VerifyError::AccountUnavailable(err.message().to_owned())
}
