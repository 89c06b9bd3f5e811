use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use transfer_wizard_core::{
    AccountId, AccountPort, Asset, AssetId, FeeDeadlineChoice, FeeDeadlinePort, FieldName,
    LedgerPort, PortError, SubmitError, Transaction, TransferRequest, TransferAssetWizard,
    UserAccount, VerifyError, WizardConfig, ONE_NXT,
};

#[derive(Default)]
struct StubAccounts {
    assets: HashMap<AssetId, Asset>,
    holdings: HashMap<AccountId, BTreeMap<AssetId, i64>>,
}

impl StubAccounts {
    fn with_asset(mut self, id: u64, name: &str, decimals: u8) -> Self {
        self.assets.insert(
            AssetId(id),
            Asset {
                id: AssetId(id),
                name: name.to_owned(),
                decimals,
            },
        );
        self
    }

    fn holding(mut self, account: u64, asset: u64, qnt: i64) -> Self {
        self.holdings
            .entry(AccountId(account))
            .or_default()
            .insert(AssetId(asset), qnt);
        self
    }
}

impl AccountPort for StubAccounts {
    fn asset_balances(&self, account: AccountId) -> Result<BTreeMap<AssetId, i64>, PortError> {
        Ok(self.holdings.get(&account).cloned().unwrap_or_default())
    }

    fn asset(&self, asset: AssetId) -> Result<Option<Asset>, PortError> {
        Ok(self.assets.get(&asset).cloned())
    }

    fn unconfirmed_asset_balance(
        &self,
        account: AccountId,
        asset: AssetId,
    ) -> Result<Option<i64>, PortError> {
        Ok(self
            .holdings
            .get(&account)
            .and_then(|h| h.get(&asset))
            .copied())
    }

    fn native_balance(&self, _account: AccountId) -> Result<i64, PortError> {
        Ok(10 * ONE_NXT)
    }
}

#[derive(Default)]
struct RecordingLedger {
    requests: RefCell<Vec<TransferRequest>>,
}

impl LedgerPort for RecordingLedger {
    fn build_transfer_transaction(
        &self,
        request: &TransferRequest,
    ) -> Result<Transaction, PortError> {
        self.requests.borrow_mut().push(request.clone());
        Err(PortError::Transaction("signing key unavailable".to_owned()))
    }
}

struct CancelPrompt;

impl FeeDeadlinePort for CancelPrompt {
    fn open(&self) -> FeeDeadlineChoice {
        FeeDeadlineChoice::Cancelled
    }
}

fn user(label: &str, id: u64) -> UserAccount {
    UserAccount {
        label: label.to_owned(),
        account_id: AccountId(id),
        read_only: false,
    }
}

fn wizard(
    accounts: StubAccounts,
    initial: Option<usize>,
) -> TransferAssetWizard<StubAccounts, RecordingLedger, CancelPrompt> {
    TransferAssetWizard::new(
        WizardConfig::default(),
        vec![user("alice", 1), user("bob", 2)],
        initial,
        accounts,
        RecordingLedger::default(),
        CancelPrompt,
    )
}

#[test]
fn fields_are_declared_sender_first() {
    let wizard = wizard(StubAccounts::default(), Some(0));
    let names: Vec<FieldName> = wizard.fields().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec![
            FieldName::Sender,
            FieldName::Recipient,
            FieldName::Asset,
            FieldName::Quantity,
            FieldName::Comment,
        ]
    );
    assert_eq!(wizard.page().rows.len(), 5);
}

#[test]
fn edits_trigger_exactly_one_pass_each() {
    let accounts = StubAccounts::default()
        .with_asset(7, "A7", 2)
        .with_asset(9, "B9", 0)
        .holding(1, 7, 10_000)
        .holding(2, 9, 3);
    let wizard = wizard(accounts, Some(0));
    let passes = wizard.cascade().passes();

    let recipient = wizard
        .page()
        .row(FieldName::Recipient)
        .and_then(|row| row.editable.as_text().cloned())
        .expect("recipient input");
    recipient.set_text("12345");
    assert_eq!(wizard.cascade().passes(), passes + 1);

    // Switching sender relists assets inside the pass without re-triggering it.
    let sender = wizard
        .page()
        .row(FieldName::Sender)
        .and_then(|row| row.editable.as_choice().cloned())
        .expect("sender input");
    sender.select(1);
    assert_eq!(wizard.cascade().passes(), passes + 2);
    assert_eq!(wizard.cascade().reentrant_triggers(), 0);

    let asset = wizard
        .page()
        .row(FieldName::Asset)
        .and_then(|row| row.editable.as_choice().cloned())
        .expect("asset input");
    assert_eq!(asset.entries(), vec!["Asset: B9 Balance: 3".to_owned()]);
    assert_eq!(asset.selected_index(), Some(0));
    assert!(!asset.notifier().is_suppressed());
}

#[test]
fn quantity_without_asset_blocks_regardless_of_text() {
    let wizard = wizard(StubAccounts::default(), Some(0));
    let page = wizard.page();
    let recipient = page
        .row(FieldName::Recipient)
        .and_then(|row| row.editable.as_text().cloned())
        .expect("recipient input");
    let quantity = page
        .row(FieldName::Quantity)
        .and_then(|row| row.editable.as_text().cloned())
        .expect("quantity input");
    recipient.set_text("12345");
    for text in ["1", "0", "abc", ""] {
        quantity.set_text(text);
        let outcome = wizard.verify_all();
        assert_eq!(
            outcome.blocking,
            Some((FieldName::Quantity, VerifyError::AssetNotSet)),
            "{text:?}"
        );
        assert!(!outcome.can_submit());
    }
}

#[test]
fn blocked_submit_never_leaves_editing() {
    let mut wizard = wizard(StubAccounts::default(), None);
    let err = wizard.submit().expect_err("no sender selected");
    assert_eq!(err, SubmitError::Blocked(VerifyError::InvalidSender));
    assert!(wizard.transitions().is_empty());
    assert!(wizard.ledger.requests.borrow().is_empty());
}

#[test]
fn cancelled_fee_dialog_aborts_before_the_ledger() {
    let accounts = StubAccounts::default()
        .with_asset(7, "A7", 2)
        .holding(1, 7, 10_000);
    let mut wizard = wizard(accounts, Some(0));
    let page = wizard.page().clone();
    page.row(FieldName::Recipient)
        .and_then(|row| row.editable.as_text().cloned())
        .expect("recipient input")
        .set_text("12345");
    page.row(FieldName::Quantity)
        .and_then(|row| row.editable.as_text().cloned())
        .expect("quantity input")
        .set_text("1");

    let err = wizard.submit().expect_err("prompt cancels");
    assert_eq!(err, SubmitError::InvalidFeeOrDeadline);
    assert_eq!(err.to_string(), "Invalid fee and deadline");
    assert_eq!(wizard.state(), transfer_wizard_core::SubmitState::Editing);
    assert!(wizard.ledger.requests.borrow().is_empty());
}

#[test]
fn assets_with_unsupported_precision_are_left_out() {
    let accounts = StubAccounts::default()
        .with_asset(7, "A7", 2)
        .with_asset(13, "WIDE", 40)
        .holding(1, 7, 10_000)
        .holding(1, 13, 5);
    let wizard = wizard(accounts, Some(0));
    let asset = wizard
        .page()
        .row(FieldName::Asset)
        .and_then(|row| row.editable.as_choice().cloned())
        .expect("asset input");
    assert_eq!(asset.entries(), vec!["Asset: A7 Balance: 100.00".to_owned()]);
    assert_eq!(asset.selected_index(), Some(0));
}
