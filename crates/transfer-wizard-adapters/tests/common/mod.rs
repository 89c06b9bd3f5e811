#![allow(dead_code)]

use transfer_wizard_adapters::{
    AccountFixture, InMemoryAccountAdapter, InMemoryLedgerAdapter, LedgerAdapterConfig,
    ScriptedFeeDeadlinePrompt,
};
use transfer_wizard_core::{
    FieldName, TransferAssetWizard, WizardConfig,
};

pub const ALICE: u64 = 1001;
pub const BOB: u64 = 1002;
pub const WATCHER: u64 = 1003;
pub const CAROL: u64 = 1004;
pub const A7: u64 = 7;
pub const B9: u64 = 9;

pub const FIXTURE: &str = r#"{
    "assets": [
        {"id": 7, "name": "A7", "decimals": 2},
        {"id": 9, "name": "B9", "decimals": 0}
    ],
    "accounts": [
        {"id": 1001, "native_balance_nqt": 500000000,
         "holdings": [{"asset": 7, "quantity_qnt": 10000}]},
        {"id": 1002, "native_balance_nqt": 500000000,
         "holdings": [{"asset": 9, "quantity_qnt": 3}]},
        {"id": 1003, "native_balance_nqt": 500000000,
         "holdings": [{"asset": 7, "quantity_qnt": 50}]},
        {"id": 1004, "native_balance_nqt": 500000000}
    ],
    "users": [
        {"label": "alice", "account_id": 1001},
        {"label": "bob", "account_id": 1002},
        {"label": "watcher", "account_id": 1003, "read_only": true},
        {"label": "carol", "account_id": 1004}
    ]
}"#;

pub type TestWizard =
    TransferAssetWizard<InMemoryAccountAdapter, InMemoryLedgerAdapter, ScriptedFeeDeadlinePrompt>;

pub struct Harness {
    pub accounts: InMemoryAccountAdapter,
    pub ledger: InMemoryLedgerAdapter,
    pub prompt: ScriptedFeeDeadlinePrompt,
    pub wizard: TestWizard,
}

pub fn harness(sender: usize, prompt: ScriptedFeeDeadlinePrompt) -> Harness {
    harness_with(WizardConfig::default(), sender, prompt)
}

pub fn harness_with(
    config: WizardConfig,
    sender: usize,
    prompt: ScriptedFeeDeadlinePrompt,
) -> Harness {
    let fixture = AccountFixture::from_json(FIXTURE).expect("parse fixture");
    let accounts = InMemoryAccountAdapter::from_fixture(&fixture).expect("seed accounts");
    let ledger = InMemoryLedgerAdapter::new(accounts.clone(), LedgerAdapterConfig::default());
    let wizard = TransferAssetWizard::new(
        config,
        fixture.users,
        Some(sender),
        accounts.clone(),
        ledger.clone(),
        prompt.clone(),
    );
    Harness {
        accounts,
        ledger,
        prompt,
        wizard,
    }
}

impl Harness {
    pub fn type_into(&self, field: FieldName, text: &str) {
        self.wizard
            .page()
            .row(field)
            .and_then(|row| row.editable.as_text().cloned())
            .unwrap_or_else(|| panic!("{field} has a text input"))
            .set_text(text);
    }

    pub fn select(&self, field: FieldName, index: usize) {
        self.wizard
            .page()
            .row(field)
            .and_then(|row| row.editable.as_choice().cloned())
            .unwrap_or_else(|| panic!("{field} has a choice input"))
            .select(index);
    }

    pub fn choices(&self, field: FieldName) -> Vec<String> {
        self.wizard
            .page()
            .row(field)
            .and_then(|row| row.editable.as_choice().cloned())
            .unwrap_or_else(|| panic!("{field} has a choice input"))
            .entries()
    }

    pub fn selected(&self, field: FieldName) -> Option<usize> {
        self.wizard
            .page()
            .row(field)
            .and_then(|row| row.editable.as_choice().cloned())
            .unwrap_or_else(|| panic!("{field} has a choice input"))
            .selected_index()
    }

    pub fn mirror(&self, field: FieldName) -> String {
        self.wizard
            .page()
            .row(field)
            .and_then(|row| row.readonly.as_readonly().cloned())
            .unwrap_or_else(|| panic!("{field} has a mirror"))
            .text()
    }

    pub fn fill(&self, recipient: &str, quantity: &str, comment: &str) {
        self.type_into(FieldName::Recipient, recipient);
        self.type_into(FieldName::Quantity, quantity);
        self.type_into(FieldName::Comment, comment);
    }
}
