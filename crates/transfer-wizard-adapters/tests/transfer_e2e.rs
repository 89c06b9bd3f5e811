mod common;

use transfer_wizard_adapters::ScriptedFeeDeadlinePrompt;
use transfer_wizard_core::{
    AccountId, AssetId, FeeDeadline, FeeDeadlineChoice, FieldName, SubmitAction, SubmitError,
    SubmitState, TransitionError, VerifyError, ONE_NXT,
};

use common::{harness, ALICE, A7};

#[test]
fn transfer_of_a_fractional_quantity_reaches_the_ledger() {
    let h = harness(0, ScriptedFeeDeadlinePrompt::confirming(100_000, 1440));
    h.fill("12345", "25.50", "test");
    assert!(h.wizard.verify_all().can_submit());
    assert_eq!(h.mirror(FieldName::Comment), "test");

    let mut wizard = h.wizard;
    let id = wizard.submit().expect("transfer accepted");

    let txs = h.ledger.transactions().expect("transactions");
    assert_eq!(txs.len(), 1);
    let tx = &txs[0];
    assert_eq!(tx.string_id(), id);
    assert_eq!(tx.sender, AccountId(ALICE));
    assert_eq!(tx.recipient, AccountId(12345));
    assert_eq!(tx.asset_id, AssetId(A7));
    assert_eq!(tx.quantity_qnt, 2550);
    // The comment is reviewed on screen only; the ledger gets an empty one.
    assert_eq!(tx.comment, "");
    assert_eq!(tx.fee_nqt, 100_000);
    assert_eq!(tx.deadline_minutes, 1440);
    assert_eq!(h.prompt.opened(), 1);
    assert_eq!(wizard.state(), SubmitState::Succeeded);

    let alice = h
        .accounts
        .account(AccountId(ALICE))
        .expect("account book")
        .expect("alice exists");
    assert_eq!(alice.asset_balances.get(&AssetId(A7)), Some(&10_000));
    assert_eq!(alice.unconfirmed_asset_balances.get(&AssetId(A7)), Some(&7_450));
    assert_eq!(alice.unconfirmed_native_balance_nqt, 500_000_000 - 100_000);
}

#[test]
fn mirrors_show_the_verified_values_for_review() {
    let h = harness(0, ScriptedFeeDeadlinePrompt::default());
    h.fill("  12345 ", "25.50", "test");
    assert!(h.wizard.verify_all().can_submit());

    assert_eq!(h.mirror(FieldName::Sender), "alice (1001)");
    assert_eq!(h.mirror(FieldName::Recipient), "12345");
    assert_eq!(h.mirror(FieldName::Asset), "Asset: A7 Balance: 100.00");
    assert_eq!(h.mirror(FieldName::Quantity), "25.50");
    assert_eq!(h.mirror(FieldName::Comment), "test");
}

#[test]
fn quantity_above_balance_fails_before_the_fee_dialog() {
    let h = harness(0, ScriptedFeeDeadlinePrompt::confirming(100_000, 1440));
    h.fill("12345", "150.00", "test");

    let mut wizard = h.wizard;
    let err = wizard.submit().expect_err("balance is 100.00");
    assert_eq!(err, SubmitError::Blocked(VerifyError::InsufficientAssetBalance));
    assert_eq!(err.to_string(), "Insufficient Asset Balance");
    assert_eq!(h.prompt.opened(), 0);
    assert!(h.ledger.transactions().expect("transactions").is_empty());
    assert_eq!(wizard.state(), SubmitState::Editing);
}

#[test]
fn sender_check_reads_live_balances_at_submit_time() {
    let h = harness(0, ScriptedFeeDeadlinePrompt::confirming(100_000, 1440));
    h.fill("12345", "25.50", "");
    assert!(h.wizard.verify_all().can_submit());

    // A pending transfer elsewhere drains the unconfirmed balance.
    h.accounts
        .set_unconfirmed_asset_balance(AccountId(ALICE), AssetId(A7), 2_000)
        .expect("update balance");

    let mut wizard = h.wizard;
    let err = wizard.submit().expect_err("stale balance");
    assert_eq!(err, SubmitError::Blocked(VerifyError::InsufficientAssetBalance));
    assert_eq!(h.prompt.opened(), 0);

    h.accounts
        .set_unconfirmed_asset_balance(AccountId(ALICE), AssetId(A7), 2_550)
        .expect("restore balance");
    wizard.submit().expect("exact balance is enough");
}

#[test]
fn cancelling_the_fee_dialog_returns_to_editing() {
    let h = harness(0, ScriptedFeeDeadlinePrompt::cancelling());
    h.fill("12345", "1", "");

    let mut wizard = h.wizard;
    let err = wizard.submit().expect_err("dialog cancelled");
    assert_eq!(err, SubmitError::InvalidFeeOrDeadline);
    assert_eq!(wizard.state(), SubmitState::Editing);
    assert!(h.ledger.transactions().expect("transactions").is_empty());

    h.prompt.push(FeeDeadlineChoice::Confirmed(FeeDeadline {
        fee_nqt: ONE_NXT,
        deadline_minutes: 60,
    }));
    wizard.submit().expect("second attempt confirmed");
    assert_eq!(h.prompt.opened(), 2);
}

#[test]
fn submitting_twice_after_success_is_rejected() {
    let h = harness(0, ScriptedFeeDeadlinePrompt::confirming(100_000, 1440));
    h.fill("12345", "1", "");

    let mut wizard = h.wizard;
    wizard.submit().expect("first submit");
    let err = wizard.submit().expect_err("already submitted");
    assert_eq!(
        err,
        SubmitError::Transition(TransitionError {
            from: SubmitState::Succeeded,
            action: SubmitAction::RequestSubmit,
        })
    );
    assert_eq!(h.ledger.transactions().expect("transactions").len(), 1);
}

#[test]
fn every_submit_walks_the_expected_states() {
    let h = harness(0, ScriptedFeeDeadlinePrompt::confirming(100_000, 1440));
    h.fill("12345", "1", "");

    let mut wizard = h.wizard;
    wizard.submit().expect("submit");
    let path: Vec<SubmitState> = wizard.transitions().iter().map(|t| t.to).collect();
    assert_eq!(
        path,
        vec![
            SubmitState::SenderChecking,
            SubmitState::AwaitingFeeDeadline,
            SubmitState::Submitting,
            SubmitState::Succeeded,
        ]
    );
}
