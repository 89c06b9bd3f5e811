use std::sync::{Arc, Mutex, MutexGuard};

use sha2::{Digest, Sha256};

use transfer_wizard_core::{
    LedgerPort, PortError, Transaction, TransactionId, TransferRequest,
    MAX_ASSET_TRANSFER_COMMENT_LENGTH,
};

use crate::accounts::InMemoryAccountAdapter;
use crate::config::LedgerAdapterConfig;

/// Ledger service over an [`InMemoryAccountAdapter`].
///
/// Accepted transfers debit the sender's unconfirmed balances immediately, so
/// a second transfer sees the first one as pending.
#[derive(Debug, Clone)]
pub struct InMemoryLedgerAdapter {
    accounts: InMemoryAccountAdapter,
    config: LedgerAdapterConfig,
    inner: Arc<Mutex<LedgerState>>,
}

#[derive(Debug, Default)]
struct LedgerState {
    sequence: u64,
    transactions: Vec<Transaction>,
    fail_next: Option<PortError>,
}

impl InMemoryLedgerAdapter {
    pub fn new(accounts: InMemoryAccountAdapter, config: LedgerAdapterConfig) -> Self {
        Self {
            accounts,
            config,
            inner: Arc::new(Mutex::new(LedgerState::default())),
        }
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>, PortError> {
        Ok(self.lock()?.transactions.clone())
    }

    /// Makes the next build fail with `err`, e.g. a node that is unreachable.
    pub fn fail_next_with(&self, err: PortError) -> Result<(), PortError> {
        self.lock()?.fail_next = Some(err);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerState>, PortError> {
        self.inner
            .lock()
            .map_err(|e| PortError::Transport(format!("ledger lock poisoned: {e}")))
    }

    fn validate_request(&self, request: &TransferRequest) -> Result<(), PortError> {
        let sender = request.sender.account_id;
        if request.recipient.0 == 0 {
            return Err(PortError::Validation("Invalid recipient".to_owned()));
        }
        if request.recipient == sender {
            return Err(PortError::Validation(
                "Cannot transfer to the sending account".to_owned(),
            ));
        }
        if request.quantity_qnt <= 0 {
            return Err(PortError::Validation("Invalid quantity".to_owned()));
        }
        if request.fee_nqt < self.config.min_fee_nqt {
            return Err(PortError::Validation(format!(
                "Fee below minimum of {} NQT",
                self.config.min_fee_nqt
            )));
        }
        if request.deadline_minutes == 0 || request.deadline_minutes > self.config.max_deadline_minutes {
            return Err(PortError::Validation(format!(
                "Deadline must be between 1 and {} minutes",
                self.config.max_deadline_minutes
            )));
        }
        if request.comment.chars().count() > MAX_ASSET_TRANSFER_COMMENT_LENGTH {
            return Err(PortError::Validation("Comment too long".to_owned()));
        }
        Ok(())
    }
}

impl LedgerPort for InMemoryLedgerAdapter {
    fn build_transfer_transaction(
        &self,
        request: &TransferRequest,
    ) -> Result<Transaction, PortError> {
        let mut ledger = self.lock()?;
        if let Some(err) = ledger.fail_next.take() {
            return Err(err);
        }
        if request.sender.read_only {
            return Err(PortError::Transaction(format!(
                "No signing key for account {}",
                request.sender.account_id
            )));
        }
        self.validate_request(request)?;

        let mut book = self.accounts.lock()?;
        let state = book
            .accounts
            .get_mut(&request.sender.account_id)
            .ok_or_else(|| {
                PortError::Validation(format!(
                    "Unknown sender account {}",
                    request.sender.account_id
                ))
            })?;
        let asset_balance = state
            .unconfirmed_asset_balances
            .get(&request.asset_id)
            .copied()
            .unwrap_or_default();
        if asset_balance < request.quantity_qnt {
            return Err(PortError::Validation("Not enough assets".to_owned()));
        }
        if state.unconfirmed_native_balance_nqt < request.fee_nqt {
            return Err(PortError::Validation("Not enough funds".to_owned()));
        }
        state
            .unconfirmed_asset_balances
            .insert(request.asset_id, asset_balance - request.quantity_qnt);
        state.unconfirmed_native_balance_nqt -= request.fee_nqt;
        drop(book);

        ledger.sequence += 1;
        let mut tx = Transaction {
            id: TransactionId(0),
            sender: request.sender.account_id,
            recipient: request.recipient,
            asset_id: request.asset_id,
            quantity_qnt: request.quantity_qnt,
            comment: request.comment.clone(),
            fee_nqt: request.fee_nqt,
            deadline_minutes: request.deadline_minutes,
        };
        tx.id = transaction_id(ledger.sequence, &tx)?;
        ledger.transactions.push(tx.clone());
        tracing::info!(id = %tx.id, sender = %tx.sender, recipient = %tx.recipient, "transfer accepted");
        Ok(tx)
    }
}

/// First eight bytes, little endian, of the SHA-256 of the sequenced transaction.
fn transaction_id(sequence: u64, tx: &Transaction) -> Result<TransactionId, PortError> {
    let body = serde_json::to_vec(&(sequence, tx))
        .map_err(|e| PortError::Transaction(format!("transaction serialization failed: {e}")))?;
    let digest = Sha256::digest(&body);
    let mut id = [0u8; 8];
    id.copy_from_slice(&digest[..8]);
    Ok(TransactionId(u64::from_le_bytes(id)))
}
