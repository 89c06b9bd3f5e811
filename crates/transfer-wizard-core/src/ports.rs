use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::{AccountId, Asset, AssetId, FeeDeadlineChoice, Transaction, TransferRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("transaction error: {0}")]
    Transaction(String),
}

impl PortError {
    /// The collaborator's own message, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            PortError::NotFound(m)
            | PortError::Transport(m)
            | PortError::Validation(m)
            | PortError::Transaction(m) => m,
        }
    }
}

/// Live account and asset state. Every call reads current state; nothing is snapshotted.
pub trait AccountPort {
    fn asset_balances(&self, account: AccountId) -> Result<BTreeMap<AssetId, i64>, PortError>;
    fn asset(&self, asset: AssetId) -> Result<Option<Asset>, PortError>;
    fn unconfirmed_asset_balance(
        &self,
        account: AccountId,
        asset: AssetId,
    ) -> Result<Option<i64>, PortError>;
    fn native_balance(&self, account: AccountId) -> Result<i64, PortError>;
}

pub trait LedgerPort {
    fn build_transfer_transaction(&self, request: &TransferRequest)
        -> Result<Transaction, PortError>;
}

/// Modal fee/deadline dialog. Blocks until the user confirms or cancels.
pub trait FeeDeadlinePort {
    fn open(&self) -> FeeDeadlineChoice;
}
