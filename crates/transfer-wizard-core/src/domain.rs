use std::fmt;

use serde::{Deserialize, Serialize};

/// Native currency minor units per whole coin.
pub const ONE_NXT: i64 = 100_000_000;
pub const MAX_ASSET_TRANSFER_COMMENT_LENGTH: usize = 1000;
pub const MAX_ASSET_DECIMALS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user the shell offers as sender. Read-only accounts are watched, never signed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub label: String,
    pub account_id: AccountId,
    #[serde(default)]
    pub read_only: bool,
}

impl UserAccount {
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.label, self.account_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub decimals: u8,
}

/// Value carried by a form field once its control content resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Id(u64),
    Account(UserAccount),
    Asset(Asset),
    Quantity(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_id(&self) -> Option<u64> {
        match self {
            FieldValue::Id(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_account(&self) -> Option<&UserAccount> {
        match self {
            FieldValue::Account(user) => Some(user),
            _ => None,
        }
    }

    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            FieldValue::Asset(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> Option<i64> {
        match self {
            FieldValue::Quantity(qnt) => Some(*qnt),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_account(self) -> Option<UserAccount> {
        match self {
            FieldValue::Account(user) => Some(user),
            _ => None,
        }
    }

    pub fn into_asset(self) -> Option<Asset> {
        match self {
            FieldValue::Asset(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDeadline {
    pub fee_nqt: i64,
    pub deadline_minutes: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeDeadlineChoice {
    Confirmed(FeeDeadline),
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOptions {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: UserAccount,
    pub recipient: AccountId,
    pub asset_id: AssetId,
    pub quantity_qnt: i64,
    pub comment: String,
    pub deadline_minutes: u16,
    pub fee_nqt: i64,
    pub options: TransferOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub sender: AccountId,
    pub recipient: AccountId,
    pub asset_id: AssetId,
    pub quantity_qnt: i64,
    pub comment: String,
    pub fee_nqt: i64,
    pub deadline_minutes: u16,
}

impl Transaction {
    pub fn string_id(&self) -> String {
        self.id.to_string()
    }
}
