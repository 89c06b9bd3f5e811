use thiserror::Error;

use crate::state_machine::TransitionError;

/// One-line reason a field or the sender check blocks submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("Missing recipient")]
    MissingRecipient,
    #[error("Incorrect recipient")]
    InvalidRecipient,
    #[error("Must set asset first")]
    AssetNotSet,
    #[error("Incorrect quantity")]
    InvalidQuantity,
    #[error("Incorrect comment")]
    CommentTooLong { max: usize },
    #[error("Invalid sender")]
    InvalidSender,
    #[error("This is a readonly account")]
    ReadOnlyAccount,
    #[error("Insufficient Asset Balance")]
    InsufficientAssetBalance,
    #[error("Insufficient Balance")]
    InsufficientNativeBalance,
    #[error("Account lookup failed: {0}")]
    AccountUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Blocked(#[from] VerifyError),
    #[error("Invalid fee and deadline")]
    InvalidFeeOrDeadline,
    #[error("{message}")]
    Service { message: String },
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
