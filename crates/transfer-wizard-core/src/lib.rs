pub mod amount;
pub mod cascade;
pub mod config;
pub mod controls;
pub mod domain;
pub mod error;
pub mod fields;
pub mod ports;
pub mod registry;
pub mod state_machine;
pub mod wizard;

pub use amount::{format_quantity_qnt, parse_quantity_qnt, AmountError};
pub use cascade::{Cascade, CascadeOutcome};
pub use config::WizardConfig;
pub use controls::{
    ChangeListener, ChangeNotifier, ChoiceInput, ControlHandle, ControlParent, ReadonlyText,
    SuppressGuard, TextInput,
};
pub use domain::{
    AccountId, Asset, AssetId, FeeDeadline, FeeDeadlineChoice, FieldValue, Transaction,
    TransactionId, TransferOptions, TransferRequest, UserAccount, MAX_ASSET_DECIMALS,
    MAX_ASSET_TRANSFER_COMMENT_LENGTH, ONE_NXT,
};
pub use error::{SubmitError, VerifyError};
pub use fields::{
    asset_label, AssetField, CommentField, ContextRef, Field, FieldHandle, FieldName, QuantityField,
    RecipientField, SenderField,
};
pub use ports::{AccountPort, FeeDeadlinePort, LedgerPort, PortError};
pub use registry::{FieldRegistry, FormContext};
pub use state_machine::{
    submit_transition, StateTransition, SubmitAction, SubmitState, TransitionError,
};
pub use wizard::{FieldRow, FormPage, TransferAssetWizard};
