pub mod accounts;
pub mod config;
pub mod ledger;
pub mod prompt;

pub use accounts::{AccountFixture, AccountState, FixtureAccount, FixtureHolding, InMemoryAccountAdapter};
pub use config::LedgerAdapterConfig;
pub use ledger::InMemoryLedgerAdapter;
pub use prompt::ScriptedFeeDeadlinePrompt;
