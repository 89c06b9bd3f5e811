use std::path::PathBuf;

use transfer_wizard_core::config::parse_setting;

pub const ENV_MIN_FEE_NQT: &str = "TRANSFER_WIZARD_MIN_FEE_NQT";
pub const ENV_MAX_DEADLINE_MINUTES: &str = "TRANSFER_WIZARD_MAX_DEADLINE_MINUTES";
pub const ENV_FIXTURE: &str = "TRANSFER_WIZARD_FIXTURE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAdapterConfig {
    pub min_fee_nqt: i64,
    pub max_deadline_minutes: u16,
    pub fixture_path: Option<PathBuf>,
}

impl Default for LedgerAdapterConfig {
    fn default() -> Self {
        Self {
            min_fee_nqt: 1,
            max_deadline_minutes: 1440,
            fixture_path: None,
        }
    }
}

impl LedgerAdapterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            min_fee_nqt: parse_setting(&lookup, ENV_MIN_FEE_NQT, defaults.min_fee_nqt),
            max_deadline_minutes: parse_setting(
                &lookup,
                ENV_MAX_DEADLINE_MINUTES,
                defaults.max_deadline_minutes,
            ),
            fixture_path: lookup(ENV_FIXTURE)
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
                .map(PathBuf::from),
        }
    }
}
