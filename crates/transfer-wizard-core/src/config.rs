use crate::domain::{MAX_ASSET_TRANSFER_COMMENT_LENGTH, ONE_NXT};

pub const ENV_MAX_COMMENT_LENGTH: &str = "TRANSFER_WIZARD_MAX_COMMENT_LENGTH";
pub const ENV_MIN_NATIVE_BALANCE_NQT: &str = "TRANSFER_WIZARD_MIN_NATIVE_BALANCE_NQT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    pub max_comment_length: usize,
    /// Native balance a sender must hold to pay the minimum fee.
    pub min_native_balance_nqt: i64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_comment_length: MAX_ASSET_TRANSFER_COMMENT_LENGTH,
            min_native_balance_nqt: ONE_NXT,
        }
    }
}

impl WizardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_comment_length: parse_setting(
                &lookup,
                ENV_MAX_COMMENT_LENGTH,
                defaults.max_comment_length,
            ),
            min_native_balance_nqt: parse_setting(
                &lookup,
                ENV_MIN_NATIVE_BALANCE_NQT,
                defaults.min_native_balance_nqt,
            ),
        }
    }
}

pub fn parse_setting<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, raw = %raw, fallback = %default, "ignoring unparsable setting");
                default
            }
        },
        None => default,
    }
}
