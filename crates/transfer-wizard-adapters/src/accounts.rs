use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use transfer_wizard_core::{
    AccountId, AccountPort, Asset, AssetId, PortError, UserAccount, MAX_ASSET_DECIMALS,
};

/// Seed data: assets, account balances and the users offered as senders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountFixture {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub accounts: Vec<FixtureAccount>,
    #[serde(default)]
    pub users: Vec<UserAccount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureAccount {
    pub id: AccountId,
    pub native_balance_nqt: i64,
    #[serde(default)]
    pub holdings: Vec<FixtureHolding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureHolding {
    pub asset: AssetId,
    pub quantity_qnt: i64,
    /// Defaults to the confirmed quantity.
    #[serde(default)]
    pub unconfirmed_qnt: Option<i64>,
}

impl AccountFixture {
    pub fn from_json(json: &str) -> Result<Self, PortError> {
        serde_json::from_str(json)
            .map_err(|e| PortError::Validation(format!("invalid account fixture: {e}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountState {
    pub native_balance_nqt: i64,
    pub unconfirmed_native_balance_nqt: i64,
    pub asset_balances: BTreeMap<AssetId, i64>,
    pub unconfirmed_asset_balances: BTreeMap<AssetId, i64>,
}

#[derive(Debug, Default)]
pub(crate) struct AccountBook {
    pub(crate) assets: HashMap<AssetId, Asset>,
    pub(crate) accounts: HashMap<AccountId, AccountState>,
}

/// Live, shared account book. Clones see the same balances.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountAdapter {
    inner: Arc<Mutex<AccountBook>>,
}

impl InMemoryAccountAdapter {
    pub fn from_fixture(fixture: &AccountFixture) -> Result<Self, PortError> {
        let adapter = Self::default();
        for asset in &fixture.assets {
            adapter.insert_asset(asset.clone())?;
        }
        for account in &fixture.accounts {
            adapter.set_native_balance(account.id, account.native_balance_nqt)?;
            for holding in &account.holdings {
                if !adapter.lock()?.assets.contains_key(&holding.asset) {
                    return Err(PortError::Validation(format!(
                        "account {} holds unknown asset {}",
                        account.id, holding.asset
                    )));
                }
                adapter.set_asset_balance(account.id, holding.asset, holding.quantity_qnt)?;
                if let Some(unconfirmed) = holding.unconfirmed_qnt {
                    adapter.set_unconfirmed_asset_balance(account.id, holding.asset, unconfirmed)?;
                }
            }
        }
        Ok(adapter)
    }

    pub fn insert_asset(&self, asset: Asset) -> Result<(), PortError> {
        if asset.decimals > MAX_ASSET_DECIMALS {
            return Err(PortError::Validation(format!(
                "asset {} has {} decimals, at most {MAX_ASSET_DECIMALS} allowed",
                asset.id, asset.decimals
            )));
        }
        self.lock()?.assets.insert(asset.id, asset);
        Ok(())
    }

    pub fn set_native_balance(&self, account: AccountId, nqt: i64) -> Result<(), PortError> {
        let mut g = self.lock()?;
        let state = g.accounts.entry(account).or_default();
        state.native_balance_nqt = nqt;
        state.unconfirmed_native_balance_nqt = nqt;
        Ok(())
    }

    /// Sets the confirmed and unconfirmed balance of one holding.
    pub fn set_asset_balance(
        &self,
        account: AccountId,
        asset: AssetId,
        qnt: i64,
    ) -> Result<(), PortError> {
        let mut g = self.lock()?;
        let state = g.accounts.entry(account).or_default();
        state.asset_balances.insert(asset, qnt);
        state.unconfirmed_asset_balances.insert(asset, qnt);
        Ok(())
    }

    /// Moves only the unconfirmed balance, as a pending transaction would.
    pub fn set_unconfirmed_asset_balance(
        &self,
        account: AccountId,
        asset: AssetId,
        qnt: i64,
    ) -> Result<(), PortError> {
        let mut g = self.lock()?;
        g.accounts
            .entry(account)
            .or_default()
            .unconfirmed_asset_balances
            .insert(asset, qnt);
        Ok(())
    }

    pub fn account(&self, account: AccountId) -> Result<Option<AccountState>, PortError> {
        Ok(self.lock()?.accounts.get(&account).cloned())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, AccountBook>, PortError> {
        self.inner
            .lock()
            .map_err(|e| PortError::Transport(format!("account book lock poisoned: {e}")))
    }
}

impl AccountPort for InMemoryAccountAdapter {
    fn asset_balances(&self, account: AccountId) -> Result<BTreeMap<AssetId, i64>, PortError> {
        Ok(self
            .lock()?
            .accounts
            .get(&account)
            .map(|state| state.asset_balances.clone())
            .unwrap_or_default())
    }

    fn asset(&self, asset: AssetId) -> Result<Option<Asset>, PortError> {
        Ok(self.lock()?.assets.get(&asset).cloned())
    }

    fn unconfirmed_asset_balance(
        &self,
        account: AccountId,
        asset: AssetId,
    ) -> Result<Option<i64>, PortError> {
        Ok(self
            .lock()?
            .accounts
            .get(&account)
            .and_then(|state| state.unconfirmed_asset_balances.get(&asset))
            .copied())
    }

    fn native_balance(&self, account: AccountId) -> Result<i64, PortError> {
        Ok(self
            .lock()?
            .accounts
            .get(&account)
            .map(|state| state.native_balance_nqt)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use transfer_wizard_core::{AccountId, AccountPort, AssetId};

    use super::{AccountFixture, InMemoryAccountAdapter};

    const FIXTURE: &str = r#"{
        "assets": [{"id": 7, "name": "A7", "decimals": 2}],
        "accounts": [
            {"id": 1, "native_balance_nqt": 500000000,
             "holdings": [{"asset": 7, "quantity_qnt": 10000, "unconfirmed_qnt": 9000}]}
        ],
        "users": [{"label": "alice", "account_id": 1}]
    }"#;

    #[test]
    fn fixture_seeds_confirmed_and_unconfirmed_balances() {
        let fixture = AccountFixture::from_json(FIXTURE).expect("parse fixture");
        let accounts = InMemoryAccountAdapter::from_fixture(&fixture).expect("seed accounts");
        let balances = accounts.asset_balances(AccountId(1)).expect("balances");
        assert_eq!(balances.get(&AssetId(7)), Some(&10_000));
        assert_eq!(
            accounts
                .unconfirmed_asset_balance(AccountId(1), AssetId(7))
                .expect("unconfirmed"),
            Some(9_000)
        );
        assert_eq!(accounts.native_balance(AccountId(1)).expect("native"), 500_000_000);
        assert_eq!(fixture.users.len(), 1);
    }

    #[test]
    fn unknown_accounts_hold_nothing() {
        let accounts = InMemoryAccountAdapter::default();
        assert!(accounts
            .asset_balances(AccountId(99))
            .expect("balances")
            .is_empty());
        assert_eq!(
            accounts
                .unconfirmed_asset_balance(AccountId(99), AssetId(7))
                .expect("unconfirmed"),
            None
        );
        assert_eq!(accounts.native_balance(AccountId(99)).expect("native"), 0);
    }

    #[test]
    fn fixture_rejects_unknown_assets_and_bad_precision() {
        let fixture = AccountFixture::from_json(
            r#"{"accounts": [{"id": 1, "native_balance_nqt": 0,
                "holdings": [{"asset": 3, "quantity_qnt": 1}]}]}"#,
        )
        .expect("parse fixture");
        let err = InMemoryAccountAdapter::from_fixture(&fixture).expect_err("unknown asset");
        assert!(err.to_string().contains("unknown asset 3"));

        let fixture =
            AccountFixture::from_json(r#"{"assets": [{"id": 3, "name": "X", "decimals": 9}]}"#)
                .expect("parse fixture");
        InMemoryAccountAdapter::from_fixture(&fixture).expect_err("too many decimals");
    }
}
