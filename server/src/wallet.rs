//! Wallet views built from ledger balances.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use wlx_tier::{tier_for_str, CONTACT_SUPPORT};

use crate::{
    account_id::AccountId,
    horizon::{Ledger, LedgerBalance, LedgerError},
};

/// Code reported for native (lumen) balances.
pub const NATIVE_ASSET_CODE: &str = "XLM";

/// The custom asset whose balance drives the tier lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedAsset {
    pub code: String,
    pub issuer: AccountId,
}

impl TrackedAsset {
    pub fn new(code: impl Into<String>, issuer: AccountId) -> Self {
        Self {
            code: code.into(),
            issuer,
        }
    }

    /// Code and issuer must both match.
    pub fn matches(&self, balance: &LedgerBalance) -> bool {
        balance.asset_code.as_deref() == Some(self.code.as_str())
            && balance.asset_issuer.as_deref() == Some(self.issuer.as_str())
    }
}

/// A balance line in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub asset_code: String,
    pub asset_issuer: Option<String>,
    pub balance: String,
    pub asset_type: String,
    pub limit: Option<String>,
}

impl From<&LedgerBalance> for AssetBalance {
    fn from(balance: &LedgerBalance) -> Self {
        Self {
            asset_code: balance
                .asset_code
                .clone()
                .unwrap_or_else(|| NATIVE_ASSET_CODE.to_string()),
            asset_issuer: balance.asset_issuer.clone(),
            balance: balance.balance.clone(),
            asset_type: balance.asset_type.clone(),
            limit: balance.limit.clone(),
        }
    }
}

/// Full balance view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletBalance {
    pub account_id: String,
    pub native_balance: String,
    pub wlx_balance: Option<String>,
    pub has_wlx: bool,
    pub all_balances: Vec<AssetBalance>,
    pub timestamp: DateTime<Utc>,
}

/// Tracked-asset holding and the tier it qualifies for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletTier {
    pub account_id: String,
    pub wlx_balance: Option<String>,
    pub has_wlx: bool,
    pub tier: String,
    pub timestamp: DateTime<Utc>,
}

/// Looks up accounts on the ledger and shapes them for the API.
pub struct WalletService {
    ledger: Arc<dyn Ledger>,
    tracked: TrackedAsset,
}

impl WalletService {
    pub fn new(ledger: Arc<dyn Ledger>, tracked: TrackedAsset) -> Self {
        Self { ledger, tracked }
    }

    pub fn tracked_asset(&self) -> &TrackedAsset {
        &self.tracked
    }

    /// Fetch every balance of `account_id`, picking out native and tracked.
    pub async fn balances(&self, account_id: &AccountId) -> Result<WalletBalance, LedgerError> {
        info!("Fetching balances for account: {}", account_id);
        let account = self.ledger.get_account(account_id).await?;

        let mut native_balance = "0".to_string();
        let mut wlx_balance = None;

        for balance in &account.balances {
            if balance.is_native() {
                native_balance = balance.balance.clone();
            }
            if self.tracked.matches(balance) {
                info!("Found {} balance: {}", self.tracked.code, balance.balance);
                wlx_balance = Some(balance.balance.clone());
            }
        }

        Ok(WalletBalance {
            account_id: account.account_id,
            native_balance,
            has_wlx: wlx_balance.is_some(),
            wlx_balance,
            all_balances: account.balances.iter().map(AssetBalance::from).collect(),
            timestamp: Utc::now(),
        })
    }

    /// Fetch the tracked balance and map it to a reward tier.
    pub async fn tier(&self, account_id: &AccountId) -> Result<WalletTier, LedgerError> {
        let balances = self.balances(account_id).await?;
        let tier = match balances.wlx_balance.as_deref() {
            Some(amount) => tier_for_str(amount),
            None => CONTACT_SUPPORT,
        };

        Ok(WalletTier {
            account_id: balances.account_id,
            wlx_balance: balances.wlx_balance,
            has_wlx: balances.has_wlx,
            tier: tier.to_string(),
            timestamp: balances.timestamp,
        })
    }
}
