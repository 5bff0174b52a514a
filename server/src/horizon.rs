//! Ledger access through the Stellar Horizon REST API.

use std::time::Duration;

use async_trait::async_trait;
use displaydoc::Display;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::account_id::AccountId;

/// Failures reported by a [`Ledger`].
#[derive(Debug, Display, Error)]
pub enum LedgerError {
    /// Account {0} not found
    NotFound(AccountId),

    /// Ledger unreachable: {0}
    Unreachable(String),

    /// Unexpected ledger response: {0}
    Unexpected(String),
}

/// One balance line of an account, as Horizon reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBalance {
    pub balance: String,
    pub asset_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl LedgerBalance {
    pub fn is_native(&self) -> bool {
        self.asset_type == "native"
    }
}

/// The subset of a Horizon account record this service uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccount {
    pub account_id: String,
    #[serde(default)]
    pub balances: Vec<LedgerBalance>,
}

/// Read access to ledger accounts.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Fetch an account and its balances.
    async fn get_account(&self, account_id: &AccountId) -> Result<LedgerAccount, LedgerError>;
}

/// [`Ledger`] backed by a Horizon server.
#[derive(Debug, Clone)]
pub struct HorizonClient {
    client: Client,
    base_url: String,
}

impl HorizonClient {
    /// Create a client for the Horizon server at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Unexpected(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn account_url(&self, account_id: &AccountId) -> String {
        format!("{}/accounts/{}", self.base_url, account_id)
    }
}

fn classify_transport_error(err: reqwest::Error) -> LedgerError {
    if err.is_connect() || err.is_timeout() {
        LedgerError::Unreachable(err.to_string())
    } else {
        LedgerError::Unexpected(err.to_string())
    }
}

#[async_trait]
impl Ledger for HorizonClient {
    async fn get_account(&self, account_id: &AccountId) -> Result<LedgerAccount, LedgerError> {
        let url = self.account_url(account_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify_transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(LedgerError::NotFound(account_id.clone())),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                warn!("Horizon returned {} for {}", status, account_id);
                return Err(LedgerError::Unexpected(format!(
                    "Horizon returned status {}: {}",
                    status,
                    body.chars().take(200).collect::<String>()
                )));
            }
            _ => {}
        }

        response.json::<LedgerAccount>().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                classify_transport_error(e)
            } else {
                LedgerError::Unexpected(format!("failed to decode account: {}", e))
            }
        })
    }
}
