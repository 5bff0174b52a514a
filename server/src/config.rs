//! Server configuration.
//!
//! Every setting can be given as a flag or through the environment variable
//! named next to it.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;

use crate::{
    account_id::{parse_account_id, AccountId},
    wallet::TrackedAsset,
};

/// Passphrase of the Stellar public network.
pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the Stellar test network.
pub const TEST_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Longest asset code Stellar allows (alphanum12).
const MAX_ASSET_CODE_LEN: usize = 12;

/// WLX wallet API server
#[derive(Parser, Debug, Clone)]
#[command(name = "wlx-server", author, version, about)]
pub struct Config {
    /// Address to serve the HTTP API on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8001")]
    pub listen: SocketAddr,

    /// Horizon server URL
    #[arg(long, env = "STELLAR_RPC_URL", default_value = "https://horizon.stellar.org")]
    pub horizon_url: String,

    /// Network passphrase of the ledger behind the Horizon server
    #[arg(long, env = "NETWORK_PASSPHRASE", default_value = PUBLIC_NETWORK_PASSPHRASE)]
    pub network_passphrase: String,

    /// Code of the tracked asset
    #[arg(long, env = "ASSET_CODE", default_value = "WLX")]
    pub asset_code: String,

    /// Issuing account of the tracked asset
    #[arg(long, env = "ASSET_ISSUER")]
    pub asset_issuer: String,

    /// SQLite database file; records are kept in memory when unset
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<PathBuf>,

    /// Allowed CORS origins, comma separated ("*" allows any)
    #[arg(long, env = "CORS_ORIGINS", default_value = "*", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Timeout for Horizon requests in seconds
    #[arg(long, env = "HORIZON_TIMEOUT_SECS", default_value = "10")]
    pub request_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Which Stellar network a passphrase belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Custom,
}

impl Network {
    pub fn from_passphrase(passphrase: &str) -> Self {
        match passphrase {
            PUBLIC_NETWORK_PASSPHRASE => Network::Mainnet,
            TEST_NETWORK_PASSPHRASE => Network::Testnet,
            _ => Network::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Custom => "custom",
        }
    }
}

/// Load `KEY=value` lines into the process environment before parsing.
///
/// Reads `path` when given, otherwise the first `.env` found in the working
/// directory or its parents. Variables already set in the environment win.
/// Returns the file that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|_| path.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

impl Config {
    /// Check settings that clap cannot.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.issuer()?;

        let code = self.asset_code.trim();
        if code.is_empty() || code.len() > MAX_ASSET_CODE_LEN {
            anyhow::bail!(
                "ASSET_CODE must be 1 to {} characters, got {:?}",
                MAX_ASSET_CODE_LEN,
                self.asset_code
            );
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            anyhow::bail!("ASSET_CODE must be alphanumeric, got {:?}", self.asset_code);
        }

        if self.origins().is_empty() {
            anyhow::bail!("At least one CORS origin must be specified");
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("HORIZON_TIMEOUT_SECS must be greater than zero");
        }

        Ok(())
    }

    /// The tracked asset issuer, validated.
    pub fn issuer(&self) -> anyhow::Result<AccountId> {
        parse_account_id(self.asset_issuer.trim()).map_err(|e| {
            anyhow::anyhow!(
                "ASSET_ISSUER must be a valid Stellar public key (G...): {}",
                e
            )
        })
    }

    pub fn tracked_asset(&self) -> anyhow::Result<TrackedAsset> {
        Ok(TrackedAsset::new(self.asset_code.trim(), self.issuer()?))
    }

    /// Non-empty, trimmed CORS origins.
    pub fn origins(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }

    pub fn network(&self) -> Network {
        Network::from_passphrase(&self.network_passphrase)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
