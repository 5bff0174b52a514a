//! WLX wallet API
//!
//! A small HTTP service in front of the Stellar Horizon API. It reports an
//! account's balances, picks out the tracked WLX asset, maps WLX holdings to
//! a reward tier and keeps simple audit records in SQLite.
//!
//! # Architecture
//!
//! Handlers in [`api`] receive an [`api::AppState`] holding a
//! [`wallet::WalletService`] and a [`store::DocumentStore`]. The wallet
//! service reads accounts through the [`horizon::Ledger`] trait, so the
//! Horizon client can be replaced in tests.

pub mod account_id;
pub mod api;
pub mod config;
pub mod horizon;
pub mod records;
pub mod store;
pub mod wallet;

pub use account_id::{is_valid_account_id, parse_account_id, AccountId};
pub use config::Config;
pub use horizon::{HorizonClient, Ledger, LedgerError};
pub use store::DocumentStore;
pub use wallet::{TrackedAsset, WalletService};
