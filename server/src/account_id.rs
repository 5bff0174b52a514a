//! Stellar account identifiers.
//!
//! An account id is the strkey encoding of an ed25519 public key: one version
//! byte, the 32 key bytes and a CRC16-XModem checksum (little-endian), all
//! base32 encoded without padding. That makes 56 characters, always starting
//! with `G`.

use std::{fmt, str::FromStr};

use crc::{Crc, CRC_16_XMODEM};
use data_encoding::BASE32_NOPAD;
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Encoded length of an account id.
pub const ACCOUNT_ID_LEN: usize = 56;

/// Strkey version byte for ed25519 public keys (`G...`).
const VERSION_ACCOUNT_ID: u8 = 6 << 3;

/// Version byte + 32 key bytes + 2 checksum bytes.
const DECODED_LEN: usize = 35;

const CHECKSUM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Reasons an account id fails to parse.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    /// Account id must be 56 characters, got {0}
    Length(usize),

    /// Account id must start with 'G'
    Prefix,

    /// Account id is not valid base32
    Encoding,

    /// Account id has version byte {0}, expected an ed25519 public key
    Version(u8),

    /// Account id checksum mismatch
    Checksum,
}

/// A validated Stellar account id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_account_id(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_account_id(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

/// Parse and fully validate an account id.
pub fn parse_account_id(s: &str) -> Result<AccountId, AccountIdError> {
    if s.len() != ACCOUNT_ID_LEN {
        return Err(AccountIdError::Length(s.len()));
    }
    if !s.starts_with('G') {
        return Err(AccountIdError::Prefix);
    }

    let decoded = BASE32_NOPAD
        .decode(s.as_bytes())
        .map_err(|_| AccountIdError::Encoding)?;
    if decoded.len() != DECODED_LEN {
        return Err(AccountIdError::Encoding);
    }
    if decoded[0] != VERSION_ACCOUNT_ID {
        return Err(AccountIdError::Version(decoded[0]));
    }

    let (payload, checksum) = decoded.split_at(DECODED_LEN - 2);
    let expected = CHECKSUM.checksum(payload);
    if u16::from_le_bytes([checksum[0], checksum[1]]) != expected {
        return Err(AccountIdError::Checksum);
    }

    Ok(AccountId(s.to_string()))
}

/// Whether `s` is a well-formed account id.
pub fn is_valid_account_id(s: &str) -> bool {
    parse_account_id(s).is_ok()
}
