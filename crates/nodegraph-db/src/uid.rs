//! Parent node identifiers
//!
//! Dgraph uids are unsigned 64-bit integers written as `0x`-prefixed hex. This
//! is the only value interpolated into query text; every filter value travels
//! as a bound variable instead.

use std::{fmt, str::FromStr};

use nodegraph_error::ContractError;
use serde::{Deserialize, Serialize};

/// A Dgraph node uid.
///
/// The parent uid is written into the query skeleton rather than bound as a
/// variable, so it only ever reaches the query text through this type. Parsing
/// accepts `0x`-prefixed hex or plain decimal and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uid(u64);

impl Uid {
    /// Uid `0` is never assigned by Dgraph.
    pub fn new(raw: u64) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for Uid {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ContractError::InvalidUid { raw: s.to_string() };

        let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => (hex, 16),
            None => (s, 10),
        };
        // from_str_radix accepts a leading `+`
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(invalid());
        }
        let raw = u64::from_str_radix(digits, radix).map_err(|_| invalid())?;
        Self::new(raw).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Uid {
    type Error = ContractError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Uid> for String {
    fn from(value: Uid) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
