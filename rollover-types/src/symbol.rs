//! Root and contract symbol grammar.
//!
//! A root is one or two ASCII letters (`IF`, `A`, `rb`). A contract is its root
//! followed by exactly four digits encoding year and month (`IF1906`).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RollError;

/// Product family code shared by every expiry of one futures product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootSymbol(String);

impl RootSymbol {
    /// Parse a root symbol.
    ///
    /// # Errors
    /// Returns `UnsupportedInstrument` when `s` is not one or two ASCII letters.
    pub fn parse(s: &str) -> Result<Self, RollError> {
        if (1..=2).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(Self(s.to_string()))
        } else {
            Err(RollError::unsupported_instrument(s))
        }
    }

    /// Borrow the symbol text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One specific expiring instrument, e.g. `IF1906`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractSymbol {
    text: String,
    root_len: usize,
}

impl ContractSymbol {
    /// Parse a contract symbol.
    ///
    /// # Errors
    /// Returns `UnsupportedInstrument` unless `s` is one or two ASCII letters
    /// followed by exactly four ASCII digits.
    pub fn parse(s: &str) -> Result<Self, RollError> {
        let root_len = s.bytes().take_while(u8::is_ascii_alphabetic).count();
        let digits = &s.as_bytes()[root_len..];
        if (1..=2).contains(&root_len) && digits.len() == 4 && digits.iter().all(u8::is_ascii_digit)
        {
            Ok(Self {
                text: s.to_string(),
                root_len,
            })
        } else {
            Err(RollError::unsupported_instrument(s))
        }
    }

    /// Borrow the symbol text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Root symbol derived from the leading letters.
    #[must_use]
    pub fn root(&self) -> RootSymbol {
        RootSymbol(self.text[..self.root_len].to_string())
    }

    /// Expiry month code: the last two digits, e.g. `6` for `IF1906`.
    #[must_use]
    pub fn month(&self) -> u8 {
        let b = self.text.as_bytes();
        let n = b.len();
        (b[n - 2] - b'0') * 10 + (b[n - 1] - b'0')
    }
}

impl fmt::Display for RootSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ContractSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for RootSymbol {
    type Err = RollError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for ContractSymbol {
    type Err = RollError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RootSymbol {
    type Error = RollError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<String> for ContractSymbol {
    type Error = RollError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RootSymbol> for String {
    fn from(s: RootSymbol) -> Self {
        s.0
    }
}

impl From<ContractSymbol> for String {
    fn from(s: ContractSymbol) -> Self {
        s.text
    }
}
