//! Token amounts.
//!
//! An asset is a signed 64-bit amount in the token's smallest unit plus a
//! symbol carrying the token code and its decimal precision.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EncodeError, ParseError};
use crate::limits::MAX_SYMBOL_CODE_LEN;

/// Token symbol: precision plus up to six code bytes, zero padded.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Symbol {
    precision: u8,
    code: [u8; MAX_SYMBOL_CODE_LEN],
}

impl Symbol {
    /// Creates a symbol from a precision and a 1 to 6 letter uppercase code.
    pub fn new(precision: u8, code: &str) -> Result<Self, EncodeError> {
        let bytes = code.as_bytes();
        if bytes.is_empty()
            || bytes.len() > MAX_SYMBOL_CODE_LEN
            || !bytes.iter().all(u8::is_ascii_uppercase)
        {
            return Err(EncodeError::InvalidSymbolCode {
                code: code.to_string(),
                max: MAX_SYMBOL_CODE_LEN,
            });
        }
        let mut padded = [0u8; MAX_SYMBOL_CODE_LEN];
        padded[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            precision,
            code: padded,
        })
    }

    /// Creates a symbol from its wire bytes without validating the code.
    pub fn from_raw(precision: u8, code: [u8; MAX_SYMBOL_CODE_LEN]) -> Self {
        Self { precision, code }
    }

    /// Number of decimal places.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// The code bytes up to the first zero.
    pub fn code_bytes(&self) -> &[u8] {
        let len = self.code.iter().position(|b| *b == 0).unwrap_or(MAX_SYMBOL_CODE_LEN);
        &self.code[..len]
    }

    /// The padded code field exactly as it appears on the wire.
    pub fn raw_code(&self) -> &[u8; MAX_SYMBOL_CODE_LEN] {
        &self.code
    }

    pub fn code(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.code_bytes())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

/// An amount of some token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Asset {
    /// Amount in units of `10^-precision`.
    pub amount: i64,
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision() as usize;
        let sign = if self.amount < 0 { "-" } else { "" };
        let digits = self.amount.unsigned_abs().to_string();
        if precision == 0 {
            return write!(f, "{}{} {}", sign, digits, self.symbol.code());
        }
        let digits = format!("{:0>width$}", digits, width = precision + 1);
        let (int, frac) = digits.split_at(digits.len() - precision);
        write!(f, "{}{}.{} {}", sign, int, frac, self.symbol.code())
    }
}

impl FromStr for Asset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ParseError::InvalidAsset {
            input: s.to_string(),
            reason,
        };

        let (number, code) = s.trim().split_once(' ').ok_or_else(|| invalid("missing symbol"))?;
        let (negative, unsigned) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if int.is_empty() || !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("amount is not a decimal number"));
        }
        if unsigned.ends_with('.') {
            return Err(invalid("empty fractional part"));
        }
        let precision = u8::try_from(frac.len()).map_err(|_| invalid("precision too large"))?;

        let magnitude: i128 = format!("{}{}", int, frac)
            .parse()
            .map_err(|_| invalid("amount out of range"))?;
        let amount = i64::try_from(if negative { -magnitude } else { magnitude })
            .map_err(|_| invalid("amount out of range"))?;

        Ok(Asset::new(amount, Symbol::new(precision, code)?))
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Cow::<'de, str>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
