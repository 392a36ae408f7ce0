use crate::encoding::{Encode, Encoder};
use crate::error::{DecodeError, EncodeError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Longest symbol the 8-byte `asset_symbol_type` can hold after the precision byte
const MAX_SYMBOL_LEN: usize = 7;
/// Largest precision whose scale still fits into a u64
const MAX_PRECISION: usize = 18;

/// Token amount with fixed decimal precision, e.g. `"1.000 STEEM"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    /// Amount in the smallest unit (`"1.000 STEEM"` is 1000)
    pub amount: i64,
    /// Number of decimal places
    pub precision: u8,
    pub symbol: String,
}

impl Asset {
    pub fn new(amount: i64, precision: u8, symbol: &str) -> Self {
        Asset {
            amount,
            precision,
            symbol: symbol.to_string(),
        }
    }
}

impl FromStr for Asset {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            DecodeError::MalformedScalar(format!("Invalid asset {:?}: {}", s, reason))
        };

        let (number, symbol) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| invalid("missing symbol"))?;
        if symbol.is_empty() || !symbol.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(invalid("symbol must be uppercase letters"));
        }

        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("amount must be decimal"));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) || fraction.len() > MAX_PRECISION {
            return Err(invalid("bad fractional part"));
        }

        let combined = format!("{}{}", whole, fraction);
        let magnitude: i64 = combined.parse().map_err(|_| invalid("amount out of range"))?;

        Ok(Asset {
            amount: if negative { -magnitude } else { magnitude },
            precision: fraction.len() as u8,
            symbol: symbol.to_string(),
        })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        if self.precision == 0 {
            return write!(f, "{}{} {}", sign, magnitude, self.symbol);
        }
        // a scale past u64 is larger than any magnitude
        let (whole, fraction) = match 10u64.checked_pow(self.precision as u32) {
            Some(scale) => (magnitude / scale, magnitude % scale),
            None => (0, magnitude),
        };
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            whole,
            fraction,
            self.symbol,
            width = self.precision as usize
        )
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// `amount` as i64 LE, then the precision byte and the NUL-padded symbol
impl Encode for Asset {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        if self.precision as usize > MAX_PRECISION {
            return Err(EncodeError::InvalidAsset(format!(
                "Precision {} above {}",
                self.precision, MAX_PRECISION
            )));
        }
        if self.symbol.len() > MAX_SYMBOL_LEN {
            return Err(EncodeError::InvalidAsset(format!(
                "Symbol {} longer than {} bytes",
                self.symbol, MAX_SYMBOL_LEN
            )));
        }
        enc.write_i64(self.amount);
        enc.write_u8(self.precision);
        let mut symbol = [0u8; MAX_SYMBOL_LEN];
        symbol[..self.symbol.len()].copy_from_slice(self.symbol.as_bytes());
        enc.write_raw(&symbol);
        Ok(())
    }
}
