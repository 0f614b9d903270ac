use alloy::primitives::utils::{parse_units, Unit};
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default tip used by the operator script
pub const DEFAULT_PRIORITY_FEE: &str = "100 gwei";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeeError {
    #[error("priority fee is empty")]
    Empty,
    #[error("priority fee cannot be negative: {input}")]
    Negative { input: String },
    #[error("invalid priority fee '{input}': {message}")]
    Invalid { input: String, message: String },
    #[error("priority fee '{input}' does not fit in 128 bits of wei")]
    Overflow { input: String },
}

/// Max priority fee per gas, held in wei
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PriorityFee(u128);

impl PriorityFee {
    pub fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    pub fn from_gwei(gwei: u64) -> Self {
        Self(u128::from(gwei) * 1_000_000_000)
    }

    pub fn wei(&self) -> u128 {
        self.0
    }
}

impl Default for PriorityFee {
    fn default() -> Self {
        Self::from_gwei(100)
    }
}

impl FromStr for PriorityFee {
    type Err = FeeError;

    /// Accepts `"100 gwei"`, `"1.5gwei"`, `"0.01 ether"` or a bare wei amount
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(FeeError::Empty);
        }
        if input.starts_with('-') {
            return Err(FeeError::Negative {
                input: input.to_string(),
            });
        }

        let split = input
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(input.len());
        let (amount, unit) = input.split_at(split);
        let amount = amount.trim();
        let unit = match unit.trim() {
            "" => "wei".to_string(),
            unit => unit.to_ascii_lowercase(),
        };

        if amount.is_empty() {
            return Err(FeeError::Invalid {
                input: input.to_string(),
                message: "missing amount".to_string(),
            });
        }

        let decimals = Unit::from_str(&unit)
            .map_err(|e| FeeError::Invalid {
                input: input.to_string(),
                message: e.to_string(),
            })?
            .get();
        if let Some((_, fraction)) = amount.split_once('.') {
            if fraction.trim_end_matches('0').len() > usize::from(decimals) {
                return Err(FeeError::Invalid {
                    input: input.to_string(),
                    message: format!("more than {decimals} decimal places for {unit}"),
                });
            }
        }

        let parsed = parse_units(amount, unit.as_str()).map_err(|e| FeeError::Invalid {
            input: input.to_string(),
            message: e.to_string(),
        })?;
        let wei: U256 = parsed.get_absolute();
        let wei = u128::try_from(wei).map_err(|_| FeeError::Overflow {
            input: input.to_string(),
        })?;

        Ok(Self(wei))
    }
}

impl fmt::Display for PriorityFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 != 0 && self.0 % 1_000_000_000 == 0 {
            write!(f, "{} gwei", self.0 / 1_000_000_000)
        } else {
            write!(f, "{} wei", self.0)
        }
    }
}
