use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const INR_CURRENCY_CODE: &str = "INR";

//--------------------------------------        Paise        ---------------------------------------------------------
/// An amount of Indian Rupees, expressed in paise (1/100 of a rupee). This is the unit the payment provider expects
/// order amounts in, so it is also what travels over the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paise(i64);

impl Paise {
    pub const fn from_paise(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }
}

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Add for Paise {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<i64> for Paise {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paise: {0}")]
pub struct PaiseConversionError(String);

impl FromStr for Paise {
    type Err = PaiseConversionError;

    /// Parses either a whole number of paise (`"89"`) or a rupee amount with a decimal point (`"0.89"`, `"₹12.5"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('₹').trim();
        match s.split_once('.') {
            None => s.parse::<i64>().map(Self).map_err(|e| PaiseConversionError(format!("{s}: {e}"))),
            Some((rupees, fraction)) => {
                if fraction.is_empty() || fraction.len() > 2 {
                    return Err(PaiseConversionError(format!("{s}: expected at most two decimal places")));
                }
                let rupees = match rupees {
                    "" => 0,
                    r => r.parse::<i64>().map_err(|e| PaiseConversionError(format!("{s}: {e}")))?,
                };
                let mut paise = fraction.parse::<i64>().map_err(|e| PaiseConversionError(format!("{s}: {e}")))?;
                if fraction.len() == 1 {
                    paise *= 10;
                }
                Ok(Self(rupees * 100 + paise))
            },
        }
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{sign}₹{}.{:02}", abs / 100, abs % 100)
    }
}
