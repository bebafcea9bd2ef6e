use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed conversion rate of the lev to the euro.
pub const BGN_PER_EUR: Decimal = dec!(1.95583);

/// Currency used when rendering amounts. Stored amounts are always BGN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayCurrency {
    #[default]
    Bgn,
    Eur,
}

impl DisplayCurrency {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Bgn => "BGN",
            Self::Eur => "EUR",
        }
    }

    /// Converts a BGN amount for display, rounded to two decimals.
    pub fn convert(self, amount_bgn: Decimal) -> Decimal {
        let converted = match self {
            Self::Bgn => amount_bgn,
            Self::Eur => amount_bgn / BGN_PER_EUR,
        };
        converted.round_dp(2)
    }

    /// Renders a BGN amount expressed in billions, e.g. `"22.00 bn BGN"`.
    pub fn format_billions(self, amount_bgn: Decimal) -> String {
        format!("{:.2} bn {}", self.convert(amount_bgn), self.code())
    }
}

impl fmt::Display for DisplayCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported display currency '{0}' (use bgn or eur)")]
pub struct UnknownCurrency(pub String);

impl FromStr for DisplayCurrency {
    type Err = UnknownCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bgn" | "лв" | "lev" => Ok(Self::Bgn),
            "eur" | "euro" => Ok(Self::Eur),
            _ => Err(UnknownCurrency(value.to_owned())),
        }
    }
}
