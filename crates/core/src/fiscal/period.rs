//! Quarters and billing periods.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A calendar quarter of the fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// January to March.
    Q1,
    /// April to June.
    Q2,
    /// July to September.
    Q3,
    /// October to December.
    Q4,
}

impl Quarter {
    /// All quarters in calendar order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Returns the quarter number (1-4).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

impl std::str::FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().trim_start_matches('T').trim_start_matches('Q') {
            "1" => Ok(Self::Q1),
            "2" => Ok(Self::Q2),
            "3" => Ok(Self::Q3),
            "4" => Ok(Self::Q4),
            _ => Err(format!("Unknown quarter: {s}")),
        }
    }
}

/// The period a call for funds covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    /// The whole fiscal year.
    Annual,
    /// A single quarter.
    Quarter(Quarter),
}

impl BillingPeriod {
    /// Builds a period from an optional quarter; no quarter means annual.
    #[must_use]
    pub const fn from_quarter(quarter: Option<Quarter>) -> Self {
        match quarter {
            Some(q) => Self::Quarter(q),
            None => Self::Annual,
        }
    }

    /// Fraction of the annual budget billed over this period.
    #[must_use]
    pub fn ratio(self) -> Decimal {
        match self {
            Self::Annual => Decimal::ONE,
            Self::Quarter(_) => Decimal::new(25, 2),
        }
    }

    /// Quarters covered by this period.
    #[must_use]
    pub fn quarters(self) -> Vec<Quarter> {
        match self {
            Self::Annual => Quarter::ALL.to_vec(),
            Self::Quarter(q) => vec![q],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_period_ratio() {
        assert_eq!(BillingPeriod::Annual.ratio(), dec!(1));
        assert_eq!(BillingPeriod::Quarter(Quarter::Q3).ratio(), dec!(0.25));
    }

    #[test]
    fn test_period_quarters() {
        assert_eq!(BillingPeriod::Annual.quarters().len(), 4);
        assert_eq!(
            BillingPeriod::Quarter(Quarter::Q2).quarters(),
            vec![Quarter::Q2]
        );
    }

    #[test]
    fn test_quarter_from_str() {
        assert_eq!(Quarter::from_str("Q1").unwrap(), Quarter::Q1);
        assert_eq!(Quarter::from_str("q4").unwrap(), Quarter::Q4);
        assert_eq!(Quarter::from_str("2").unwrap(), Quarter::Q2);
        assert_eq!(Quarter::from_str("T3").unwrap(), Quarter::Q3);
        assert!(Quarter::from_str("Q5").is_err());
    }

    #[test]
    fn test_billing_period_serialization() {
        let json = serde_json::to_string(&BillingPeriod::Quarter(Quarter::Q1)).unwrap();
        assert_eq!(json, r#"{"quarter":"Q1"}"#);
        let json = serde_json::to_string(&BillingPeriod::Annual).unwrap();
        assert_eq!(json, r#""annual""#);
    }
}
