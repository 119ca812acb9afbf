//! Supported currencies and their display names

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CurrencyCode {
    Krw,
    Usd,
    Jpy,
    Eur,
    Cny,
    Gbp,
    Aud,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported currency code: {0}")]
pub struct CurrencyParseError(pub String);

impl CurrencyCode {
    /// All supported currencies, in selector order.
    pub const ALL: [CurrencyCode; 7] = [
        CurrencyCode::Krw,
        CurrencyCode::Usd,
        CurrencyCode::Jpy,
        CurrencyCode::Eur,
        CurrencyCode::Cny,
        CurrencyCode::Gbp,
        CurrencyCode::Aud,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Krw => "KRW",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Cny => "CNY",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Aud => "AUD",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CurrencyCode::Krw => "South Korean won",
            CurrencyCode::Usd => "US dollar",
            CurrencyCode::Jpy => "Japanese yen",
            CurrencyCode::Eur => "Euro",
            CurrencyCode::Cny => "Chinese yuan",
            CurrencyCode::Gbp => "British pound",
            CurrencyCode::Aud => "Australian dollar",
        }
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| CurrencyParseError(s.to_string()))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> String {
        code.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("krw".parse::<CurrencyCode>().unwrap(), CurrencyCode::Krw);
        assert_eq!(" Usd ".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!("GBP".parse::<CurrencyCode>().unwrap(), CurrencyCode::Gbp);
    }

    #[test]
    fn test_parse_unknown_code() {
        let err = "CHF".parse::<CurrencyCode>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported currency code: CHF");
    }

    #[test]
    fn test_code_round_trips_through_display() {
        for code in CurrencyCode::ALL {
            assert_eq!(code.to_string().parse::<CurrencyCode>().unwrap(), code);
            assert!(!code.display_name().is_empty());
        }
    }

    #[test]
    fn test_serde_uses_upper_case_code() {
        let yaml = serde_yaml::to_string(&CurrencyCode::Jpy).unwrap();
        assert_eq!(yaml.trim(), "JPY");

        let parsed: CurrencyCode = serde_yaml::from_str("eur").unwrap();
        assert_eq!(parsed, CurrencyCode::Eur);

        assert!(serde_yaml::from_str::<CurrencyCode>("XYZ").is_err());
    }
}
