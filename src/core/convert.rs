//! Amount conversion between two currencies over a fetched rate table

use crate::core::currency::CurrencyCode;
use crate::core::rates::RateTable;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("No rate for {to} in table based on {base}")]
    MissingRate { base: CurrencyCode, to: CurrencyCode },

    #[error("Invalid rate {rate} for {to}")]
    InvalidRate { to: CurrencyCode, rate: f64 },

    #[error("Conversion of {amount} at rate {rate} overflowed")]
    Overflow { amount: f64, rate: f64 },
}

/// Rounds half away from zero to four decimal places.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Looks up a usable multiplier for `to`. Rates must be finite and positive.
pub fn lookup_rate(table: &RateTable, to: CurrencyCode) -> Result<f64, ConversionError> {
    let rate = table.get(to).ok_or(ConversionError::MissingRate {
        base: table.base,
        to,
    })?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ConversionError::InvalidRate { to, rate });
    }
    Ok(rate)
}

/// Converts `amount` from `from` to `to`.
///
/// `table` must have been fetched with `from` as its base. Same-currency
/// conversion is the identity and never consults the table.
pub fn try_convert(
    amount: f64,
    from: CurrencyCode,
    to: CurrencyCode,
    table: &RateTable,
) -> Result<f64, ConversionError> {
    if from == to {
        return Ok(amount);
    }
    let rate = lookup_rate(table, to)?;
    let converted = round4(amount * rate);
    if !converted.is_finite() {
        return Err(ConversionError::Overflow { amount, rate });
    }
    Ok(converted)
}

/// Converts like [`try_convert`], but yields `0` whenever no valid rate is
/// available. The displayed zero is the only signal the user gets.
pub fn convert(amount: f64, from: CurrencyCode, to: CurrencyCode, table: &RateTable) -> f64 {
    try_convert(amount, from, to, table).unwrap_or_else(|e| {
        debug!(error = %e, %from, %to, "Conversion failed, using 0");
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(base: CurrencyCode, entries: &[(&str, f64)]) -> RateTable {
        RateTable::new(
            base,
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_same_currency_is_identity_even_without_rates() {
        let empty = RateTable::empty(CurrencyCode::Eur);
        for code in CurrencyCode::ALL {
            assert_eq!(convert(123.456789, code, code, &empty), 123.456789);
        }
    }

    #[test]
    fn test_multiplies_and_rounds_to_four_places() {
        let rates = table(CurrencyCode::Krw, &[("USD", 0.00074)]);
        assert_eq!(
            convert(10000.0, CurrencyCode::Krw, CurrencyCode::Usd, &rates),
            7.4
        );

        let rates = table(CurrencyCode::Usd, &[("KRW", 1350.5)]);
        assert_eq!(
            convert(50.0, CurrencyCode::Usd, CurrencyCode::Krw, &rates),
            67525.0
        );

        let rates = table(CurrencyCode::Usd, &[("EUR", 0.123456789)]);
        assert_eq!(
            convert(1.0, CurrencyCode::Usd, CurrencyCode::Eur, &rates),
            0.1235
        );
    }

    #[test]
    fn test_missing_rate_yields_zero() {
        let rates = table(CurrencyCode::Usd, &[("EUR", 0.9)]);
        assert_eq!(
            convert(100.0, CurrencyCode::Usd, CurrencyCode::Jpy, &rates),
            0.0
        );
        assert_eq!(
            try_convert(100.0, CurrencyCode::Usd, CurrencyCode::Jpy, &rates),
            Err(ConversionError::MissingRate {
                base: CurrencyCode::Usd,
                to: CurrencyCode::Jpy
            })
        );
    }

    #[test]
    fn test_invalid_rate_yields_zero() {
        for bad in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let rates = table(CurrencyCode::Usd, &[("GBP", bad)]);
            assert_eq!(
                convert(10.0, CurrencyCode::Usd, CurrencyCode::Gbp, &rates),
                0.0
            );
            assert!(matches!(
                try_convert(10.0, CurrencyCode::Usd, CurrencyCode::Gbp, &rates),
                Err(ConversionError::InvalidRate { .. })
            ));
        }
    }

    #[test]
    fn test_overflow_yields_zero() {
        let rates = table(CurrencyCode::Usd, &[("JPY", 1e10)]);
        assert!(matches!(
            try_convert(f64::MAX, CurrencyCode::Usd, CurrencyCode::Jpy, &rates),
            Err(ConversionError::Overflow { .. })
        ));
        assert_eq!(
            convert(f64::MAX, CurrencyCode::Usd, CurrencyCode::Jpy, &rates),
            0.0
        );
    }

    #[test]
    fn test_round4_half_away_from_zero() {
        assert_eq!(round4(1.23455), 1.2346);
        assert_eq!(round4(2.0), 2.0);
        assert_eq!(round4(0.00004), 0.0);
    }
}
