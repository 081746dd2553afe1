//! Supported invoice currencies.
//!
//! `CurrencyKey::ALL` is the one list of codes the rest of the workspace
//! derives from: the schema validator builds its enum constraint from it and
//! the wire format serializes each key as its code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum CurrencyKey {
    Usd,
    Eur,
    Rub,
}

impl CurrencyKey {
    /// Every supported currency, in display order.
    pub const ALL: [CurrencyKey; 3] = [CurrencyKey::Usd, CurrencyKey::Eur, CurrencyKey::Rub];

    /// ISO 4217 code as written on the wire.
    pub fn code(self) -> &'static str {
        match self {
            CurrencyKey::Usd => "USD",
            CurrencyKey::Eur => "EUR",
            CurrencyKey::Rub => "RUB",
        }
    }

    /// Display label, e.g. `USD - US Dollar`.
    pub fn label(self) -> &'static str {
        match self {
            CurrencyKey::Usd => "USD - US Dollar",
            CurrencyKey::Eur => "EUR - Euro",
            CurrencyKey::Rub => "RUB - Russian Ruble",
        }
    }

    pub fn codes() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(CurrencyKey::code)
    }
}

impl fmt::Display for CurrencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported currency code '{}'", self.0)
    }
}

impl std::error::Error for UnknownCurrency {}

impl FromStr for CurrencyKey {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.code() == s)
            .ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

impl TryFrom<String> for CurrencyKey {
    type Error = UnknownCurrency;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyKey> for &'static str {
    fn from(key: CurrencyKey) -> Self {
        key.code()
    }
}

/// Render an amount as `<CODE> 1,234.50`: two fraction digits, comma-grouped
/// thousands.
pub fn format_amount(amount: f64, currency: CurrencyKey) -> String {
    if !amount.is_finite() {
        return format!("{} {}", currency.code(), amount);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };
    format!("{} {}{}.{}", currency.code(), sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_registry_order() {
        let codes: Vec<_> = CurrencyKey::codes().collect();
        assert_eq!(codes, vec!["USD", "EUR", "RUB"]);
    }

    #[test]
    fn labels_start_with_code() {
        for key in CurrencyKey::ALL {
            assert!(key.label().starts_with(&format!("{} - ", key.code())));
        }
        assert_eq!(CurrencyKey::Rub.label(), "RUB - Russian Ruble");
    }

    #[test]
    fn parses_known_codes_only() {
        assert_eq!("EUR".parse::<CurrencyKey>(), Ok(CurrencyKey::Eur));
        assert!("eur".parse::<CurrencyKey>().is_err());
        assert_eq!(
            "GBP".parse::<CurrencyKey>(),
            Err(UnknownCurrency("GBP".to_string()))
        );
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&CurrencyKey::Usd).unwrap();
        assert_eq!(json, "\"USD\"");
        let back: CurrencyKey = serde_json::from_str("\"RUB\"").unwrap();
        assert_eq!(back, CurrencyKey::Rub);
        assert!(serde_json::from_str::<CurrencyKey>("\"GBP\"").is_err());
    }

    #[test]
    fn formats_amounts() {
        assert_eq!(format_amount(1234.5, CurrencyKey::Usd), "USD 1,234.50");
        assert_eq!(format_amount(0.0, CurrencyKey::Eur), "EUR 0.00");
        assert_eq!(format_amount(-0.5, CurrencyKey::Eur), "EUR -0.50");
        assert_eq!(format_amount(1_000_000.0, CurrencyKey::Rub), "RUB 1,000,000.00");
        assert_eq!(format_amount(999.999, CurrencyKey::Usd), "USD 1,000.00");
        assert_eq!(format_amount(-0.001, CurrencyKey::Usd), "USD 0.00");
    }
}
