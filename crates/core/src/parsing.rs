//! Conversion between in-memory form data and its wire shape.
//!
//! The only difference between the two shapes is the invoice dates, which
//! travel as `YYYY-MM-DD` strings.

use crate::error::{FormDataError, Result};
use crate::models::{FormData, InvoiceDetails, SerializedFormData, SerializedInvoiceDetails};
use chrono::NaiveDate;

pub fn format_date(date: NaiveDate) -> String {
    date.to_string()
}

pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    value
        .parse::<NaiveDate>()
        .map_err(|source| FormDataError::InvalidDate {
            field,
            value: value.to_string(),
            source,
        })
}

pub fn to_wire(form: &FormData) -> SerializedFormData {
    SerializedFormData {
        sender: form.sender.clone(),
        invoice: SerializedInvoiceDetails {
            number: form.invoice.number,
            date: format_date(form.invoice.date),
            due_date: format_date(form.invoice.due_date),
            terms: form.invoice.terms.clone(),
        },
        recipient: form.recipient.clone(),
        items: form.items.clone(),
        currency: form.currency,
        terms_and_conditions: form.terms_and_conditions.clone(),
    }
}

/// Only defined for validator-accepted input; date strings may still be
/// malformed and fail here.
pub fn from_wire(wire: SerializedFormData) -> Result<FormData> {
    let date = parse_date("invoice.date", &wire.invoice.date)?;
    let due_date = parse_date("invoice.dueDate", &wire.invoice.due_date)?;

    Ok(FormData {
        sender: wire.sender,
        invoice: InvoiceDetails {
            number: wire.invoice.number,
            date,
            due_date,
            terms: wire.invoice.terms,
        },
        recipient: wire.recipient,
        items: wire.items,
        currency: wire.currency,
        terms_and_conditions: wire.terms_and_conditions,
    })
}

fn ensure_finite(wire: &SerializedFormData) -> Result<()> {
    let numbers = std::iter::once(("invoice.number".to_string(), wire.invoice.number)).chain(
        wire.items.iter().enumerate().flat_map(|(i, item)| {
            [
                (format!("items.{i}.hours"), item.hours),
                (format!("items.{i}.rate"), item.rate),
            ]
        }),
    );

    for (path, value) in numbers {
        if !value.is_finite() {
            return Err(FormDataError::NonFiniteNumber { path });
        }
    }
    Ok(())
}

/// Compact JSON, as kept in the key-value store.
pub fn to_json(form: &FormData) -> Result<String> {
    let wire = to_wire(form);
    ensure_finite(&wire)?;
    Ok(serde_json::to_string(&wire)?)
}

/// Two-space indented JSON, as written to exported files.
pub fn to_json_pretty(form: &FormData) -> Result<String> {
    let wire = to_wire(form);
    ensure_finite(&wire)?;
    Ok(serde_json::to_string_pretty(&wire)?)
}

pub fn parse_json(text: &str) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::CurrencyKey;
    use crate::models::{LineItem, Recipient, Sender};

    fn sample() -> FormData {
        FormData {
            sender: Sender {
                name: "Acme Ltd".into(),
                tax_id: "LV40003000000".into(),
                address: "1 Main St".into(),
                email: "billing@acme.test".into(),
            },
            invoice: InvoiceDetails {
                number: 42.0,
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                due_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
                terms: "Net 30".into(),
            },
            recipient: Recipient {
                name: "Client GmbH".into(),
                address: "Berlin".into(),
            },
            items: vec![
                LineItem {
                    description: "Design".into(),
                    hours: 10.0,
                    rate: 50.0,
                },
                LineItem {
                    description: "Build".into(),
                    hours: 2.5,
                    rate: 80.0,
                },
            ],
            currency: CurrencyKey::Eur,
            terms_and_conditions: "Pay on time".into(),
        }
    }

    #[test]
    fn wire_dates_are_plain_strings() {
        let wire = to_wire(&sample());
        assert_eq!(wire.invoice.date, "2024-03-01");
        assert_eq!(wire.invoice.due_date, "2024-03-31");
    }

    #[test]
    fn round_trip_is_identity() {
        let form = sample();
        let back = from_wire(to_wire(&form)).unwrap();
        assert_eq!(back, form);
    }

    #[test]
    fn wire_json_uses_camel_case_field_names() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sender"]["taxId"], "LV40003000000");
        assert_eq!(value["invoice"]["dueDate"], "2024-03-31");
        assert_eq!(value["termsAndConditions"], "Pay on time");
        assert_eq!(value["currency"], "EUR");
        assert_eq!(value["items"][1]["description"], "Build");
    }

    #[test]
    fn pretty_json_is_indented() {
        let json = to_json_pretty(&sample()).unwrap();
        assert!(json.starts_with("{\n  \"sender\": {"));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut wire = to_wire(&sample());
        wire.invoice.due_date = "31/03/2024".into();
        let err = from_wire(wire).unwrap_err();
        assert!(matches!(
            err,
            FormDataError::InvalidDate { field: "invoice.dueDate", .. }
        ));
        assert!(err.to_string().contains("31/03/2024"));
    }

    #[test]
    fn non_finite_numbers_are_not_serialized() {
        let mut form = sample();
        form.items[1].rate = f64::NAN;
        match to_json(&form) {
            Err(FormDataError::NonFiniteNumber { path }) => assert_eq!(path, "items.1.rate"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn totals_sum_item_amounts() {
        let form = sample();
        assert_eq!(form.items[0].amount(), 500.0);
        assert_eq!(form.total(), 700.0);
    }
}
