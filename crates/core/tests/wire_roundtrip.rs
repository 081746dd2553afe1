//! Property tests for the form data wire format.

use chrono::NaiveDate;
use invoice_form_core::models::{InvoiceDetails, LineItem, Recipient, Sender};
use invoice_form_core::parsing::{from_wire, parse_json, to_json, to_json_pretty, to_wire};
use invoice_form_core::validation::validate;
use invoice_form_core::{CurrencyKey, FormData};
use proptest::prelude::*;

fn date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2200, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("day <= 28 is always valid"))
}

fn amount() -> impl Strategy<Value = f64> {
    -1.0e9f64..1.0e9f64
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (".*", amount(), amount()).prop_map(|(description, hours, rate)| LineItem {
        description,
        hours,
        rate,
    })
}

fn form_data() -> impl Strategy<Value = FormData> {
    (
        (".*", ".*", ".*", ".*"),
        (amount(), date(), date(), ".*"),
        (".*", ".*"),
        prop::collection::vec(line_item(), 0..6),
        prop::sample::select(CurrencyKey::ALL.to_vec()),
        ".*",
    )
        .prop_map(
            |(
                (name, tax_id, address, email),
                (number, date, due_date, terms),
                (recipient_name, recipient_address),
                items,
                currency,
                terms_and_conditions,
            )| FormData {
                sender: Sender {
                    name,
                    tax_id,
                    address,
                    email,
                },
                invoice: InvoiceDetails {
                    number,
                    date,
                    due_date,
                    terms,
                },
                recipient: Recipient {
                    name: recipient_name,
                    address: recipient_address,
                },
                items,
                currency,
                terms_and_conditions,
            },
        )
}

proptest! {
    #[test]
    fn wire_conversion_is_lossless(form in form_data()) {
        let wire = to_wire(&form);
        let back = from_wire(wire.clone()).unwrap();
        prop_assert_eq!(&back, &form);
        prop_assert_eq!(to_wire(&back), wire);
    }

    #[test]
    fn stored_json_validates_and_restores(form in form_data()) {
        let json = to_json(&form).unwrap();
        let wire = validate(parse_json(&json).unwrap()).unwrap();
        prop_assert_eq!(from_wire(wire).unwrap(), form);
    }
}

#[test]
fn exported_json_keeps_item_order() {
    let form = FormData {
        sender: Sender::default(),
        invoice: InvoiceDetails {
            number: 3.0,
            date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 30).unwrap(),
            terms: String::new(),
        },
        recipient: Recipient::default(),
        items: ["first", "second", "third"]
            .iter()
            .map(|d| LineItem {
                description: d.to_string(),
                hours: 1.0,
                rate: 1.0,
            })
            .collect(),
        currency: CurrencyKey::Rub,
        terms_and_conditions: String::new(),
    };

    let json = to_json_pretty(&form).unwrap();
    let wire = validate(parse_json(&json).unwrap()).unwrap();
    let order: Vec<_> = wire.items.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(order, vec!["first", "second", "third"]);
    assert_eq!(wire.invoice.date, "2025-12-31");
}
