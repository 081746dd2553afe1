use crate::currency::CurrencyKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub hours: f64,
    /// Price per hour in the form's currency.
    pub rate: f64,
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.hours * self.rate
    }
}

/// Invoice header as the application holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDetails {
    pub number: f64,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub terms: String,
}

/// Invoice header on the wire: dates are `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedInvoiceDetails {
    pub number: f64,
    pub date: String,
    pub due_date: String,
    pub terms: String,
}

/// The invoice form in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct FormData {
    pub sender: Sender,
    pub invoice: InvoiceDetails,
    pub recipient: Recipient,
    /// Display order; preserved through storage and files.
    pub items: Vec<LineItem>,
    pub currency: CurrencyKey,
    pub terms_and_conditions: String,
}

impl FormData {
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::amount).sum()
    }
}

/// JSON-safe form data, the shape written to storage and exported files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedFormData {
    pub sender: Sender,
    pub invoice: SerializedInvoiceDetails,
    pub recipient: Recipient,
    pub items: Vec<LineItem>,
    pub currency: CurrencyKey,
    pub terms_and_conditions: String,
}
