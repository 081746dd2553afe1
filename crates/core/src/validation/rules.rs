//! Declarative description of the wire shape.

/// Constraint on a single JSON value.
pub(crate) enum Rule {
    String,
    Number,
    /// A string naming one of `CurrencyKey::ALL`.
    Currency,
    Array(&'static Rule),
    /// Every listed field is required; unlisted fields are ignored.
    Object(&'static [(&'static str, Rule)]),
}

const SENDER: Rule = Rule::Object(&[
    ("name", Rule::String),
    ("taxId", Rule::String),
    ("address", Rule::String),
    ("email", Rule::String),
]);

const INVOICE: Rule = Rule::Object(&[
    ("number", Rule::Number),
    ("date", Rule::String),
    ("dueDate", Rule::String),
    ("terms", Rule::String),
]);

const RECIPIENT: Rule = Rule::Object(&[("name", Rule::String), ("address", Rule::String)]);

const ITEM: Rule = Rule::Object(&[
    ("description", Rule::String),
    ("hours", Rule::Number),
    ("rate", Rule::Number),
]);

pub(crate) const SERIALIZED_FORM_DATA: Rule = Rule::Object(&[
    ("sender", SENDER),
    ("invoice", INVOICE),
    ("recipient", RECIPIENT),
    ("items", Rule::Array(&ITEM)),
    ("currency", Rule::Currency),
    ("termsAndConditions", Rule::String),
]);
