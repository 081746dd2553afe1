mod rules;

use crate::currency::CurrencyKey;
use crate::models::SerializedFormData;
use rules::{Rule, SERIALIZED_FORM_DATA};
use serde_json::Value;

/// Check untrusted JSON against the wire shape.
///
/// Every violation is reported as `<dotted.path>: <message>` (`root` when the
/// value itself is wrong), in document order.
pub fn validate(input: Value) -> Result<SerializedFormData, Vec<String>> {
    let mut errs = Vec::new();
    let mut path = Vec::new();
    check(Some(&input), &SERIALIZED_FORM_DATA, &mut path, &mut errs);
    if !errs.is_empty() {
        return Err(errs);
    }

    serde_json::from_value(input).map_err(|e| vec![format!("root: {}", e)])
}

fn check(value: Option<&Value>, rule: &Rule, path: &mut Vec<String>, errs: &mut Vec<String>) {
    let value = match value {
        Some(v) => v,
        None => {
            errs.push(issue(path, "Required"));
            return;
        }
    };

    match (rule, value) {
        (Rule::String, Value::String(_)) | (Rule::Number, Value::Number(_)) => {}
        (Rule::Currency, Value::String(code)) => {
            if code.parse::<CurrencyKey>().is_err() {
                errs.push(issue(
                    path,
                    &format!(
                        "Invalid enum value. Expected {}, received '{}'",
                        currency_choices(),
                        code
                    ),
                ));
            }
        }
        (Rule::Array(element), Value::Array(values)) => {
            for (i, v) in values.iter().enumerate() {
                path.push(i.to_string());
                check(Some(v), element, path, errs);
                path.pop();
            }
        }
        (Rule::Object(fields), Value::Object(map)) => {
            for (name, field_rule) in fields.iter() {
                path.push((*name).to_string());
                check(map.get(*name), field_rule, path, errs);
                path.pop();
            }
        }
        _ => errs.push(issue(
            path,
            &format!("Expected {}, received {}", expected_kind(rule), kind_of(value)),
        )),
    }
}

fn issue(path: &[String], message: &str) -> String {
    if path.is_empty() {
        format!("root: {}", message)
    } else {
        format!("{}: {}", path.join("."), message)
    }
}

/// `'USD' | 'EUR' | 'RUB'`
fn currency_choices() -> String {
    CurrencyKey::codes()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn expected_kind(rule: &Rule) -> String {
    match rule {
        Rule::String => "string".to_string(),
        Rule::Currency => currency_choices(),
        Rule::Number => "number".to_string(),
        Rule::Array(_) => "array".to_string(),
        Rule::Object(_) => "object".to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
