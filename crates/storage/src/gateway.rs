use crate::store::KeyValueStore;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use file_io::{FileDownloader, FileFilter, FilePicker};
use invoice_form_core::parsing::{from_wire, parse_json, to_json, to_json_pretty};
use invoice_form_core::validation::validate;
use invoice_form_core::{FormData, FormDataError};
use std::sync::Arc;

/// Key the whole form lives under.
pub const STORAGE_KEY: &str = "invoice-form-data";

pub const NO_FILE_SELECTED: &str = "No file selected";
pub const FILE_READ_FAILED: &str = "Failed to read file";

const JSON_MIME: &str = "application/json";

/// `invoice-<number>-<YYYY-MM-DD>.json`
pub fn default_export_filename(number: f64, today: NaiveDate) -> String {
    format!(
        "invoice-{}-{}.json",
        display_number(number),
        today.format("%Y-%m-%d")
    )
}

/// Shortest round-trip digits; exponent form (`1e+21`, `1.5e-7`) outside
/// `[1e-6, 1e21)`, as JavaScript prints numbers.
fn display_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if !n.is_finite() || (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

enum DecodeError {
    /// Not JSON, or a date string that is not a calendar date.
    Malformed(FormDataError),
    /// JSON that does not have the form's shape.
    Invalid(Vec<String>),
}

/// Parse, validate and convert stored or imported text, in that order.
fn decode(text: &str) -> std::result::Result<FormData, DecodeError> {
    let value = parse_json(text).map_err(DecodeError::Malformed)?;
    let wire = validate(value).map_err(DecodeError::Invalid)?;
    from_wire(wire).map_err(DecodeError::Malformed)
}

/// Sole owner of the form's persistent copies: the key-value store entry and
/// exported/imported files.
///
/// `save`, `clear` and `export_to_file` are best-effort: failures are logged
/// and never reach the caller. `load` and `import_from_file` report failure
/// only through their return values.
#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
    picker: Arc<dyn FilePicker>,
    downloader: Arc<dyn FileDownloader>,
}

impl PersistenceGateway {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        picker: Arc<dyn FilePicker>,
        downloader: Arc<dyn FileDownloader>,
    ) -> Self {
        Self {
            store,
            picker,
            downloader,
        }
    }

    pub fn save(&self, form: &FormData) {
        match self.try_save(form) {
            Ok(()) => tracing::debug!(items = form.items.len(), "form data saved"),
            Err(e) => tracing::error!(error=%e, "Failed to save form data"),
        }
    }

    fn try_save(&self, form: &FormData) -> Result<()> {
        let json = to_json(form)?;
        self.store.set(STORAGE_KEY, &json)
    }

    /// `None` when nothing is stored or the stored value is unusable; an
    /// unusable value is deleted so it cannot fail again.
    pub fn load(&self) -> Option<FormData> {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(error=%e, "Failed to load form data");
                self.discard();
                return None;
            }
        };

        match decode(&raw) {
            Ok(form) => {
                tracing::debug!(items = form.items.len(), "form data loaded");
                Some(form)
            }
            Err(DecodeError::Malformed(e)) => {
                tracing::error!(error=%e, "Failed to load form data");
                self.discard();
                None
            }
            Err(DecodeError::Invalid(errors)) => {
                tracing::error!(?errors, "Invalid saved form data");
                self.discard();
                None
            }
        }
    }

    fn discard(&self) {
        if let Err(e) = self.store.delete(STORAGE_KEY) {
            tracing::error!(error=%e, "Failed to discard unusable form data");
        } else {
            tracing::warn!(key = STORAGE_KEY, "discarded unusable form data");
        }
    }

    pub fn clear(&self) {
        match self.store.delete(STORAGE_KEY) {
            Ok(()) => tracing::debug!("form data cleared"),
            Err(e) => tracing::error!(error=%e, "Failed to clear form data"),
        }
    }

    /// Offers the form as a pretty-printed JSON download. An empty or missing
    /// `filename` falls back to `default_export_filename` for today (UTC).
    pub fn export_to_file(&self, form: &FormData, filename: Option<&str>) {
        let filename = match filename {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_export_filename(form.invoice.number, Utc::now().date_naive()),
        };

        match self.try_export(form, &filename) {
            Ok(path) => tracing::debug!(path=%path.display(), "form data exported"),
            Err(e) => tracing::error!(error=%e, %filename, "Failed to export form data"),
        }
    }

    fn try_export(&self, form: &FormData, filename: &str) -> Result<std::path::PathBuf> {
        let json = to_json_pretty(form)?;
        self.downloader.download(filename, JSON_MIME, json.as_bytes())
    }

    /// Ask the user for a JSON file and decode it. Every outcome, including
    /// cancellation, is a returned value.
    pub async fn import_from_file(&self) -> std::result::Result<FormData, Vec<String>> {
        let file = match self.picker.pick_file(&FileFilter::JSON).await {
            Ok(Some(file)) => file,
            Ok(None) => return Err(vec![NO_FILE_SELECTED.to_string()]),
            Err(e) => {
                tracing::error!(error=%e, "File picker failed");
                return Err(vec![FILE_READ_FAILED.to_string()]);
            }
        };

        let content = match file.read_text().await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(file=%file.name, error=%e, "Failed to read imported file");
                return Err(vec![FILE_READ_FAILED.to_string()]);
            }
        };

        match decode(&content) {
            Ok(form) => {
                tracing::debug!(file=%file.name, items = form.items.len(), "form data imported");
                Ok(form)
            }
            Err(DecodeError::Malformed(e)) => {
                tracing::error!(file=%file.name, error=%e, "Failed to parse imported file");
                Err(vec![format!("Failed to parse file: {}", e)])
            }
            Err(DecodeError::Invalid(errors)) => {
                tracing::debug!(file=%file.name, count = errors.len(), "imported file failed validation");
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filename_uses_number_and_date() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(
            default_export_filename(42.0, today),
            "invoice-42-2024-07-04.json"
        );
        assert_eq!(
            default_export_filename(1.5, today),
            "invoice-1.5-2024-07-04.json"
        );
    }

    #[test]
    fn default_filename_prints_numbers_like_javascript() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(
            default_export_filename(1e21, today),
            "invoice-1e+21-2024-07-04.json"
        );
        assert_eq!(display_number(1.5e-7), "1.5e-7");
        assert_eq!(display_number(-2.5e22), "-2.5e+22");
        assert_eq!(display_number(0.000001), "0.000001");
        assert_eq!(display_number(123456789012345680000.0), "123456789012345680000");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(-7.0), "-7");
    }

    #[test]
    fn decode_distinguishes_malformed_from_invalid() {
        assert!(matches!(decode("{not json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("{}"), Err(DecodeError::Invalid(_))));
    }
}
