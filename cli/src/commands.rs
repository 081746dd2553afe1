use anyhow::{bail, Result};
use config::AppConfig;
use invoice_form_core::currency::format_amount;
use invoice_form_core::parsing::to_json_pretty;
use invoice_form_core::CurrencyKey;

pub fn show() -> Result<()> {
    let form = match storage::load_form_data() {
        Some(form) => form,
        None => {
            println!("No saved form data");
            return Ok(());
        }
    };

    println!("{}", to_json_pretty(&form)?);
    println!();
    for (i, item) in form.items.iter().enumerate() {
        println!(
            "{:>3}. {} ({} h x {}) = {}",
            i + 1,
            item.description,
            item.hours,
            format_amount(item.rate, form.currency),
            format_amount(item.amount(), form.currency)
        );
    }
    println!("Total: {}", format_amount(form.total(), form.currency));
    Ok(())
}

pub async fn import() -> Result<()> {
    match storage::import_form_data_from_file().await {
        Ok(form) => {
            storage::save_form_data(&form);
            tracing::info!(number = form.invoice.number, items = form.items.len(), "form imported");
            println!(
                "Imported invoice {} with {} item(s)",
                form.invoice.number,
                form.items.len()
            );
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("  {}", error);
            }
            bail!("Import failed with {} error(s)", errors.len())
        }
    }
}

pub fn export(filename: Option<&str>) -> Result<()> {
    let Some(form) = storage::load_form_data() else {
        bail!("No saved form data to export");
    };
    storage::export_form_data_as_file(&form, filename);
    tracing::info!(number = form.invoice.number, "export requested");
    Ok(())
}

pub fn clear() {
    storage::clear_form_data();
    println!("Saved form data cleared");
}

pub fn currencies() {
    for key in CurrencyKey::ALL {
        println!("{}", key.label());
    }
}

pub fn configure(
    mut cfg: AppConfig,
    db_path: Option<String>,
    export_dir: Option<String>,
    log_filter: Option<String>,
) -> Result<()> {
    if cfg.apply_overrides(db_path, export_dir, log_filter) {
        config::store(&cfg)?;
        tracing::info!("Settings updated");
    }

    println!("config file: {}", config::config_path()?.display());
    println!("storage.db_path = {}", cfg.storage.db_path);
    println!("export.directory = {}", cfg.export.directory);
    println!("logging.filter = {}", cfg.logging.filter);
    Ok(())
}
