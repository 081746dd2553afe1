mod gateway;
mod store;

pub use gateway::{
    default_export_filename, PersistenceGateway, FILE_READ_FAILED, NO_FILE_SELECTED, STORAGE_KEY,
};
pub use store::{KeyValueStore, MemoryStore, SledStore};

use anyhow::{anyhow, Result};
use invoice_form_core::FormData;
use once_cell::sync::OnceCell;

static GLOBAL_GATEWAY: OnceCell<PersistenceGateway> = OnceCell::new();

pub fn init(gateway: PersistenceGateway) -> Result<()> {
    GLOBAL_GATEWAY
        .set(gateway)
        .map_err(|_| anyhow!("storage already initialized"))?;
    Ok(())
}

fn gateway() -> Option<&'static PersistenceGateway> {
    let gateway = GLOBAL_GATEWAY.get();
    if gateway.is_none() {
        tracing::error!("storage not initialized");
    }
    gateway
}

pub fn save_form_data(form: &FormData) {
    if let Some(gateway) = gateway() {
        gateway.save(form);
    }
}

pub fn load_form_data() -> Option<FormData> {
    gateway()?.load()
}

pub fn clear_form_data() {
    if let Some(gateway) = gateway() {
        gateway.clear();
    }
}

pub fn export_form_data_as_file(form: &FormData, filename: Option<&str>) {
    if let Some(gateway) = gateway() {
        gateway.export_to_file(form, filename);
    }
}

pub async fn import_form_data_from_file() -> std::result::Result<FormData, Vec<String>> {
    match gateway() {
        Some(gateway) => gateway.import_from_file().await,
        None => Err(vec!["Storage not initialized".to_string()]),
    }
}
