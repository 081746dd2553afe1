pub mod currency;
pub mod error;
pub mod models;
pub mod parsing;
pub mod validation;

pub use currency::CurrencyKey;
pub use error::FormDataError;
pub use models::{FormData, SerializedFormData};
