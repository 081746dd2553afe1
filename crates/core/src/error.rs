use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormDataError {
    #[error("Invalid date in {field}: '{value}' ({source})")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Cannot serialize non-finite number at {path}")]
    NonFiniteNumber { path: String },

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormDataError>;
