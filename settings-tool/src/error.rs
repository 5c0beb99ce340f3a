use thiserror::Error;

/// Errors that can occur while converting settings files to and from CSV.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    SettingsError(#[from] crosspoint_settings::Error),

    #[error("unknown key: {0}")]
    InvalidKey(String),

    #[error("invalid type for {key}: expected {expected}, found {found}")]
    InvalidType {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("hex decoding error: {0}")]
    HexError(#[from] hex::FromHexError),
}
