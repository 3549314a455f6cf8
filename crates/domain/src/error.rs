/// Shared error type used across all tierlimits crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A single limit spec could not be read or unpacked into a profile.
    #[error("spec {name}: {message}")]
    Spec { name: String, message: String },

    #[error("duration: {0}")]
    Duration(String),

    #[error("pack: {0}")]
    Pack(String),

    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
