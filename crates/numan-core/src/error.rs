use thiserror::Error;

#[derive(Debug, Error)]
pub enum NumanError {
    #[error("Parameter out of domain: {0}")]
    Domain(String),

    #[error("Construction error: {0}")]
    Construction(String),

    #[error("Indeterminate expression: {0}")]
    Indeterminate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Singular system: {0}")]
    Singular(String),
}

pub type Result<T> = std::result::Result<T, NumanError>;
