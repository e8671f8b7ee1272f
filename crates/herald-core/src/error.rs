use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeraldError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid job '{job}': {reason}")]
    InvalidJob { job: String, reason: String },
}

pub type Result<T> = std::result::Result<T, HeraldError>;
