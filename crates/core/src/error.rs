#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No messages to send")]
    EmptyBatch,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
