use herald_report::GatewayError;

/// Errors produced by the Telegram gateway.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("teloxide error: {0}")]
    Teloxide(#[from] teloxide::RequestError),

    #[error("chat id is not numeric: {0}")]
    InvalidChatId(String),
}

impl From<TelegramError> for GatewayError {
    fn from(e: TelegramError) -> Self {
        match e {
            TelegramError::InvalidChatId(id) => GatewayError::InvalidTarget(id),
            other => GatewayError::Transport(other.to_string()),
        }
    }
}
