//! Telegram implementation of the messaging gateway.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tracing::debug;

use herald_core::config::TelegramConfig;
use herald_report::{Artifact, Gateway, GatewayError};

use crate::error::TelegramError;
use crate::send::split_chunks;

/// Delivers rendered artifacts to Telegram chats.
///
/// Text artifacts are sent as (possibly chunked) messages; document
/// artifacts as in-memory file uploads with a caption.
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot: Bot::new(&config.bot_token),
        }
    }

    fn parse_chat(chat_id: &str) -> Result<ChatId, TelegramError> {
        chat_id
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| TelegramError::InvalidChatId(chat_id.to_string()))
    }

    async fn send(&self, chat_id: &str, artifact: &Artifact) -> Result<(), TelegramError> {
        let chat = Self::parse_chat(chat_id)?;
        match artifact {
            Artifact::Text(text) => {
                for chunk in split_chunks(text) {
                    self.bot.send_message(chat, chunk).await?;
                }
            }
            Artifact::Document {
                file_name,
                caption,
                bytes,
            } => {
                debug!(chat = chat.0, file = %file_name, "telegram: uploading document");
                let file = InputFile::memory(bytes.clone()).file_name(file_name.clone());
                self.bot
                    .send_document(chat, file)
                    .caption(caption.clone())
                    .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for TelegramGateway {
    async fn deliver(&self, chat_id: &str, artifact: &Artifact) -> Result<(), GatewayError> {
        self.send(chat_id, artifact).await.map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_group_chat_id() {
        assert_eq!(
            TelegramGateway::parse_chat("-100200300").unwrap(),
            ChatId(-100200300)
        );
    }

    #[test]
    fn rejects_non_numeric_chat_id() {
        let err = TelegramGateway::parse_chat("sales-team").unwrap_err();
        assert!(matches!(err, TelegramError::InvalidChatId(_)));
    }
}
