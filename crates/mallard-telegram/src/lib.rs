//! Telegram adapter (teloxide).
//!
//! Implements the `mallard-core` Messenger port over the Telegram Bot API.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};

use tokio::time::sleep;

pub mod format;
pub mod handlers;
pub mod router;

use mallard_core::{
    dispatch::{Messenger, QueryResponse},
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    Result,
};

/// Callback data carried by the remove button under each response.
pub const RETRACT_CALLBACK: &str = "retract";

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn present(&self, chat: ChatId, response: &QueryResponse) -> Result<MessageRef> {
        let html = format::render_response(response);
        let markup = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "\u{1f5d1} Remove",
            RETRACT_CALLBACK,
        )]]);

        let msg = self
            .with_retry(|| {
                self.bot
                    .send_message(Self::tg_chat(chat), html.clone())
                    .parse_mode(ParseMode::Html)
                    .disable_web_page_preview(true)
                    .reply_markup(markup.clone())
            })
            .await?;

        Ok(MessageRef {
            chat_id: chat,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn acknowledge_throttled(&self, message: MessageRef) -> Result<()> {
        // Telegram's reaction API is not exposed by this teloxide version, so
        // the lightweight ack is a bare hourglass reply.
        self.with_retry(|| {
            self.bot
                .send_message(Self::tg_chat(message.chat_id), "\u{23f3}")
                .reply_to_message_id(Self::tg_msg_id(message.message_id))
        })
        .await?;
        Ok(())
    }

    async fn retract(&self, message: MessageRef) -> Result<()> {
        self.with_retry(|| {
            self.bot
                .delete_message(Self::tg_chat(message.chat_id), Self::tg_msg_id(message.message_id))
        })
        .await?;
        Ok(())
    }
}
