//! Telegram transport: outbound sends and the inbound dispatch loop.

use crate::command::{Action, CommandRouter};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),
}

/// Fire-and-forget outbound delivery.
#[async_trait]
pub trait Outbound: Send + Sync {
    /// Deliver one message to one chat.
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), TelegramError>;
}

/// Telegram bot wrapper.
pub struct TelegramBot {
    bot: Bot,
}

impl TelegramBot {
    /// Create a new bot with the given token.
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Run the inbound dispatch loop.
    ///
    /// Every message, command or not, goes through the router so the sender
    /// is always registered. The dispatcher owns the update cursor and logs
    /// handler failures without stopping.
    pub async fn run(self: Arc<Self>, router: Arc<CommandRouter>) {
        info!("inbound dispatch loop started");
        let bot = self.bot.clone();
        let handler = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
            let router = Arc::clone(&router);
            async move { handle_message(bot, msg, router).await }
        });

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    router: Arc<CommandRouter>,
) -> Result<(), TelegramError> {
    // Non-text updates (stickers, photos) still advance the cursor.
    let text = match msg.text() {
        Some(text) => text.to_string(),
        None => return Ok(()),
    };
    let chat_id = msg.chat.id;
    let first_name = msg.chat.first_name().unwrap_or("").to_string();
    let username = msg.chat.username().map(str::to_string);

    let action = router
        .handle(chat_id.0, &first_name, username.as_deref(), &text, Utc::now())
        .await;

    let reply = match action {
        Action::Reply(text) | Action::ReplyError(text) => text,
        Action::None => return Ok(()),
    };

    bot.send_message(chat_id, reply)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

#[async_trait]
impl Outbound for TelegramBot {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}
