//! Telegram update handlers.
//!
//! Each handler is a thin adapter: it pulls the ids and text out of the
//! teloxide update, builds the core's event type, and hands off to the
//! dispatcher. All policy (throttling, ownership) lives in `mallard-core`.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use crate::router::AppState;

mod callback;
mod message;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    message::handle_message(msg, state).await
}
