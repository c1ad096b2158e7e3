use std::sync::Arc;

use teloxide::prelude::*;

use tracing::{debug, error};

use mallard_core::{
    domain::{ChatId, MessageId, MessageRef, QueryRequest, UserId},
    mentions,
};

use crate::router::AppState;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    if user.is_bot {
        return Ok(());
    }
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let Some(query) = mentions::extract_query(text, &state.bot_username, &state.cfg.mentions)
    else {
        debug!("not a query, ignoring");
        return Ok(());
    };

    let requester_name = user
        .username
        .clone()
        .map(|u| format!("@{u}"))
        .unwrap_or_else(|| user.first_name.clone());

    let req = QueryRequest {
        message: MessageRef {
            chat_id: ChatId(msg.chat.id.0),
            message_id: MessageId(msg.id.0),
        },
        requester: UserId(user.id.0 as i64),
        requester_name,
        text: query,
    };

    if let Err(e) = state.dispatcher.handle_query(req).await {
        error!("query handling failed: {e}");
    }

    Ok(())
}
