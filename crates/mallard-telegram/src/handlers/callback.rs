use std::sync::Arc;

use teloxide::prelude::*;

use tracing::error;

use mallard_core::domain::{ChatId, MessageId, MessageRef, RetractIntent, UserId};

use crate::router::AppState;
use crate::RETRACT_CALLBACK;

/// A press of the remove button under a response. Whether the presser may
/// actually delete it is the dispatcher's call; unknown pairs are silently
/// ignored there, so the button is safe to show to everyone.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let cb_id = q.id.clone();
    let data = q.data.clone().unwrap_or_default();

    let Some(message) = q.message.as_ref() else {
        let _ = bot.answer_callback_query(cb_id).await;
        return Ok(());
    };

    if data != RETRACT_CALLBACK {
        let _ = bot.answer_callback_query(cb_id).await;
        return Ok(());
    }

    let intent = RetractIntent {
        response: MessageRef {
            chat_id: ChatId(message.chat.id.0),
            message_id: MessageId(message.id.0),
        },
        requester: UserId(q.from.id.0 as i64),
    };

    if let Err(e) = state.dispatcher.handle_retraction(intent).await {
        error!("retraction failed: {e}");
    }

    let _ = bot.answer_callback_query(cb_id).await;
    Ok(())
}
