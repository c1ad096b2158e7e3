use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use mallard_core::config::Config;
use mallard_core::dispatch::Dispatcher as QueryDispatcher;

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub dispatcher: Arc<QueryDispatcher>,
    pub bot_username: String,
}

pub async fn run_polling(
    bot: Bot,
    cfg: Arc<Config>,
    dispatcher: Arc<QueryDispatcher>,
) -> anyhow::Result<()> {
    let me = bot.get_me().await?;
    let bot_username = me.username().to_string();

    tracing::info!("mallard started: @{bot_username}");
    tracing::info!(
        "rate limit: {} requests per {}s per chat",
        cfg.rate_limit_count,
        cfg.rate_limit_window.as_secs()
    );
    tracing::info!("mention aliases: {:?}", cfg.mentions);

    let state = Arc::new(AppState {
        cfg,
        dispatcher,
        bot_username,
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
