use std::sync::Arc;

use teloxide::Bot;

use mallard_core::{
    config::Config, dispatch::Dispatcher, ledger::OwnershipLedger, limiter::RateLimiter,
};
use mallard_ddg::{DdgClient, RedirectClient};
use mallard_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> Result<(), mallard_core::Error> {
    mallard_core::logging::init("mallard")?;

    let cfg = Arc::new(Config::load()?);

    let bot = Bot::new(cfg.bot_token.clone());
    let messenger = Arc::new(TelegramMessenger::new(bot.clone()));
    let search = Arc::new(DdgClient::new()?);
    let redirect = Arc::new(RedirectClient::new()?);

    let dispatcher = Arc::new(Dispatcher::new(
        RateLimiter::new(cfg.rate_limit_count, cfg.rate_limit_window)?,
        OwnershipLedger::new(cfg.ledger_capacity)?,
        search,
        redirect,
        messenger,
        cfg.color,
    ));

    mallard_telegram::router::run_polling(bot, cfg, dispatcher)
        .await
        .map_err(|e| mallard_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
