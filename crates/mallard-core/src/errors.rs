/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the dispatcher
/// can classify failures consistently (no-results vs search failure vs
/// platform failure). Throttle refusals and ledger misses are deliberately
/// not errors; they are expected outcomes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("no results")]
    NoResults,

    #[error("search error: {0}")]
    Search(String),

    #[error("external error: {0}")]
    External(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
