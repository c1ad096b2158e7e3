use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, ledger::DEFAULT_LEDGER_CAPACITY, palette::Color, Result};

/// Typed configuration for the bot.
///
/// Loaded from environment variables, with an optional `.env` file that
/// never overrides existing env. Credential and rate-limit settings are
/// required; the bot refuses to start without them. Mention aliases and the
/// display color are optional with sensible defaults.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,

    // Rate limiting (required)
    pub rate_limit_count: u32,
    pub rate_limit_window: Duration,

    // Ownership ledger
    pub ledger_capacity: usize,

    // Presentation
    pub mentions: Vec<String>,
    pub color: Color,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("MALLARD_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("MALLARD_BOT_TOKEN environment variable is required".to_string())
            })?;

        let rate_limit_count = env_u32("MALLARD_RATE_LIMIT_COUNT").ok_or_else(|| {
            Error::Config("MALLARD_RATE_LIMIT_COUNT environment variable is required".to_string())
        })?;
        if rate_limit_count == 0 {
            return Err(Error::Config(
                "MALLARD_RATE_LIMIT_COUNT must be positive".to_string(),
            ));
        }

        let window_secs = env_u64("MALLARD_RATE_LIMIT_WINDOW_SECS").ok_or_else(|| {
            Error::Config(
                "MALLARD_RATE_LIMIT_WINDOW_SECS environment variable is required".to_string(),
            )
        })?;
        if window_secs == 0 {
            return Err(Error::Config(
                "MALLARD_RATE_LIMIT_WINDOW_SECS must be positive".to_string(),
            ));
        }
        let rate_limit_window = Duration::from_secs(window_secs);

        let ledger_capacity =
            env_usize("MALLARD_LEDGER_CAPACITY").unwrap_or(DEFAULT_LEDGER_CAPACITY);
        if ledger_capacity == 0 {
            return Err(Error::Config(
                "MALLARD_LEDGER_CAPACITY must be positive".to_string(),
            ));
        }

        let mentions =
            parse_csv(env_str("MALLARD_MENTIONS").or_else(|| Some("@ddg,@duck".to_string())));

        let color = match env_str("MALLARD_COLOR").and_then(non_empty) {
            Some(raw) => Color::parse(&raw),
            None => Color::default(),
        };

        Ok(Self {
            bot_token,
            rate_limit_count,
            rate_limit_window,
            ledger_capacity,
            mentions,
            color,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_u32(key: &str) -> Option<u32> {
    env_str(key).and_then(|s| s.trim().parse::<u32>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn parse_csv(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
