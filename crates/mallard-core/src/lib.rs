//! Core domain + application logic for mallard, a DuckDuckGo instant-answers
//! chat bot.
//!
//! This crate is intentionally framework-agnostic. The chat platform, the
//! search API, and redirect resolution live behind ports (traits) implemented
//! in adapter crates.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod limiter;
pub mod logging;
pub mod mentions;
pub mod palette;

pub use errors::{Error, Result};
