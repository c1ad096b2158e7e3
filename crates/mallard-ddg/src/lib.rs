//! DuckDuckGo adapter (reqwest).
//!
//! Implements the `mallard-core` search and redirect-resolution ports over
//! the DuckDuckGo Instant Answer API.

mod client;
mod redirect;

pub use client::DdgClient;
pub use redirect::RedirectClient;
