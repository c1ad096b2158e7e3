use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use mallard_core::{dispatch::RedirectResolver, errors::Error, Result};

/// Resolves redirect-only answers to their final URL.
///
/// The Instant Answer API sometimes returns a link to a redirect page
/// instead of the destination (e.g. `!aw systemd`); showing the user the
/// final URL is nicer. Any failure simply yields `None` and the caller
/// keeps the original payload.
#[derive(Clone, Debug)]
pub struct RedirectClient {
    http: reqwest::Client,
}

impl RedirectClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Search(format!("failed to build http client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl RedirectResolver for RedirectClient {
    async fn resolve(&self, url: &str) -> Option<String> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return None;
        }

        match self.http.get(url).send().await {
            // reqwest follows redirects by default; the response URL is the
            // final destination.
            Ok(resp) => Some(resp.url().to_string()),
            Err(e) => {
                debug!("redirect resolution failed for '{url}': {e}");
                None
            }
        }
    }
}
