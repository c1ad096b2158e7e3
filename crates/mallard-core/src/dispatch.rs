use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::{
    domain::{ChatId, MessageRef, QueryRequest, RetractIntent, UserId},
    ledger::OwnershipLedger,
    limiter::RateLimiter,
    palette::Color,
    Error, Result,
};

/// Port for the instant-answer search backend.
///
/// `Err(Error::NoResults)` means the query produced nothing; any other error
/// is an unexpected search failure.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn instant_answer(&self, query: &str) -> Result<String>;
}

/// Port for resolving redirect-only answers to their final URL. Failure is
/// `None`; the caller keeps the original payload.
#[async_trait]
pub trait RedirectResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Option<String>;
}

/// The fixed set of user-visible bodies a query can produce. Diagnostic
/// detail for failures goes to the log, never into `SearchFailed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseBody {
    Answer(String),
    NoResults,
    SearchFailed,
}

/// A normalized response ready for presentation.
#[derive(Clone, Debug)]
pub struct QueryResponse {
    pub query: String,
    pub body: ResponseBody,
    pub requester: UserId,
    pub requester_name: String,
    pub color: Color,
}

/// Presentation port (the chat platform adapter).
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post the response into `chat` and return a reference to whatever
    /// message was created, so ownership can be recorded.
    async fn present(&self, chat: ChatId, response: &QueryResponse) -> Result<MessageRef>;

    /// Lightweight, non-textual acknowledgement that `message` was throttled.
    async fn acknowledge_throttled(&self, message: MessageRef) -> Result<()>;

    /// Delete a previously produced response.
    async fn retract(&self, message: MessageRef) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryOutcome {
    Throttled,
    Answered { response: MessageRef },
    NoResults { response: MessageRef },
    SearchFailed { response: MessageRef },
}

/// Sequences the rate limiter and the ownership ledger around one external
/// search call per query.
///
/// Both pieces of shared state live behind their own mutex; neither lock is
/// ever held across a collaborator await. Admission is decided before the
/// search call and is not rolled back if the search then fails, so retry
/// storms cannot evade the limit.
pub struct Dispatcher {
    limiter: Mutex<RateLimiter>,
    ledger: Mutex<OwnershipLedger>,
    search: Arc<dyn SearchClient>,
    redirect: Arc<dyn RedirectResolver>,
    messenger: Arc<dyn Messenger>,
    color: Color,
}

impl Dispatcher {
    pub fn new(
        limiter: RateLimiter,
        ledger: OwnershipLedger,
        search: Arc<dyn SearchClient>,
        redirect: Arc<dyn RedirectResolver>,
        messenger: Arc<dyn Messenger>,
        color: Color,
    ) -> Self {
        Self {
            limiter: Mutex::new(limiter),
            ledger: Mutex::new(ledger),
            search,
            redirect,
            messenger,
            color,
        }
    }

    /// Run one query through admission, search, and presentation. Per-query
    /// search errors are converted to presentation outcomes here and never
    /// propagate; an `Err` from this method is a messenger failure.
    pub async fn handle_query(&self, req: QueryRequest) -> Result<QueryOutcome> {
        let chat = req.chat_id();

        let admitted = { self.limiter.lock().await.admit(chat) };
        if !admitted {
            debug!(chat_id = chat.0, "query throttled");
            self.messenger.acknowledge_throttled(req.message).await?;
            return Ok(QueryOutcome::Throttled);
        }

        info!(chat_id = chat.0, "searching: '{}'", req.text);

        let body = match self.search.instant_answer(&req.text).await {
            Ok(answer) => {
                let answer = if looks_like_bare_url(&answer) {
                    self.redirect
                        .resolve(&answer)
                        .await
                        .unwrap_or_else(|| answer.clone())
                } else {
                    answer
                };
                ResponseBody::Answer(answer)
            }
            Err(Error::NoResults) => ResponseBody::NoResults,
            Err(e) => {
                error!(chat_id = chat.0, "search failed: {e}");
                ResponseBody::SearchFailed
            }
        };

        let response = QueryResponse {
            query: req.text.replace('`', "'"),
            body,
            requester: req.requester,
            requester_name: req.requester_name.clone(),
            color: self.color,
        };

        let sent = self.messenger.present(chat, &response).await?;

        // Every message the bot produced for this requester is retractable,
        // including "no results" and failure notices.
        self.ledger.lock().await.record(sent, req.requester);

        Ok(match response.body {
            ResponseBody::Answer(_) => QueryOutcome::Answered { response: sent },
            ResponseBody::NoResults => QueryOutcome::NoResults { response: sent },
            ResponseBody::SearchFailed => QueryOutcome::SearchFailed { response: sent },
        })
    }

    /// Service a retraction intent. A pair that is not in the ledger (wrong
    /// user, evicted, or already removed) is a silent no-op. The ledger
    /// entry survives a failed delete so the requester can try again.
    pub async fn handle_retraction(&self, intent: RetractIntent) -> Result<()> {
        let owned = {
            self.ledger
                .lock()
                .await
                .contains(intent.response, intent.requester)
        };
        if !owned {
            debug!(
                message_id = intent.response.message_id.0,
                "retraction ignored: requester does not own this response"
            );
            return Ok(());
        }

        self.messenger.retract(intent.response).await?;
        self.ledger
            .lock()
            .await
            .remove(intent.response, intent.requester);
        Ok(())
    }
}

fn looks_like_bare_url(text: &str) -> bool {
    (text.starts_with("http://") || text.starts_with("https://"))
        && !text.chars().any(char::is_whitespace)
}
