use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use mallard_core::{dispatch::SearchClient, errors::Error, Result};

const DDG_ENDPOINT: &str = "https://api.duckduckgo.com/";
const USER_AGENT: &str = concat!("mallard/", env!("CARGO_PKG_VERSION"));

/// DuckDuckGo Instant Answer client.
#[derive(Clone, Debug)]
pub struct DdgClient {
    http: reqwest::Client,
    endpoint: String,
}

impl DdgClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DDG_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Search(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }
}

/// The subset of the Instant Answer payload we read. Everything defaults to
/// empty; DDG omits fields freely.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InstantAnswer {
    #[serde(rename = "Answer")]
    answer: String,
    #[serde(rename = "AbstractText")]
    abstract_text: String,
    #[serde(rename = "Definition")]
    definition: String,
    #[serde(rename = "Redirect")]
    redirect: String,
    #[serde(rename = "RelatedTopics")]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RelatedTopic {
    #[serde(rename = "Text")]
    text: String,
    // Disambiguation pages nest topics one level deeper.
    #[serde(rename = "Topics")]
    topics: Vec<RelatedTopic>,
}

/// Zero-click-info extraction: direct answer first, then abstract,
/// definition, redirect URL, and finally the first related topic.
fn zci_text(payload: &InstantAnswer) -> Option<String> {
    for candidate in [
        &payload.answer,
        &payload.abstract_text,
        &payload.definition,
        &payload.redirect,
    ] {
        let text = candidate.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }
    first_topic_text(&payload.related_topics)
}

fn first_topic_text(topics: &[RelatedTopic]) -> Option<String> {
    for topic in topics {
        let text = topic.text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
        if let Some(found) = first_topic_text(&topic.topics) {
            return Some(found);
        }
    }
    None
}

#[async_trait]
impl SearchClient for DdgClient {
    async fn instant_answer(&self, query: &str) -> Result<String> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
                ("t", "mallard"),
            ])
            .send()
            .await
            .map_err(|e| Error::Search(format!("instant answer request failed: {e}")))?;

        let resp = resp
            .error_for_status()
            .map_err(|e| Error::Search(format!("instant answer request failed: {e}")))?;

        let payload: InstantAnswer = resp
            .json()
            .await
            .map_err(|e| Error::Search(format!("instant answer payload malformed: {e}")))?;

        zci_text(&payload).ok_or(Error::NoResults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> InstantAnswer {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn prefers_direct_answer() {
        let payload = parse(
            r#"{"Answer": "42", "AbstractText": "The answer to everything", "Definition": "x"}"#,
        );
        assert_eq!(zci_text(&payload), Some("42".to_string()));
    }

    #[test]
    fn falls_back_through_abstract_and_definition() {
        let payload = parse(r#"{"Answer": "", "AbstractText": "Ducks are birds."}"#);
        assert_eq!(zci_text(&payload), Some("Ducks are birds.".to_string()));

        let payload = parse(r#"{"Definition": "duck: a waterbird"}"#);
        assert_eq!(zci_text(&payload), Some("duck: a waterbird".to_string()));
    }

    #[test]
    fn uses_redirect_url_when_text_is_empty() {
        let payload = parse(r#"{"Redirect": "https://en.wikipedia.org/wiki/Systemd"}"#);
        assert_eq!(
            zci_text(&payload),
            Some("https://en.wikipedia.org/wiki/Systemd".to_string())
        );
    }

    #[test]
    fn uses_first_related_topic_as_last_resort() {
        let payload = parse(
            r#"{"RelatedTopics": [
                {"Text": ""},
                {"Topics": [{"Text": "Mallard - A dabbling duck."}]}
            ]}"#,
        );
        assert_eq!(
            zci_text(&payload),
            Some("Mallard - A dabbling duck.".to_string())
        );
    }

    #[test]
    fn empty_payload_means_no_results() {
        assert_eq!(zci_text(&parse("{}")), None);
        assert_eq!(
            zci_text(&parse(r#"{"Answer": "  ", "RelatedTopics": [{"Text": " "}]}"#)),
            None
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let payload = parse(r#"{"Answer": "ok", "Type": "A", "meta": {"src_id": 1}}"#);
        assert_eq!(zci_text(&payload), Some("ok".to_string()));
    }
}
