use chrono::Utc;

use mallard_core::dispatch::{QueryResponse, ResponseBody};

/// Leave headroom under Telegram's 4096-char message limit for the title
/// and footer.
const MAX_ANSWER_LEN: usize = 3500;

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Render a normalized response as Telegram HTML. Failure bodies carry no
/// diagnostic detail; that lives in the logs.
pub fn render_response(response: &QueryResponse) -> String {
    let title = format!(
        "<b>DuckDuckGo: <code>{}</code></b>",
        escape_html(&response.query)
    );
    let footer = format!(
        "<i>Searched by <a href=\"tg://user?id={}\">{}</a> at {}</i>",
        response.requester.0,
        escape_html(&response.requester_name),
        Utc::now().format("%H:%M UTC"),
    );

    match &response.body {
        ResponseBody::Answer(text) => {
            let body = escape_html(&truncate(text, MAX_ANSWER_LEN));
            format!("{title}\n\n{body}\n\n{footer}")
        }
        ResponseBody::NoResults => {
            format!("{title}\n\nNo results found.\n\n{footer}")
        }
        ResponseBody::SearchFailed => {
            format!(
                "<b>\u{1f986}\u{1f4a2} Something went wrong!</b>\n\n\
                 The search failed. Please try again later.\n\n{footer}"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mallard_core::{domain::UserId, palette::Color};

    fn response(body: ResponseBody) -> QueryResponse {
        QueryResponse {
            query: "rust <lang>".to_string(),
            body,
            requester: UserId(42),
            requester_name: "@tester".to_string(),
            color: Color::default(),
        }
    }

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(escape_html("a < b & c > \"d\""), "a &lt; b &amp; c &gt; &quot;d&quot;");
    }

    #[test]
    fn answer_rendering_escapes_query_and_body() {
        let html = render_response(&response(ResponseBody::Answer("x <b> y".to_string())));
        assert!(html.contains("<code>rust &lt;lang&gt;</code>"));
        assert!(html.contains("x &lt;b&gt; y"));
        assert!(html.contains("tg://user?id=42"));
    }

    #[test]
    fn no_results_rendering_mentions_the_query() {
        let html = render_response(&response(ResponseBody::NoResults));
        assert!(html.contains("No results found."));
        assert!(html.contains("rust &lt;lang&gt;"));
    }

    #[test]
    fn failure_rendering_carries_no_diagnostics() {
        let html = render_response(&response(ResponseBody::SearchFailed));
        assert!(html.contains("Something went wrong!"));
        // Generic text only; the query title is not repeated and no error
        // detail is included.
        assert!(!html.contains("rust"));
    }

    #[test]
    fn long_answers_are_truncated() {
        let long = "x".repeat(5000);
        let html = render_response(&response(ResponseBody::Answer(long)));
        assert!(html.len() < 4096);
        assert!(html.contains("..."));
    }
}
