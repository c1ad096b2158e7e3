use std::sync::OnceLock;

use regex::Regex;

fn mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^@([A-Za-z0-9_]{1,32})$").expect("valid mention regex"))
}

/// Pull the query text out of a raw message, if the message is addressed to
/// the bot at all.
///
/// The first whitespace token must be either a platform mention of the bot
/// (`@username`, compared case-insensitively) or one of the configured
/// aliases; the rest of the message is the query. Anything else, including a
/// mention with nothing after it, is not a query.
pub fn extract_query(text: &str, bot_username: &str, aliases: &[String]) -> Option<String> {
    let mut parts = text.split_whitespace();
    let lead = parts.next()?;
    let query = parts.collect::<Vec<_>>().join(" ");
    if query.is_empty() {
        return None;
    }

    if let Some(captures) = mention_re().captures(lead) {
        if captures[1].eq_ignore_ascii_case(bot_username) {
            return Some(query);
        }
    }

    if aliases.iter().any(|alias| alias.eq_ignore_ascii_case(lead)) {
        return Some(query);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> Vec<String> {
        vec!["@ddg".to_string(), "@duck".to_string()]
    }

    #[test]
    fn extracts_query_after_bot_mention() {
        assert_eq!(
            extract_query("@mallard_bot rust language", "mallard_bot", &aliases()),
            Some("rust language".to_string())
        );
        assert_eq!(
            extract_query("@Mallard_Bot rust", "mallard_bot", &aliases()),
            Some("rust".to_string())
        );
    }

    #[test]
    fn extracts_query_after_alias() {
        assert_eq!(
            extract_query("@ddg what is a duck", "mallard_bot", &aliases()),
            Some("what is a duck".to_string())
        );
        assert_eq!(
            extract_query("@DUCK pond", "mallard_bot", &aliases()),
            Some("pond".to_string())
        );
    }

    #[test]
    fn ignores_unaddressed_messages() {
        assert_eq!(extract_query("just chatting", "mallard_bot", &aliases()), None);
        assert_eq!(extract_query("@someone_else hi", "mallard_bot", &aliases()), None);
        assert_eq!(extract_query("", "mallard_bot", &aliases()), None);
    }

    #[test]
    fn mention_without_query_is_not_a_query() {
        assert_eq!(extract_query("@mallard_bot", "mallard_bot", &aliases()), None);
        assert_eq!(extract_query("@ddg   ", "mallard_bot", &aliases()), None);
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(
            extract_query("@ddg   spaced   out ", "mallard_bot", &aliases()),
            Some("spaced out".to_string())
        );
    }
}
