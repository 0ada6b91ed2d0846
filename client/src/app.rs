use anyhow::Result;
use moviebot_shared::{ChatResponse, Recommendation};

/// Placeholder text shown while an exchange is in flight.
pub const THINKING_TEXT: &str = "Thinking…";

/// Fixed message appended when an exchange fails.
pub const FAILURE_TEXT: &str = "Something went wrong calling the server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// One transcript entry. Entries are append-only, except the pending
/// placeholder, which is resolved in place once its reply arrives.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub pending: bool,
}

impl Message {
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            pending: false,
        }
    }

    fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            pending: false,
        }
    }
}

pub struct App {
    pub transcript: Vec<Message>,
    pub recommendations: Vec<Recommendation>,
    pub input: String,
    pub input_enabled: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            recommendations: Vec::new(),
            input: String::new(),
            input_enabled: true,
        }
    }

    /// Takes the current input buffer and starts one exchange: append the
    /// user message, clear the buffer, disable input and append the pending
    /// placeholder. Returns the trimmed text for the caller to dispatch.
    ///
    /// Whitespace-only input is a silent no-op. There is no in-flight
    /// guard here: invoking this while an exchange is pending starts a
    /// second, racing exchange.
    pub fn submit(&mut self) -> Option<String> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }

        self.transcript.push(Message::user(text.clone()));
        self.input.clear();
        self.input_enabled = false;
        self.transcript.push(Message {
            role: Role::Bot,
            text: THINKING_TEXT.to_string(),
            pending: true,
        });

        Some(text)
    }

    /// Applies a settled exchange. On success the reply resolves the
    /// placeholder in place when the transcript tail is a bot entry, and is
    /// appended otherwise; the recommendation list is replaced wholesale.
    /// On failure the fixed fallback message is appended and the
    /// placeholder is left as-is (a known cosmetic gap). Either way, input
    /// is re-enabled.
    pub fn on_response(&mut self, result: Result<ChatResponse>) {
        match result {
            Ok(response) => {
                match self.transcript.last_mut() {
                    Some(last) if last.role == Role::Bot => {
                        last.text = response.reply;
                        last.pending = false;
                    }
                    _ => self.transcript.push(Message::bot(response.reply)),
                }
                self.recommendations = response.recommendations;
            }
            Err(err) => {
                tracing::warn!("Chat exchange failed: {:#}", err);
                self.transcript.push(Message::bot(FAILURE_TEXT));
            }
        }
        self.input_enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn response(reply: &str, recommendations: Vec<Recommendation>) -> ChatResponse {
        ChatResponse {
            reply: reply.to_string(),
            recommendations,
        }
    }

    #[test]
    fn whitespace_only_input_is_a_no_op() {
        let mut app = App::new();
        app.input = "   \t ".to_string();

        assert_eq!(app.submit(), None);
        assert!(app.transcript.is_empty());
        assert!(app.input_enabled);
        // The buffer is not cleared either.
        assert_eq!(app.input, "   \t ");
    }

    #[test]
    fn submit_appends_user_message_and_placeholder() {
        let mut app = App::new();
        app.input = "  something upbeat  ".to_string();

        let sent = app.submit();

        assert_eq!(sent.as_deref(), Some("something upbeat"));
        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript[0].role, Role::User);
        assert_eq!(app.transcript[0].text, "something upbeat");
        assert_eq!(app.transcript[1].role, Role::Bot);
        assert_eq!(app.transcript[1].text, THINKING_TEXT);
        assert!(app.transcript[1].pending);
        assert!(app.input.is_empty());
        assert!(!app.input_enabled);
    }

    #[test]
    fn reply_resolves_the_placeholder_in_place() {
        let mut app = App::new();
        app.input = "hi".to_string();
        app.submit();

        app.on_response(Ok(response(
            "hello!",
            vec![Recommendation {
                title: Some("Up".to_string()),
                ..Default::default()
            }],
        )));

        // Mutated, not appended.
        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript[1].text, "hello!");
        assert!(!app.transcript[1].pending);
        assert_eq!(app.recommendations.len(), 1);
        assert!(app.input_enabled);
    }

    #[test]
    fn reply_appends_when_tail_is_not_a_bot_entry() {
        let mut app = App::new();
        app.transcript.push(Message::user("dangling"));

        app.on_response(Ok(response("hello!", vec![])));

        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript[1].role, Role::Bot);
        assert_eq!(app.transcript[1].text, "hello!");
    }

    #[test]
    fn failure_appends_fallback_and_leaves_placeholder_stuck() {
        let mut app = App::new();
        app.input = "hi".to_string();
        app.submit();

        app.on_response(Err(anyhow!("connection refused")));

        assert_eq!(app.transcript.len(), 3);
        assert_eq!(app.transcript[1].text, THINKING_TEXT);
        assert!(app.transcript[1].pending);
        assert_eq!(app.transcript[2].role, Role::Bot);
        assert_eq!(app.transcript[2].text, FAILURE_TEXT);
        assert!(app.input_enabled);
        assert!(app.recommendations.is_empty());
    }

    #[test]
    fn each_response_replaces_the_whole_list() {
        let mut app = App::new();
        app.recommendations = vec![Recommendation::default(); 3];
        app.input = "more".to_string();
        app.submit();

        app.on_response(Ok(response("sure", vec![Recommendation::default()])));

        assert_eq!(app.recommendations.len(), 1);
    }

    #[test]
    fn overlapping_submits_each_start_an_exchange() {
        // There is deliberately no in-flight guard. A second submit while
        // one is pending stacks a second placeholder; replies resolve
        // against whatever the tail is at arrival time.
        let mut app = App::new();
        app.input = "first".to_string();
        assert!(app.submit().is_some());
        app.input = "second".to_string();
        assert!(app.submit().is_some());

        assert_eq!(app.transcript.len(), 4);
        assert!(app.transcript[1].pending);
        assert!(app.transcript[3].pending);
    }
}
