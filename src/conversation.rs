//! Conversation state for the chat widget. Pure data plus transitions; the
//! component owns one of these behind a signal and drives it from events.

use crate::citations::SourceCitation;

/// Shown as the bot reply whenever the ask request fails for any reason.
pub const ERROR_REPLY: &str = "Sorry, there was an error processing your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Stable render key, unique within the conversation.
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    /// Sources cited by a bot reply; always empty for user messages.
    pub citations: Vec<SourceCitation>,
    pub timestamp: String,
}

/// Handle for one submission. Completions carry the id they were issued
/// for, and only the most recent id may still change the conversation, so
/// a resubmission quietly orphans whatever the previous request returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(u64);

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    pub messages: Vec<Message>,
    /// True from submission until the matching completion lands.
    pub pending: bool,
    pub follow_ups: Vec<String>,
    next_message_id: u64,
    latest_request: u64,
    completed: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a question. Blank input is a no-op and returns `None`;
    /// otherwise the user message is appended, stale follow-ups clear, and
    /// the caller gets the id to complete later.
    pub fn begin_question(&mut self, text: &str, timestamp: String) -> Option<RequestId> {
        let question = text.trim();
        if question.is_empty() {
            return None;
        }

        self.push(Sender::User, question.to_string(), Vec::new(), timestamp);
        self.follow_ups.clear();
        self.pending = true;
        self.completed = false;
        self.latest_request += 1;
        Some(RequestId(self.latest_request))
    }

    /// Append the bot reply for `id`. Returns false without touching the
    /// conversation when the request has been superseded or already settled.
    pub fn answer_arrived(
        &mut self,
        id: RequestId,
        text: String,
        citations: Vec<SourceCitation>,
        timestamp: String,
    ) -> bool {
        if !self.can_settle(id) {
            return false;
        }
        self.pending = false;
        self.completed = true;
        self.push(Sender::Bot, text, citations, timestamp);
        true
    }

    /// Append the fixed error reply for `id`, under the same guard as
    /// [`Conversation::answer_arrived`].
    pub fn answer_failed(&mut self, id: RequestId, timestamp: String) -> bool {
        if !self.can_settle(id) {
            return false;
        }
        self.pending = false;
        self.completed = true;
        self.push(Sender::Bot, ERROR_REPLY.to_string(), Vec::new(), timestamp);
        true
    }

    /// Replace the suggested follow-ups, keeping at most `limit` of them.
    /// Ignored when `id` is no longer the live request.
    pub fn set_follow_ups(
        &mut self,
        id: RequestId,
        questions: Vec<String>,
        limit: Option<usize>,
    ) -> bool {
        if !self.is_latest(id) {
            return false;
        }
        self.follow_ups = match limit {
            Some(n) => questions.into_iter().take(n).collect(),
            None => questions,
        };
        true
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        id.0 == self.latest_request
    }

    fn can_settle(&self, id: RequestId) -> bool {
        self.is_latest(id) && !self.completed
    }

    fn push(
        &mut self,
        sender: Sender,
        text: String,
        citations: Vec<SourceCitation>,
        timestamp: String,
    ) {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(Message {
            id,
            sender,
            text,
            citations,
            timestamp,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citations::SourceKind;

    fn citation(file: &str, page: u32) -> SourceCitation {
        SourceCitation {
            index: 1,
            kind: SourceKind::Text,
            file_name: file.to_string(),
            page,
            note: None,
        }
    }

    fn ts() -> String {
        String::new()
    }

    #[test]
    fn blank_question_is_ignored() {
        let mut convo = Conversation::new();
        assert_eq!(convo.begin_question("", ts()), None);
        assert_eq!(convo.begin_question("   \n ", ts()), None);
        assert!(convo.messages.is_empty());
        assert!(!convo.pending);
    }

    #[test]
    fn question_appends_user_message_and_pends() {
        let mut convo = Conversation::new();
        let id = convo.begin_question("  what is CMP?  ", ts());
        assert!(id.is_some());
        assert!(convo.pending);
        assert_eq!(convo.messages.len(), 1);
        assert_eq!(convo.messages[0].sender, Sender::User);
        assert_eq!(convo.messages[0].text, "what is CMP?");
    }

    #[test]
    fn answer_lands_after_the_question() {
        let mut convo = Conversation::new();
        let id = convo.begin_question("how does etching work?", ts()).unwrap();
        assert!(convo.answer_arrived(
            id,
            "Plasma removes material selectively.".to_string(),
            vec![citation("etch.pdf", 3)],
            ts(),
        ));
        assert!(!convo.pending);
        assert_eq!(convo.messages.len(), 2);
        assert_eq!(convo.messages[1].sender, Sender::Bot);
        assert_eq!(convo.messages[1].citations.len(), 1);
    }

    #[test]
    fn failure_appends_exactly_one_apology() {
        let mut convo = Conversation::new();
        let id = convo.begin_question("anything", ts()).unwrap();
        assert!(convo.answer_failed(id, ts()));
        assert!(!convo.pending);

        let apologies: Vec<_> = convo
            .messages
            .iter()
            .filter(|m| m.text == ERROR_REPLY)
            .collect();
        assert_eq!(apologies.len(), 1);
        assert!(apologies[0].citations.is_empty());
    }

    #[test]
    fn completion_applies_once() {
        let mut convo = Conversation::new();
        let id = convo.begin_question("q", ts()).unwrap();
        assert!(convo.answer_arrived(id, "a".to_string(), Vec::new(), ts()));
        assert!(!convo.answer_arrived(id, "again".to_string(), Vec::new(), ts()));
        assert!(!convo.answer_failed(id, ts()));
        assert_eq!(convo.messages.len(), 2);
    }

    #[test]
    fn superseded_answer_is_discarded() {
        let mut convo = Conversation::new();
        let first = convo.begin_question("first", ts()).unwrap();
        let second = convo.begin_question("second", ts()).unwrap();

        assert!(!convo.answer_arrived(first, "late".to_string(), Vec::new(), ts()));
        assert!(convo.pending, "the live request is still in flight");
        assert_eq!(convo.messages.len(), 2);

        assert!(convo.answer_arrived(second, "current".to_string(), Vec::new(), ts()));
        assert_eq!(convo.messages.last().unwrap().text, "current");
    }

    #[test]
    fn superseded_failure_is_discarded() {
        let mut convo = Conversation::new();
        let first = convo.begin_question("first", ts()).unwrap();
        let second = convo.begin_question("second", ts()).unwrap();

        assert!(!convo.answer_failed(first, ts()));
        assert!(convo.messages.iter().all(|m| m.text != ERROR_REPLY));
        assert!(convo.answer_arrived(second, "fine".to_string(), Vec::new(), ts()));
    }

    #[test]
    fn follow_ups_respect_the_limit() {
        let mut convo = Conversation::new();
        let id = convo.begin_question("q", ts()).unwrap();
        convo.answer_arrived(id, "a".to_string(), Vec::new(), ts());

        let questions: Vec<String> = ["one", "two", "three"]
            .iter()
            .map(|q| q.to_string())
            .collect();
        assert!(convo.set_follow_ups(id, questions.clone(), Some(2)));
        assert_eq!(convo.follow_ups, vec!["one", "two"]);

        assert!(convo.set_follow_ups(id, questions, None));
        assert_eq!(convo.follow_ups.len(), 3);
    }

    #[test]
    fn follow_ups_for_a_superseded_request_are_ignored() {
        let mut convo = Conversation::new();
        let first = convo.begin_question("first", ts()).unwrap();
        let _second = convo.begin_question("second", ts()).unwrap();

        assert!(!convo.set_follow_ups(first, vec!["old".to_string()], None));
        assert!(convo.follow_ups.is_empty());
    }

    #[test]
    fn next_question_clears_follow_ups() {
        let mut convo = Conversation::new();
        let id = convo.begin_question("q", ts()).unwrap();
        convo.answer_arrived(id, "a".to_string(), Vec::new(), ts());
        convo.set_follow_ups(id, vec!["next?".to_string()], None);
        assert!(!convo.follow_ups.is_empty());

        convo.begin_question("next?", ts());
        assert!(convo.follow_ups.is_empty());
    }

    #[test]
    fn message_ids_are_unique_and_ordered() {
        let mut convo = Conversation::new();
        let a = convo.begin_question("one", ts()).unwrap();
        convo.answer_arrived(a, "reply".to_string(), Vec::new(), ts());
        let b = convo.begin_question("two", ts()).unwrap();
        convo.answer_failed(b, ts());

        let ids: Vec<u64> = convo.messages.iter().map(|m| m.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }
}
