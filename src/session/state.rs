use serde::{Deserialize, Serialize};

use crate::utils::AdvisorError;

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label shown next to the message in the transcript
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::User => "Você",
            Self::Assistant => "Assistente",
        }
    }
}

/// One entry of the transcript. Never modified once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// In-memory state of one user's interaction.
///
/// The counter is only advanced through [`Session::record_exchange`], which
/// appends the question and the answer together, so a session never holds a
/// question without its answer.
#[derive(Debug, Clone, Default)]
pub struct Session {
    name: String,
    messages: Vec<Message>,
    questions_asked: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Set the display name. The first non-empty value wins.
    pub fn set_name(&mut self, name: &str) -> Result<(), AdvisorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdvisorError::InvalidInput("name must not be empty".to_string()));
        }
        if self.has_name() {
            return Err(AdvisorError::InvalidInput(format!(
                "name is already set to '{}'",
                self.name
            )));
        }
        self.name = name.to_string();
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    /// Append one message to the transcript
    pub fn append_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    /// Append a completed question/answer pair and count it
    pub(crate) fn record_exchange(&mut self, question: &str, answer: &str) {
        self.append_message(Role::User, question);
        self.append_message(Role::Assistant, answer);
        self.questions_asked += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.name(), "");
        assert!(session.messages().is_empty());
        assert_eq!(session.questions_asked(), 0);
    }

    #[test]
    fn test_name_is_set_once() {
        let mut session = Session::new();
        session.set_name("Ana").unwrap();
        assert_eq!(session.name(), "Ana");

        let err = session.set_name("Bruno").unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidInput(_)));
        assert_eq!(session.name(), "Ana");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut session = Session::new();
        assert!(matches!(
            session.set_name("   "),
            Err(AdvisorError::InvalidInput(_))
        ));
        assert!(!session.has_name());

        // A rejected attempt does not use up the single assignment
        session.set_name(" Ana ").unwrap();
        assert_eq!(session.name(), "Ana");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut session = Session::new();
        session.append_message(Role::User, "first");
        session.append_message(Role::Assistant, "second");
        session.append_message(Role::User, "third");

        let contents: Vec<&str> = session.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_record_exchange_appends_pair_and_counts() {
        let mut session = Session::new();
        session.record_exchange("Q", "A");

        assert_eq!(session.questions_asked(), 1);
        assert_eq!(
            session.messages(),
            &[Message::new(Role::User, "Q"), Message::new(Role::Assistant, "A")]
        );
    }
}
