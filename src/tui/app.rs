use std::cell::Cell;

use chrono::Local;
use tracing::warn;

use crate::runtime::{Advisor, AskOutcome};
use crate::session::{Session, SessionStore};

/// Which screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for the user's name
    NamePrompt,
    /// Asking questions
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// Transient message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Application state
pub struct App {
    /// Question flow shared by every session
    pub advisor: Advisor,
    /// Sessions of this surface, keyed by connection
    sessions: SessionStore,
    /// Key of the session this terminal drives
    session_key: String,
    /// User input buffer
    pub input: String,
    /// Highlighted suggested question
    pub selected_question: usize,
    /// Rows scrolled up from the bottom of the transcript
    pub scroll_offset: u16,
    /// Furthest the transcript can scroll, as of the last draw
    max_scroll: Cell<u16>,
    /// Status bar message
    pub notice: Option<Notice>,
    /// Is a request in flight?
    pub is_generating: bool,
    /// Is the app running?
    pub running: bool,
}

impl App {
    pub fn new(advisor: Advisor, session_key: impl Into<String>) -> Self {
        let session_key = session_key.into();
        let mut sessions = SessionStore::new();
        sessions.get_or_init(&session_key);

        Self {
            advisor,
            sessions,
            session_key,
            input: String::new(),
            selected_question: 0,
            scroll_offset: 0,
            max_scroll: Cell::new(0),
            notice: None,
            is_generating: false,
            running: true,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.sessions.get(&self.session_key)
    }

    fn session_mut(&mut self) -> &mut Session {
        self.sessions.get_or_init(&self.session_key)
    }

    pub fn screen(&self) -> Screen {
        match self.session() {
            Some(session) if session.has_name() => Screen::Chat,
            _ => Screen::NamePrompt,
        }
    }

    /// Whether the session can still ask questions
    pub fn can_ask(&self) -> bool {
        self.session()
            .map(|s| self.advisor.gate().check(s).allows_request())
            .unwrap_or(true)
    }

    pub fn set_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice::new(level, text));
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn delete_char(&mut self) {
        self.input.pop();
    }

    /// Use the typed text as the name
    pub fn submit_name(&mut self) {
        let name = std::mem::take(&mut self.input);
        match self.session_mut().set_name(&name) {
            Ok(()) => self.clear_notice(),
            Err(e) => {
                self.input = name;
                self.set_notice(NoticeLevel::Error, e.to_string());
            }
        }
    }

    /// Free text wins over the highlighted suggestion
    pub fn pending_question(&self) -> Option<String> {
        if !self.input.trim().is_empty() {
            return Some(self.input.clone());
        }
        self.advisor
            .profile()
            .suggested_questions
            .get(self.selected_question)
            .map(|q| q.to_string())
    }

    /// Send the pending question and record the outcome as a notice
    pub async fn submit_question(&mut self) {
        let Some(question) = self.pending_question() else {
            return;
        };

        let session = self.sessions.get_or_init(&self.session_key);
        match self.advisor.ask(session, &question).await {
            Ok(AskOutcome::Answered { .. }) => {
                self.input.clear();
                self.scroll_offset = 0;
                let session = self.sessions.get_or_init(&self.session_key);
                match self.advisor.notice(session) {
                    Some(text) => self.set_notice(NoticeLevel::Warning, text),
                    None => self.clear_notice(),
                }
            }
            Ok(AskOutcome::QuotaExhausted { message }) => {
                self.set_notice(NoticeLevel::Warning, message);
            }
            Err(e) => {
                self.set_notice(NoticeLevel::Error, format!("Erro ao chamar o modelo: {}", e));
            }
        }
    }

    /// Export the transcript
    pub fn save(&mut self) {
        let result = match self.session() {
            Some(session) => self.advisor.save(session),
            None => return,
        };

        match result {
            Ok(()) => {
                let path = self.advisor.exporter().path().display().to_string();
                self.set_notice(
                    NoticeLevel::Success,
                    format!(
                        "Conversa salva com sucesso em {} às {}",
                        path,
                        Local::now().format("%H:%M")
                    ),
                );
            }
            Err(e) => {
                warn!("Failed to save conversation: {}", e);
                self.set_notice(NoticeLevel::Error, format!("Erro ao salvar a conversa: {}", e));
            }
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_question = self.selected_question.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let count = self.advisor.profile().suggested_questions.len();
        if self.selected_question + 1 < count {
            self.selected_question += 1;
        }
    }

    /// Scroll the transcript towards older messages
    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(amount)
            .min(self.max_scroll.get());
    }

    /// Record how far the rendered transcript can scroll
    pub(crate) fn set_max_scroll(&self, rows: u16) {
        self.max_scroll.set(rows);
    }

    /// Scroll the transcript towards the latest message
    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
