use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_QUESTION_LIMIT, DEFAULT_QUOTA_WARN_AT};
use crate::session::Session;
use crate::utils::AdvisorError;

/// When the low-quota notice is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningPolicy {
    /// Only while the count equals the threshold. A count that ever skipped
    /// the threshold would never warn.
    #[default]
    Exact,
    /// On every request from the threshold up to the limit
    Range,
}

/// Observable state of a session's quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaState {
    /// Requests proceed without a notice
    Open,
    /// Requests proceed; `remaining` questions are left
    Warning { remaining: u32 },
    /// No further requests are dispatched
    Closed,
}

impl QuotaState {
    pub fn allows_request(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Per-session question quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaGate {
    limit: u32,
    warn_at: u32,
    policy: WarningPolicy,
}

impl Default for QuotaGate {
    fn default() -> Self {
        Self {
            limit: DEFAULT_QUESTION_LIMIT,
            warn_at: DEFAULT_QUOTA_WARN_AT,
            policy: WarningPolicy::Exact,
        }
    }
}

impl QuotaGate {
    pub fn new(limit: u32, warn_at: u32, policy: WarningPolicy) -> Result<Self, AdvisorError> {
        if limit == 0 {
            return Err(AdvisorError::Configuration(
                "quota limit must be at least 1".to_string(),
            ));
        }
        if warn_at >= limit {
            return Err(AdvisorError::Configuration(format!(
                "quota warning threshold ({}) must be below the limit ({})",
                warn_at, limit
            )));
        }
        Ok(Self {
            limit,
            warn_at,
            policy,
        })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn policy(&self) -> WarningPolicy {
        self.policy
    }

    /// Classify a question count
    pub fn state_for(&self, questions_asked: u32) -> QuotaState {
        if questions_asked >= self.limit {
            return QuotaState::Closed;
        }

        let warn = match self.policy {
            WarningPolicy::Exact => questions_asked == self.warn_at,
            WarningPolicy::Range => questions_asked >= self.warn_at,
        };

        if warn {
            QuotaState::Warning {
                remaining: self.limit - questions_asked,
            }
        } else {
            QuotaState::Open
        }
    }

    /// Decide, before a request, what the session may do
    pub fn check(&self, session: &Session) -> QuotaState {
        self.state_for(session.questions_asked())
    }

    pub fn remaining(&self, session: &Session) -> u32 {
        self.limit.saturating_sub(session.questions_asked())
    }

    /// Record a successfully answered question.
    ///
    /// Callers must have checked that the session is not closed.
    pub fn commit(&self, session: &mut Session, question: &str, answer: &str) -> QuotaState {
        debug_assert!(self.check(session).allows_request());
        session.record_exchange(question, answer);
        self.check(session)
    }

    pub fn warning_message(remaining: u32) -> String {
        let noun = if remaining == 1 { "pergunta" } else { "perguntas" };
        format!(
            "Atenção! Você tem apenas mais {} {} antes de finalizar o acesso.",
            remaining, noun
        )
    }

    pub fn exhausted_message(&self) -> String {
        format!(
            "Você atingiu o limite de {} perguntas nesta sessão.",
            self.limit
        )
    }
}
