use tracing::{info, warn};

use crate::app::Config;
use crate::models::{CompletionClient, CompletionRequest};
use crate::profile::DomainProfile;
use crate::prompt::build_prompt;
use crate::quota::{QuotaGate, QuotaState};
use crate::session::{Session, TranscriptExporter};
use crate::utils::AdvisorError;

/// Result of submitting a question
#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    /// The question was answered and recorded
    Answered { answer: String, next: QuotaState },
    /// The session has no questions left; nothing was sent or recorded
    QuotaExhausted { message: String },
}

/// One question/answer interaction: quota check, prompt, completion, record.
///
/// The advisor holds no per-user state; every call receives the session it
/// acts on.
pub struct Advisor {
    profile: &'static DomainProfile,
    model: String,
    gate: QuotaGate,
    client: Box<dyn CompletionClient>,
    exporter: TranscriptExporter,
}

impl Advisor {
    pub fn new(
        profile: &'static DomainProfile,
        model: impl Into<String>,
        gate: QuotaGate,
        client: Box<dyn CompletionClient>,
        exporter: TranscriptExporter,
    ) -> Self {
        Self {
            profile,
            model: model.into(),
            gate,
            client,
            exporter,
        }
    }

    pub fn from_config(
        config: &Config,
        client: Box<dyn CompletionClient>,
    ) -> Result<Self, AdvisorError> {
        Ok(Self::new(
            config.domain_profile(),
            config.model(),
            config.quota_gate()?,
            client,
            TranscriptExporter::new(config.export.path.clone()),
        ))
    }

    pub fn profile(&self) -> &'static DomainProfile {
        self.profile
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn gate(&self) -> &QuotaGate {
        &self.gate
    }

    pub fn exporter(&self) -> &TranscriptExporter {
        &self.exporter
    }

    /// Notice to show before the next request, if any
    pub fn notice(&self, session: &Session) -> Option<String> {
        match self.gate.check(session) {
            QuotaState::Open => None,
            QuotaState::Warning { remaining } => Some(QuotaGate::warning_message(remaining)),
            QuotaState::Closed => Some(self.gate.exhausted_message()),
        }
    }

    /// Submit a question on behalf of `session`.
    ///
    /// The question is sent and recorded exactly as typed; blank input is
    /// rejected. On any error the session is left exactly as it was.
    pub async fn ask(
        &self,
        session: &mut Session,
        question: &str,
    ) -> Result<AskOutcome, AdvisorError> {
        if question.trim().is_empty() {
            return Err(AdvisorError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }

        if !self.gate.check(session).allows_request() {
            info!(
                "Quota exhausted after {} questions; request not sent",
                session.questions_asked()
            );
            return Ok(AskOutcome::QuotaExhausted {
                message: self.gate.exhausted_message(),
            });
        }

        let request = CompletionRequest::new(build_prompt(self.profile, question), &self.model);

        let answer = match self.client.complete(&request).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Question not answered: {}", e);
                return Err(e);
            }
        };

        let next = self.gate.commit(session, question, &answer);
        info!(
            "Answered question {}/{}",
            session.questions_asked(),
            self.gate.limit()
        );

        Ok(AskOutcome::Answered { answer, next })
    }

    /// Write the session's transcript to the export file
    pub fn save(&self, session: &Session) -> Result<(), AdvisorError> {
        self.exporter.export(session.messages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockCompletionClient;
    use crate::profile::REAL_ESTATE;
    use crate::quota::WarningPolicy;
    use crate::session::{Message, Role};
    use crate::utils::ServiceErrorKind;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn advisor_with(client: MockCompletionClient, policy: WarningPolicy) -> Advisor {
        Advisor::new(
            &REAL_ESTATE,
            "llama3-8b-8192",
            QuotaGate::new(10, 8, policy).unwrap(),
            Box::new(client),
            TranscriptExporter::new("conversation_history.json"),
        )
    }

    fn answering_client() -> MockCompletionClient {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .returning(|request| Ok(format!("resposta para {}", request.prompt.len())));
        client
    }

    #[tokio::test]
    async fn test_request_carries_prompt_model_and_temperature() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().times(1).returning(|request| {
            assert!(request.prompt.starts_with(REAL_ESTATE.system_prompt));
            assert!(request.prompt.ends_with("\nUsuário: Onde encontrar imóveis?"));
            assert_eq!(request.model, "llama3-8b-8192");
            assert_eq!(request.temperature, 0.7);
            Ok("Em portais e imobiliárias.".to_string())
        });

        let advisor = advisor_with(client, WarningPolicy::Exact);
        let mut session = Session::new();
        let outcome = advisor
            .ask(&mut session, "Onde encontrar imóveis?")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AskOutcome::Answered {
                answer: "Em portais e imobiliárias.".to_string(),
                next: QuotaState::Open,
            }
        );
        assert_eq!(
            session.messages(),
            &[
                Message::new(Role::User, "Onde encontrar imóveis?"),
                Message::new(Role::Assistant, "Em portais e imobiliárias."),
            ]
        );
        assert_eq!(session.questions_asked(), 1);
    }

    #[tokio::test]
    async fn test_failed_completion_leaves_session_untouched() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().times(1).returning(|_| {
            Err(AdvisorError::service(
                ServiceErrorKind::RateLimit,
                "Rate limit reached",
            ))
        });

        let advisor = advisor_with(client, WarningPolicy::Exact);
        let mut session = Session::new();
        session.record_exchange("Q", "A");

        let err = advisor.ask(&mut session, "Outra pergunta").await.unwrap_err();
        assert_eq!(err.to_string(), "Service error (rate limit): Rate limit reached");
        assert_eq!(session.questions_asked(), 1);
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_retry_after_failure_succeeds() {
        let mut client = MockCompletionClient::new();
        let mut seq = mockall::Sequence::new();
        client
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AdvisorError::service(ServiceErrorKind::Network, "timeout")));
        client
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("ok".to_string()));

        let advisor = advisor_with(client, WarningPolicy::Exact);
        let mut session = Session::new();

        assert!(advisor.ask(&mut session, "Q").await.is_err());
        assert!(advisor.ask(&mut session, "Q").await.is_ok());
        assert_eq!(session.questions_asked(), 1);
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected_without_call() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().never();

        let advisor = advisor_with(client, WarningPolicy::Exact);
        let mut session = Session::new();

        assert!(matches!(
            advisor.ask(&mut session, "   ").await,
            Err(AdvisorError::InvalidInput(_))
        ));
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_quota_skips_client() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().never();

        let advisor = advisor_with(client, WarningPolicy::Exact);
        let mut session = Session::new();
        for _ in 0..10 {
            session.record_exchange("Q", "A");
        }

        let outcome = advisor.ask(&mut session, "Mais uma?").await.unwrap();
        assert_eq!(
            outcome,
            AskOutcome::QuotaExhausted {
                message: "Você atingiu o limite de 10 perguntas nesta sessão.".to_string()
            }
        );
        assert_eq!(session.messages().len(), 20);
        assert_eq!(session.questions_asked(), 10);
    }

    #[tokio::test]
    async fn test_warning_shown_once_with_exact_policy() {
        let advisor = advisor_with(answering_client(), WarningPolicy::Exact);
        let mut session = Session::new();
        let mut warnings = 0;

        for i in 0..10 {
            if let Some(notice) = advisor.notice(&session) {
                assert!(notice.starts_with("Atenção!"));
                assert_eq!(session.questions_asked(), 8);
                warnings += 1;
            }
            advisor.ask(&mut session, &format!("Pergunta {}", i)).await.unwrap();
        }

        assert_eq!(warnings, 1);
        assert_eq!(
            advisor.notice(&session).as_deref(),
            Some("Você atingiu o limite de 10 perguntas nesta sessão.")
        );
    }

    #[tokio::test]
    async fn test_warning_repeats_with_range_policy() {
        let advisor = advisor_with(answering_client(), WarningPolicy::Range);
        let mut session = Session::new();
        let mut warned_at = Vec::new();

        for i in 0..10 {
            if advisor.notice(&session).is_some() {
                warned_at.push(session.questions_asked());
            }
            advisor.ask(&mut session, &format!("Pergunta {}", i)).await.unwrap();
        }

        assert_eq!(warned_at, vec![8, 9]);
    }

    #[tokio::test]
    async fn test_save_writes_transcript() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        let advisor = Advisor::new(
            &REAL_ESTATE,
            "llama3-8b-8192",
            QuotaGate::default(),
            Box::new(answering_client()),
            TranscriptExporter::new(&path),
        );

        let mut session = Session::new();
        advisor.ask(&mut session, "Q").await.unwrap();
        advisor.save(&session).unwrap();

        let saved: Vec<Message> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, session.messages());
    }
}
