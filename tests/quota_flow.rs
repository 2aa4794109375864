use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use advisor::{
    profile::REAL_ESTATE,
    utils::ServiceErrorKind,
    Advisor, AdvisorError, AskOutcome, CompletionClient, CompletionRequest, QuotaGate,
    QuotaState, Role, Session, SessionStore, TranscriptExporter,
};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Replies from a fixed script and records every prompt it receives
struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, AdvisorError>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<String, AdvisorError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn answering(count: usize) -> Self {
        Self::new((1..=count).map(|i| Ok(format!("resposta {}", i))).collect())
    }

    fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AdvisorError> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AdvisorError::InvalidInput("script exhausted".to_string())))
    }
}

fn advisor_with(client: ScriptedClient, temp_dir: &TempDir) -> Advisor {
    Advisor::new(
        &REAL_ESTATE,
        "llama3-8b-8192",
        QuotaGate::default(),
        Box::new(client),
        TranscriptExporter::new(temp_dir.path().join("conversation_history.json")),
    )
}

#[tokio::test]
async fn ten_questions_then_blocked() {
    let temp_dir = TempDir::new().unwrap();
    let advisor = advisor_with(ScriptedClient::answering(10), &temp_dir);

    let mut store = SessionStore::new();
    let session = store.get_or_init("ana");
    session.set_name("Ana").unwrap();

    let mut warnings = Vec::new();
    for i in 1..=10 {
        let outcome = advisor
            .ask(session, &format!("pergunta {}", i))
            .await
            .unwrap();
        match outcome {
            AskOutcome::Answered { next, .. } => {
                if let QuotaState::Warning { remaining } = next {
                    warnings.push((i, remaining));
                }
            }
            AskOutcome::QuotaExhausted { .. } => panic!("blocked at question {}", i),
        }
    }

    // Warned exactly once, right after the eighth answer
    assert_eq!(warnings, vec![(8, 2)]);
    assert_eq!(session.questions_asked(), 10);
    assert_eq!(session.messages().len(), 20);

    let outcome = advisor.ask(session, "pergunta 11").await.unwrap();
    match outcome {
        AskOutcome::QuotaExhausted { message } => {
            assert_eq!(message, "Você atingiu o limite de 10 perguntas nesta sessão.");
        }
        other => panic!("expected quota exhaustion, got {:?}", other),
    }
    assert_eq!(session.messages().len(), 20);
}

#[tokio::test]
async fn failed_call_leaves_session_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let client = ScriptedClient::new(vec![
        Ok("Use portais imobiliários.".to_string()),
        Err(AdvisorError::service(ServiceErrorKind::RateLimit, "slow down")),
        Ok("Divulgue com fotos.".to_string()),
    ]);
    let advisor = advisor_with(client, &temp_dir);
    let mut session = Session::new();
    session.set_name("Bruno").unwrap();

    advisor.ask(&mut session, "Como conseguir leads?").await.unwrap();

    let err = advisor
        .ask(&mut session, "Como divulgar um imóvel?")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdvisorError::Service {
            kind: ServiceErrorKind::RateLimit,
            ..
        }
    ));
    assert_eq!(session.questions_asked(), 1);
    assert_eq!(session.messages().len(), 2);

    advisor
        .ask(&mut session, "Como divulgar um imóvel?")
        .await
        .unwrap();
    assert_eq!(session.questions_asked(), 2);
    assert_eq!(session.messages()[3].role, Role::Assistant);
    assert_eq!(session.messages()[3].content, "Divulgue com fotos.");
}

#[tokio::test]
async fn sessions_are_isolated_and_exported() {
    let temp_dir = TempDir::new().unwrap();
    let advisor = advisor_with(ScriptedClient::answering(2), &temp_dir);

    let mut store = SessionStore::new();
    store.get_or_init("ana").set_name("Ana").unwrap();
    store.get_or_init("bruno").set_name("Bruno").unwrap();

    let ana = store.get_or_init("ana");
    advisor.ask(ana, "Onde encontrar imóveis?").await.unwrap();
    advisor.save(ana).unwrap();

    assert_eq!(store.get("bruno").unwrap().questions_asked(), 0);
    assert_eq!(store.get("ana").unwrap().questions_asked(), 1);

    let exported =
        std::fs::read_to_string(temp_dir.path().join("conversation_history.json")).unwrap();
    assert_eq!(
        exported,
        r#"[{"role":"user","content":"Onde encontrar imóveis?"},{"role":"assistant","content":"resposta 1"}]"#
    );
}

#[tokio::test]
async fn question_is_sent_and_recorded_as_typed() {
    let temp_dir = TempDir::new().unwrap();
    let client = ScriptedClient::answering(1);
    let prompts = client.prompts();
    let advisor = advisor_with(client, &temp_dir);
    let mut session = Session::new();
    session.set_name("Ana").unwrap();

    let outcome = advisor
        .ask(&mut session, "  Como fazer um hot-site com fotos?  ")
        .await
        .unwrap();
    assert!(matches!(outcome, AskOutcome::Answered { .. }));
    assert_eq!(
        session.messages()[0].content,
        "  Como fazer um hot-site com fotos?  "
    );

    let prompts = prompts.lock().unwrap();
    assert_eq!(
        prompts.as_slice(),
        [format!(
            "{}\nUsuário:   Como fazer um hot-site com fotos?  ",
            REAL_ESTATE.system_prompt
        )]
    );
}
