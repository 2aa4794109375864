pub mod app;
pub mod cli;
pub mod constants;
pub mod models;
pub mod profile;
pub mod prompt;
pub mod quota;
pub mod runtime;
pub mod session;
pub mod tui;
pub mod utils;

pub use app::{load_config, Config};
pub use models::{CompletionClient, CompletionRequest, ModelFactory};
pub use profile::{DomainProfile, ProfileKind};
pub use quota::{QuotaGate, QuotaState, WarningPolicy};
pub use runtime::{Advisor, AskOutcome};
pub use session::{Message, Role, Session, SessionStore, TranscriptExporter};
pub use utils::AdvisorError;
