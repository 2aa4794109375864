/// Runtime orchestrator module - Gateway

mod advisor;
mod non_interactive;
mod orchestrator;

pub use advisor::{Advisor, AskOutcome};
pub use non_interactive::{ExecutionMetadata, NonInteractiveResult, NonInteractiveRunner};
pub use orchestrator::Orchestrator;
