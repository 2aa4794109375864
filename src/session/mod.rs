/// Session management module - Gateway

mod export;
mod state;
mod store;

pub use export::TranscriptExporter;
pub use state::{Message, Role, Session};
pub use store::SessionStore;
