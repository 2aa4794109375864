// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod chat_completions;
mod factory;
mod traits;
mod types;

// Public re-exports - the ONLY way to access model functionality
pub use chat_completions::ChatCompletionsClient;
pub use factory::ModelFactory;
pub use traits::CompletionClient;
pub use types::CompletionRequest;

#[cfg(test)]
pub use traits::MockCompletionClient;
