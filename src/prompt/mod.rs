/// Prompt construction - Gateway

mod builder;

pub use builder::build_prompt;
