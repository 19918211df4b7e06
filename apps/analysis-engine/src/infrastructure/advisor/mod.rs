//! Language-model advisor adapters.

mod noop;
mod openai;

pub use noop::NoOpAdvisor;
pub use openai::{OpenAiAdvisor, OpenAiConfig};
