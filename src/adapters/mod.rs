// Adapters layer: concrete implementations of the domain ports (http completion client, random source).

pub mod llm;
pub mod random;

pub use llm::{ChatCompletionClient, DisabledBackend, LlmConfig};
pub use random::RngSource;
