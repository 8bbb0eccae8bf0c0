pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::{ChatCompletionClient, DisabledBackend, LlmConfig, RngSource};
pub use config::toml_config::TomlConfig;
pub use crate::core::{
    engine::{run_divination, DivinationEngine},
    interpretation::{CompletionSettings, Interpreter},
    judgment::judge,
    plate::generate_plate,
    session::DivinationSession,
};
pub use domain::model::{DivinationOutcome, FortuneJudgment, Interpretation, Plate};
pub use domain::ports::{CompletionBackend, RandomSource};
pub use utils::error::{QimenError, Result};
