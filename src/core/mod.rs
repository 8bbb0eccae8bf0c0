pub mod engine;
pub mod interpretation;
pub mod judgment;
pub mod plate;
pub mod session;

pub use crate::domain::model::{DivinationOutcome, FortuneJudgment, Interpretation, Plate};
pub use crate::domain::ports::{CompletionBackend, RandomSource};
pub use crate::utils::error::Result;
