use chrono::NaiveDateTime;

use crate::core::interpretation::Interpreter;
use crate::core::judgment::judge;
use crate::core::plate::generate_plate;
use crate::domain::model::DivinationOutcome;
use crate::domain::ports::{CompletionBackend, RandomSource};
use crate::utils::error::Result;
use crate::utils::validation::validate_question;

/// Runs plate generation, judgment and interpretation for one question.
pub struct DivinationEngine<B: CompletionBackend, R: RandomSource> {
    interpreter: Interpreter<B>,
    random: R,
}

impl<B: CompletionBackend, R: RandomSource> DivinationEngine<B, R> {
    pub fn new(interpreter: Interpreter<B>, random: R) -> Self {
        Self {
            interpreter,
            random,
        }
    }

    pub fn interpreter(&self) -> &Interpreter<B> {
        &self.interpreter
    }

    /// Fails only when `question` is blank; every later stage is total.
    pub async fn run(&mut self, question: &str, time: &NaiveDateTime) -> Result<DivinationOutcome> {
        validate_question(question)?;
        tracing::info!("🔮 Starting divination for {}", time.format("%Y-%m-%d %H:%M"));

        let plate = generate_plate(time);
        let judgment = judge(&plate, &mut self.random);
        tracing::info!(
            "📊 Overall score {} - {}",
            judgment.overall_score,
            judgment.overall_description
        );

        let interpretation = self.interpreter.interpret(&plate, &judgment, question).await;
        if interpretation.is_fallback() {
            tracing::warn!("Using local fallback interpretation");
        }

        Ok(DivinationOutcome {
            question: question.to_string(),
            plate,
            judgment,
            interpretation,
        })
    }
}

/// One-shot entry point: generate, judge and interpret in a single call.
pub async fn run_divination<B, R>(
    question: &str,
    time: &NaiveDateTime,
    backend: B,
    random: &mut R,
) -> Result<DivinationOutcome>
where
    B: CompletionBackend,
    R: RandomSource,
{
    let mut engine = DivinationEngine::new(Interpreter::new(backend), random);
    engine.run(question, time).await
}
