use chrono::NaiveDateTime;

use crate::core::engine::DivinationEngine;
use crate::domain::model::DivinationOutcome;
use crate::domain::ports::{CompletionBackend, RandomSource};
use crate::utils::error::Result;
use crate::utils::validation::validate_question;

/// Request-scoped state of one user's divination: the selected time, the
/// question being asked, whether a run is in flight and the last outcome.
///
/// There is no cancellation: a submit runs to completion once started.
#[derive(Debug, Clone)]
pub struct DivinationSession {
    time: NaiveDateTime,
    question: String,
    loading: bool,
    last: Option<DivinationOutcome>,
}

impl DivinationSession {
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time,
            question: String::new(),
            loading: false,
            last: None,
        }
    }

    /// Session starting at the current local time.
    pub fn now() -> Self {
        Self::new(chrono::Local::now().naive_local())
    }

    pub fn time(&self) -> &NaiveDateTime {
        &self.time
    }

    pub fn set_time(&mut self, time: NaiveDateTime) {
        self.time = time;
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_outcome(&self) -> Option<&DivinationOutcome> {
        self.last.as_ref()
    }

    /// Validate the question, run the engine and keep the outcome.
    pub async fn submit<B, R>(
        &mut self,
        engine: &mut DivinationEngine<B, R>,
    ) -> Result<&DivinationOutcome>
    where
        B: CompletionBackend,
        R: RandomSource,
    {
        validate_question(&self.question)?;

        self.loading = true;
        let result = engine.run(&self.question, &self.time).await;
        self.loading = false;

        let outcome = result?;
        Ok(&*self.last.insert(outcome))
    }
}
