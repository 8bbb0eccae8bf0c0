use crate::domain::model::{FortuneJudgment, Interpretation, InterpretationSource, Plate};
use crate::domain::ports::{ChatMessage, ChatRequest, CompletionBackend};

pub const DEFAULT_MODEL: &str = "qwen-plus";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.9;
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant specializing in Qimen Dunjia interpretations.";

/// Model and sampling parameters sent with every interpretation request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub system_prompt: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

fn time_verdict(judgment: &FortuneJudgment) -> &'static str {
    if judgment.time.is_lucky {
        "当前时辰有利"
    } else {
        "当前时辰运势一般"
    }
}

fn favourable_directions(judgment: &FortuneJudgment) -> String {
    judgment
        .lucky_directions()
        .map(|d| format!("{}方{}", d.name, d.description))
        .collect::<Vec<_>>()
        .join("；")
}

/// Prompt embedding the plate, the judgment and the user's question verbatim.
pub fn build_prompt(plate: &Plate, judgment: &FortuneJudgment, question: &str) -> String {
    format!(
        "我现在进行奇门遁甲排盘，得到以下结果：\n  \n\
         排盘时间: {} {}\n\
         整体运势评分: {}分\n\
         吉凶判断: {}\n\
         吉利宫位: {}\n\
         凶险宫位: {}\n\
         时辰吉凶: {}，{}\n\
         方位吉凶: {}\n\
         \n\
         我的问题是: \"{}\"\n\
         \n\
         请根据以上奇门遁甲排盘结果，结合我的问题，给出专业、详细的解读和建议。\
         解读应包括对问题的直接回答、运势分析和具体建议。\
         语言要自然流畅，避免使用过于专业的术语，让普通人也能理解。",
        plate.date,
        plate.time,
        judgment.overall_score,
        judgment.overall_description,
        plate.lucky_palace_names().join("、"),
        plate.unlucky_palace_names().join("、"),
        time_verdict(judgment),
        judgment.time.description,
        favourable_directions(judgment),
        question,
    )
}

/// Local interpretation used whenever the completion call fails. Deterministic.
pub fn fallback_text(plate: &Plate, judgment: &FortuneJudgment, question: &str) -> String {
    format!(
        "根据奇门遁甲排盘分析，针对你的问题\"{}\"，得出以下解读：\n\
         当前时间为{} {}，整体运势评分为{}分，{}。\n\
         \n\
         从九宫格排盘来看，{}宫为吉，{}宫为凶。{}，{}。\n\
         \n\
         方位方面，{}。\n\
         \n\
         （注：API调用失败，以上为本地生成的基础解读。）",
        question,
        plate.date,
        plate.time,
        judgment.overall_score,
        judgment.overall_description,
        plate.lucky_palace_names().join("、"),
        plate.unlucky_palace_names().join("、"),
        time_verdict(judgment),
        judgment.time.description,
        favourable_directions(judgment),
    )
}

pub struct Interpreter<B: CompletionBackend> {
    backend: B,
    settings: CompletionSettings,
}

impl<B: CompletionBackend> Interpreter<B> {
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, CompletionSettings::default())
    }

    pub fn with_settings(backend: B, settings: CompletionSettings) -> Self {
        Self { backend, settings }
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    pub fn build_request(
        &self,
        plate: &Plate,
        judgment: &FortuneJudgment,
        question: &str,
    ) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(self.settings.system_prompt.clone()),
                ChatMessage::user(build_prompt(plate, judgment, question)),
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
        }
    }

    /// Ask the backend for an interpretation. Never fails: any backend error is
    /// logged and replaced with [`fallback_text`].
    pub async fn interpret(
        &self,
        plate: &Plate,
        judgment: &FortuneJudgment,
        question: &str,
    ) -> Interpretation {
        let request = self.build_request(plate, judgment, question);
        tracing::debug!("Requesting interpretation from model {}", request.model);

        match self.backend.complete(&request).await {
            Ok(text) => {
                tracing::info!("✅ Received model interpretation ({} chars)", text.chars().count());
                Interpretation {
                    text,
                    source: InterpretationSource::Model,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "❌ Interpretation request failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                Interpretation {
                    text: fallback_text(plate, judgment, question),
                    source: InterpretationSource::Fallback,
                }
            }
        }
    }
}
