use crate::adapters::llm::{LlmConfig, DEFAULT_ENDPOINT};
use crate::core::interpretation::{
    CompletionSettings, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
};
use crate::utils::error::{QimenError, Result};
use crate::utils::validation::{self, Validate};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable consulted when the file carries no usable api key.
pub const API_KEY_ENV: &str = "DASHSCOPE_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub llm: LlmSection,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub timeout_seconds: Option<u64>,
    pub system_prompt: String,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            timeout_seconds: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QimenError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QimenError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DASHSCOPE_API_KEY})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QimenError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("llm.endpoint", &self.llm.endpoint)?;
        validation::validate_non_empty_string("llm.model", &self.llm.model)?;
        validation::validate_positive_number("llm.max_tokens", u64::from(self.llm.max_tokens), 1)?;
        validation::validate_range("llm.temperature", self.llm.temperature, 0.0, 2.0)?;
        validation::validate_range("llm.top_p", self.llm.top_p, 0.0, 1.0)?;

        if let Some(timeout) = self.llm.timeout_seconds {
            validation::validate_positive_number("llm.timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }

    /// Key from the file, else from `fallback` (normally the environment).
    /// Blank values and unresolved `${VAR}` placeholders count as missing.
    fn resolve_api_key(&self, fallback: Option<String>) -> Option<SecretString> {
        let usable = |key: &str| !key.trim().is_empty() && !key.contains("${");

        self.llm
            .api_key
            .as_deref()
            .filter(|key| usable(key))
            .map(|key| key.trim().to_string())
            .or_else(|| fallback.filter(|key| usable(key)))
            .map(SecretString::from)
    }

    pub fn api_key(&self) -> Option<SecretString> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            model: self.llm.model.clone(),
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
            top_p: self.llm.top_p,
            system_prompt: self.llm.system_prompt.clone(),
        }
    }

    /// Settings for the HTTP completion client; fails when no credential is available.
    pub fn llm_config(&self) -> Result<LlmConfig> {
        let api_key = self.api_key().ok_or_else(|| QimenError::MissingConfigError {
            field: format!("llm.api_key (or {})", API_KEY_ENV),
        })?;

        Ok(LlmConfig {
            endpoint: self.llm.endpoint.clone(),
            api_key,
            timeout: self.llm.timeout_seconds.map(Duration::from_secs),
            completion: self.completion_settings(),
        })
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[llm]
endpoint = "https://llm.example.com/v1/chat/completions"
model = "qwen-max"
api_key = "sk-file"
max_tokens = 512
temperature = 0.3
top_p = 0.8
timeout_seconds = 20

[logging]
level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.llm.model, "qwen-max");
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());

        let llm = config.llm_config().unwrap();
        assert_eq!(llm.endpoint, "https://llm.example.com/v1/chat/completions");
        assert_eq!(llm.api_key.expose_secret(), "sk-file");
        assert_eq!(llm.timeout, Some(Duration::from_secs(20)));
        assert_eq!(llm.completion.max_tokens, 512);
        assert_eq!(llm.completion.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_defaults_for_empty_file() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.completion_settings(), CompletionSettings::default());
        assert!(config.llm.timeout_seconds.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QIMEN_TEST_MODEL", "qwen-turbo");

        let config = TomlConfig::from_toml_str(
            r#"
[llm]
model = "${QIMEN_TEST_MODEL}"
"#,
        )
        .unwrap();
        assert_eq!(config.llm.model, "qwen-turbo");

        std::env::remove_var("QIMEN_TEST_MODEL");
    }

    #[test]
    fn test_unresolved_placeholder_is_not_a_key() {
        let config = TomlConfig::from_toml_str(
            r#"
[llm]
api_key = "${QIMEN_TEST_UNSET_KEY}"
"#,
        )
        .unwrap();

        assert!(config.resolve_api_key(None).is_none());
        let key = config.resolve_api_key(Some("sk-env".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "sk-env");
    }

    #[test]
    fn test_file_key_wins_over_fallback() {
        let config = TomlConfig::from_toml_str("[llm]\napi_key = \" sk-file \"\n").unwrap();
        let key = config.resolve_api_key(Some("sk-env".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "sk-file");
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = TomlConfig::from_toml_str("[llm]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_top_p = TomlConfig::from_toml_str("[llm]\ntop_p = 1.5\n").unwrap();
        assert!(bad_top_p.validate().is_err());

        let bad_tokens = TomlConfig::from_toml_str("[llm]\nmax_tokens = 0\n").unwrap();
        assert!(bad_tokens.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[llm\nmodel = 1").unwrap_err();
        assert!(matches!(err, QimenError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[llm]\nmodel = \"file-model\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.llm.model, "file-model");
    }
}
