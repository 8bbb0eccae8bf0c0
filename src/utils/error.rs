use thiserror::Error;

#[derive(Error, Debug)]
pub enum QimenError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("Malformed API response: {message}")]
    MalformedResponse { message: String },

    #[error("Completion backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Validation,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QimenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QimenError::ApiError(_)
            | QimenError::ApiStatusError { .. }
            | QimenError::BackendUnavailable { .. } => ErrorCategory::Network,
            QimenError::MalformedResponse { .. } | QimenError::SerializationError(_) => {
                ErrorCategory::Data
            }
            QimenError::ConfigError { .. }
            | QimenError::ConfigValidationError { .. }
            | QimenError::InvalidConfigValueError { .. }
            | QimenError::MissingConfigError { .. } => ErrorCategory::Configuration,
            QimenError::ValidationError { .. } => ErrorCategory::Validation,
            QimenError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤在解讀階段都會退回本地解讀
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            QimenError::ApiError(_) => {
                "Check the network connection and the completion endpoint URL".to_string()
            }
            QimenError::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check that DASHSCOPE_API_KEY (or llm.api_key) holds a valid credential".to_string()
            }
            QimenError::ApiStatusError { .. } => {
                "The completion service rejected the request; retry later".to_string()
            }
            QimenError::MalformedResponse { .. } => {
                "Make sure the endpoint speaks the chat-completions protocol".to_string()
            }
            QimenError::BackendUnavailable { .. } => {
                "Configure an API key or drop --offline to enable model interpretations"
                    .to_string()
            }
            QimenError::IoError(_) => "Check file paths and permissions".to_string(),
            QimenError::SerializationError(_) => "Report this as a bug".to_string(),
            QimenError::ConfigError { .. } | QimenError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax".to_string()
            }
            QimenError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            QimenError::MissingConfigError { field } => {
                format!("Provide '{}' in the configuration or environment", field)
            }
            QimenError::ValidationError { .. } => "請輸入您想占卜的問題".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("無法連接解讀服務: {}", self),
            ErrorCategory::Data => format!("解讀服務回應格式錯誤: {}", self),
            ErrorCategory::Configuration => format!("配置錯誤: {}", self),
            ErrorCategory::Validation => format!("輸入無效: {}", self),
            ErrorCategory::System => format!("系統錯誤: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, QimenError>;
