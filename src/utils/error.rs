use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template rendering error: {0}")]
    RenderError(#[from] minijinja::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Model artifact not found: {path}")]
    ModelNotFound { path: String },

    #[error("Model artifact is invalid: {message}")]
    ModelFormatError { message: String },

    #[error("Missing input field: {field}")]
    MissingField { field: String },

    #[error("Invalid input for '{field}': {value} ({reason})")]
    InvalidField {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Inference failed: {message}")]
    Inference { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Model,
    Input,
    Inference,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            AppError::ModelNotFound { .. } | AppError::ModelFormatError { .. } => {
                ErrorCategory::Model
            }
            AppError::MissingField { .. } | AppError::InvalidField { .. } => ErrorCategory::Input,
            AppError::Inference { .. } => ErrorCategory::Inference,
            AppError::IoError(_) | AppError::RenderError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Inference => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Model | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 啟動期錯誤（模型、配置）會終止程序；輸入與推論錯誤可由使用者重試
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Configuration | ErrorCategory::Model
        )
    }

    /// 程序結束碼，依嚴重程度決定
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::ModelNotFound { path } => {
                format!("The model file '{}' could not be found. Check its location.", path)
            }
            AppError::ModelFormatError { message } => {
                format!("The model file could not be loaded: {}", message)
            }
            AppError::MissingField { field } => format!("Please provide a value for '{}'.", field),
            AppError::InvalidField { field, reason, .. } => {
                format!("The value for '{}' is not accepted: {}.", field, reason)
            }
            AppError::Inference { message } => format!("Prediction failed: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the command line flags and the TOML config file",
            ErrorCategory::Model => "Place a valid model artifact at the configured path and restart",
            ErrorCategory::Input => "Correct the highlighted field and submit again",
            ErrorCategory::Inference => "Change the passenger inputs and submit again",
            ErrorCategory::System => "Check file permissions and the service logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
