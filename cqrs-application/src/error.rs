use cqrs_domain::error::DomainError;

/// 应用层错误
///
/// 由协作者（发送器/发布器/处理器）或其背后的处理器产生。
/// 分发器对其不做任何包装与转换，调用方看到的即为协作者返回的原值。
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("handler failed: handler={handler}, reason={reason}")]
    Handler { handler: String, reason: String },

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("handler already registered: query={query}, result={result}")]
    AlreadyRegisteredQuery {
        query: &'static str,
        result: &'static str,
    },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
