use thiserror::Error;

/// Coarse failure categories of a single polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    BadStatusCode,
    MalformedBody,
    SchemaViolation,
    IncompleteRecord,
}

/// Recoverable failure that aborts the current cycle only.
///
/// The `Display` text is sent to the chat as is, so it stays in Russian.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CycleError {
    #[error("Произошла ошибка при обращении к API: {0}")]
    Transport(String),

    #[error("Получен неправильный код состояния от API: {0}")]
    BadStatus(u16),

    #[error("Ответ API не является корректным JSON: {0}")]
    MalformedBody(String),

    #[error("Ответ должен быть словарем")]
    NotAnObject,

    #[error("Ответ API не содержит поле \"homeworks\"")]
    MissingHomeworks,

    #[error("Поле \"homeworks\" должно быть списком")]
    HomeworksNotList,

    #[error("Недостаточно информации для определения статуса работы: нет поля \"{0}\"")]
    MissingField(&'static str),

    #[error("Недокументированный статус работы: {0}")]
    UnknownStatus(String),
}

impl CycleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::TransportFailure,
            Self::BadStatus(_) => ErrorKind::BadStatusCode,
            Self::MalformedBody(_) => ErrorKind::MalformedBody,
            Self::NotAnObject | Self::MissingHomeworks | Self::HomeworksNotList => {
                ErrorKind::SchemaViolation
            }
            Self::MissingField(_) | Self::UnknownStatus(_) => ErrorKind::IncompleteRecord,
        }
    }
}

/// Delivery failure of an outbound chat message. Logged, never retried.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Carries the error with its URL stripped, the URL holds the bot token.
    #[error("Telegram request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Telegram API error: {status} - {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_errors_share_a_kind() {
        for err in [
            CycleError::NotAnObject,
            CycleError::MissingHomeworks,
            CycleError::HomeworksNotList,
        ] {
            assert_eq!(err.kind(), ErrorKind::SchemaViolation);
        }
        assert_eq!(
            CycleError::UnknownStatus("lost".into()).kind(),
            ErrorKind::IncompleteRecord
        );
        assert_eq!(CycleError::BadStatus(404).kind(), ErrorKind::BadStatusCode);
    }

    #[test]
    fn bad_status_text_includes_code() {
        let text = CycleError::BadStatus(404).to_string();
        assert_eq!(text, "Получен неправильный код состояния от API: 404");
    }

    #[test]
    fn missing_config_lists_names() {
        let err = ConfigError::Missing(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }
}
