use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `post-client`.
pub enum PostClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный пост не найден.
    #[error("not found")]
    NotFound,

    /// Некорректный запрос: не-2xx ответ сервера.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Клиентская валидация черновика не прошла; запрос не отправлялся.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Результат операций `post-client`.
pub type PostClientResult<T> = Result<T, PostClientError>;

impl PostClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
