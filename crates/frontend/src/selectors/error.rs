use thiserror::Error;

/// Ошибки монтирования селекторов
///
/// Ошибкой может завершиться только создание. Несуществующая комбинация или
/// неизвестный вариант из ссылки представлены `None`, а не ошибкой.
#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("native control `#{0}` not found")]
    ElementNotFound(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("invalid selector config: {0}")]
    Config(String),

    #[error("rendered selector `#{0}` not found after insertion")]
    SelectorMissing(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}
