use std::fmt;

/// Ошибка, которая может возникнуть при разборе матчера из JSON.
///
/// Все ошибки в этом крейте возникают во время *построения* — `matches`
/// никогда не завершается ошибкой, даже когда входные данные отсутствуют
/// или имеют неожиданную форму (см. `NumberMatch::matches` и
/// `StringMatch::matches`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// Ключ или контекст, в котором возникла ошибка, если он известен.
    context: Option<String>,
    kind: ErrorKind,
}

/// Вид ошибки, которая может возникнуть при разборе матчера из JSON.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Обязательный ключ отсутствует в JSON объекте.
    MissingKey,
    /// Значение присутствует, но имеет не тот тип JSON, который ожидался.
    BadType { expected: &'static str },
    /// PCRE шаблон не скомпилировался.
    BadPattern(String),
    /// Строка не соответствует ни одной из грамматик `NumberMatch`.
    BadNumberSpec(String),
}

impl Error {
    pub(crate) fn new(context: impl Into<String>, kind: ErrorKind) -> Error {
        Error { context: Some(context.into()), kind }
    }

    pub(crate) fn bare(kind: ErrorKind) -> Error {
        Error { context: None, kind }
    }

    /// Возвращает ключ или контекст, с которым связана эта ошибка, если он есть.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Возвращает вид этой ошибки.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            None => self.kind.fmt(f),
            Some(ctx) => write!(f, "{ctx}: {}", self.kind),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingKey => write!(f, "missing required key"),
            ErrorKind::BadType { expected } => {
                write!(f, "expected a JSON {expected}")
            }
            ErrorKind::BadPattern(err) => {
                write!(f, "invalid PCRE pattern: {err}")
            }
            ErrorKind::BadNumberSpec(spec) => {
                write!(f, "invalid number spec: '{spec}'")
            }
        }
    }
}
