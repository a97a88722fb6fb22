use std::fmt;

/// Ошибка, которая может возникнуть при разборе симптома или сигнатуры из
/// JSON.
///
/// Как и в `signature-matcher`, все ошибки в этом крейте возникают во
/// время *построения*; оценка (`matches`, `diff`, `getDistance`) тотальна
/// и никогда не завершается ошибкой.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    context: Option<String>,
    kind: ErrorKind,
}

/// Вид ошибки, которая может возникнуть при разборе симптома или сигнатуры.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Обязательное поле отсутствует (специфично для конкретного вида
    /// симптома, в отличие от `Matcher`'s общего `MissingKey`).
    MissingField(&'static str),
    /// Значение ключа `type` не является одним из семи известных тегов
    /// симптомов. Несёт полученный тег дословно.
    UnknownSymptomType(String),
    /// `src` поля `output` не равно `"stdout"` или `"stderr"`.
    BadSource(String),
    /// `functionNames` поля `stackFrames` пуст.
    EmptyFrameList,
    /// Значение поля имеет не тот тип JSON, который ожидался (вне
    /// примитивов `signature-matcher`, например `registerNames`).
    BadType { field: &'static str, expected: &'static str },
    /// Ошибка, возникшая в одном из примитивов сопоставления
    /// (`StringMatch`/`NumberMatch`/доступ к JSON).
    Matcher(signature_matcher::Error),
}

impl Error {
    pub(crate) fn new(context: impl Into<String>, kind: ErrorKind) -> Error {
        Error { context: Some(context.into()), kind }
    }

    pub(crate) fn bare(kind: ErrorKind) -> Error {
        Error { context: None, kind }
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl From<signature_matcher::Error> for Error {
    fn from(err: signature_matcher::Error) -> Error {
        Error::bare(ErrorKind::Matcher(err))
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
            ErrorKind::MissingField(name) => {
                write!(f, "missing required field '{name}'")
            }
            ErrorKind::UnknownSymptomType(tag) => {
                write!(f, "unknown symptom type '{tag}'")
            }
            ErrorKind::BadSource(src) => {
                write!(f, "bad source '{src}', expected 'stdout' or 'stderr'")
            }
            ErrorKind::EmptyFrameList => {
                write!(f, "stackFrames functionNames must be non-empty")
            }
            ErrorKind::BadType { field, expected } => {
                write!(f, "field '{field}' expected a JSON {expected}")
            }
            ErrorKind::Matcher(err) => write!(f, "{err}"),
        }
    }
}
