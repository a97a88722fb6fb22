/*!
`StringMatch`: литеральный или PCRE предикат над строкой.
*/

use serde_json::Value;

use crate::error::{Error, ErrorKind};
use crate::json::{self, ObjectOrString};

/// Как сопоставлять `pattern` с кандидатной строкой.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchType {
    /// Подстрока (поведение по умолчанию).
    Contains,
    /// Поиск PCRE (не заякоренный).
    Pcre,
}

/// Флаги, модифицирующие то, как `StringMatch` сопоставляет строку.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Flags {
    pub case_insensitive: bool,
}

/// Литеральный или регулярно-выражный предикат над строкой.
///
/// `StringMatch` хранит исходный текст шаблона рядом со скомпилированным
/// матчером (когда это PCRE), потому что распознаватель списка кадров стека
/// (`stackFrames`) определяет подстановочные знаки `?` и `???` путём
/// сравнения этого исходного текста, а не через отдельный подкласс или тег.
#[derive(Clone, Debug)]
pub struct StringMatch {
    pattern: String,
    match_type: MatchType,
    flags: Flags,
    compiled: Option<CompiledPcre>,
}

#[derive(Clone)]
struct CompiledPcre(std::sync::Arc<pcre2::bytes::Regex>);

impl std::fmt::Debug for CompiledPcre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CompiledPcre").field(&self.0.as_str()).finish()
    }
}

impl StringMatch {
    /// Строит `StringMatch` из bare-строки: литеральное сопоставление,
    /// флаги по умолчанию.
    pub fn literal(pattern: impl Into<String>) -> StringMatch {
        StringMatch {
            pattern: pattern.into(),
            match_type: MatchType::Contains,
            flags: Flags::default(),
            compiled: None,
        }
    }

    /// Строит `StringMatch` из заданных частей, компилируя PCRE при
    /// необходимости.
    pub fn new(
        pattern: impl Into<String>,
        match_type: MatchType,
        flags: Flags,
    ) -> Result<StringMatch, Error> {
        let pattern = pattern.into();
        let compiled = match match_type {
            MatchType::Contains => None,
            MatchType::Pcre => Some(compile_pcre(&pattern, flags)?),
        };
        Ok(StringMatch { pattern, match_type, flags, compiled })
    }

    /// Разбирает `StringMatch` из JSON значения по ключу `k` (обязательного
    /// или опционального) родительского объекта. Принимает как bare-строку,
    /// так и объект `{value, matchType?, flags?}`.
    pub fn from_field(
        obj: &serde_json::Map<String, Value>,
        k: &str,
        required: bool,
    ) -> Result<Option<StringMatch>, Error> {
        match json::get_object_or_string_checked(obj, k, required)? {
            None => Ok(None),
            Some(ObjectOrString::String(s)) => Ok(Some(StringMatch::literal(s))),
            Some(ObjectOrString::Object(o)) => {
                Self::from_object(o).map(Some).map_err(|e| {
                    // re-contextualize the error with the outer field name
                    Error::new(k, e.kind().clone())
                })
            }
        }
    }

    fn from_object(o: &serde_json::Map<String, Value>) -> Result<StringMatch, Error> {
        let value = json::get_string_checked(o, "value", true)?.unwrap();
        let match_type = match json::get_string_checked(o, "matchType", false)? {
            None => MatchType::Contains,
            Some(ref s) if s == "contains" => MatchType::Contains,
            Some(ref s) if s == "pcre" => MatchType::Pcre,
            Some(_) => {
                return Err(Error::new(
                    "matchType",
                    ErrorKind::BadType { expected: r#""contains" or "pcre""# },
                ));
            }
        };
        let mut flags = Flags::default();
        if let Some(arr) = json::get_array_checked(o, "flags", false)? {
            for f in arr {
                if f.as_str() == Some("caseInsensitive") {
                    flags.case_insensitive = true;
                }
            }
        }
        StringMatch::new(value, match_type, flags)
    }

    /// Исходный текст шаблона, как он был написан. Используется
    /// распознавателем `stackFrames` для проверки подстановочных знаков
    /// `"?"` и `"???"`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Проверяет, соответствует ли `s` этому матчеру.
    pub fn matches(&self, s: &str) -> bool {
        match self.match_type {
            MatchType::Contains => {
                if self.flags.case_insensitive {
                    s.to_lowercase().contains(&self.pattern.to_lowercase())
                } else {
                    s.contains(&self.pattern)
                }
            }
            MatchType::Pcre => {
                let regex = &self.compiled.as_ref().expect("compiled on construction").0;
                regex.is_match(s.as_bytes()).unwrap_or(false)
            }
        }
    }
}

fn compile_pcre(pattern: &str, flags: Flags) -> Result<CompiledPcre, Error> {
    pcre2::bytes::RegexBuilder::new()
        .caseless(flags.case_insensitive)
        .build(pattern)
        .map(|r| CompiledPcre(std::sync::Arc::new(r)))
        .map_err(|err| Error::bare(ErrorKind::BadPattern(err.to_string())))
}

impl PartialEq for StringMatch {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.match_type == other.match_type
            && self.flags == other.flags
    }
}
