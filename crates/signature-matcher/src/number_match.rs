/*!
`NumberMatch`: предикат над целым числом — точное значение, открытый
диапазон или замкнутый диапазон.
*/

use serde_json::Value;

use crate::error::{Error, ErrorKind};
use crate::json::{self, NumberOrString};

/// Предикат над целым числом.
///
/// Гарантия: предикат всегда является непустым подмножеством целых чисел —
/// `"M..N"` требует `M <= N` на этапе разбора.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NumberMatch {
    Exact(i64),
    AtLeast(i64),
    AtMost(i64),
    Range(i64, i64),
}

impl NumberMatch {
    /// Строит точное совпадение `n`. Используется как значение по
    /// умолчанию (например, `frameNumber` по умолчанию равно `0`).
    pub fn exact(n: i64) -> NumberMatch {
        NumberMatch::Exact(n)
    }

    /// Разбирает спецификацию из строки по грамматике §4.3:
    /// `"M..N"`, `">= N"`, `"<= N"`, или обычное целое число.
    pub fn parse(spec: &str) -> Result<NumberMatch, Error> {
        let spec = spec.trim();

        if let Some((lo, hi)) = spec.split_once("..") {
            let lo = parse_i64(lo.trim(), spec)?;
            let hi = parse_i64(hi.trim(), spec)?;
            if lo > hi {
                return Err(Error::bare(ErrorKind::BadNumberSpec(spec.to_string())));
            }
            return Ok(NumberMatch::Range(lo, hi));
        }
        if let Some(rest) = spec.strip_prefix(">=") {
            return Ok(NumberMatch::AtLeast(parse_i64(rest.trim(), spec)?));
        }
        if let Some(rest) = spec.strip_prefix("<=") {
            return Ok(NumberMatch::AtMost(parse_i64(rest.trim(), spec)?));
        }
        Ok(NumberMatch::Exact(parse_i64(spec, spec)?))
    }

    /// Разбирает `NumberMatch` из целого числа или строки JSON
    /// (`IntOrRange`).
    pub fn from_number_or_string(v: NumberOrString) -> Result<NumberMatch, Error> {
        match v {
            NumberOrString::Number(n) => Ok(NumberMatch::exact(n)),
            NumberOrString::String(s) => NumberMatch::parse(&s),
        }
    }

    /// Разбирает `NumberMatch` из поля `k` родительского JSON объекта.
    pub fn from_field(
        obj: &serde_json::Map<String, Value>,
        k: &str,
        required: bool,
    ) -> Result<Option<NumberMatch>, Error> {
        match json::get_number_or_string_checked(obj, k, required)? {
            None => Ok(None),
            Some(v) => NumberMatch::from_number_or_string(v)
                .map(Some)
                .map_err(|e| Error::new(k, e.kind().clone())),
        }
    }

    /// Оценивает предикат. Отсутствующее значение (`None`) всегда даёт
    /// `false` — это документированная политика (§4.3), не ошибка.
    pub fn matches(&self, x: Option<i64>) -> bool {
        let Some(x) = x else { return false };
        self.matches_i128(i128::from(x))
    }

    /// То же самое, но для кандидата, занимающего весь диапазон `u64`
    /// (например, адрес падения) — сравнение идёт в `i128`, так что
    /// значения `>= 2^63` не обнуляются при сужении до `i64` перед
    /// сравнением.
    pub fn matches_u64(&self, x: Option<u64>) -> bool {
        let Some(x) = x else { return false };
        self.matches_i128(i128::from(x))
    }

    fn matches_i128(&self, x: i128) -> bool {
        match *self {
            NumberMatch::Exact(n) => x == i128::from(n),
            NumberMatch::AtLeast(n) => x >= i128::from(n),
            NumberMatch::AtMost(n) => x <= i128::from(n),
            NumberMatch::Range(lo, hi) => i128::from(lo) <= x && x <= i128::from(hi),
        }
    }
}

fn parse_i64(s: &str, whole_spec: &str) -> Result<i64, Error> {
    s.parse::<i64>()
        .map_err(|_| Error::bare(ErrorKind::BadNumberSpec(whole_spec.to_string())))
}
