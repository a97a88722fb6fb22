/*!
Примитивы сопоставления, общие для движка сопоставления сигнатур падений:
типизированный доступ к JSON, `StringMatch` и `NumberMatch`.

Этот крейт не знает ничего о падениях, симптомах или сигнатурах — это
аналог `grep-matcher` в семье крейтов `grep`: маленький, с минимумом
зависимостей, на котором строятся конкретные распознаватели.
*/

mod error;
mod number_match;
mod string_match;

pub mod json;

pub use crate::error::{Error, ErrorKind};
pub use crate::number_match::NumberMatch;
pub use crate::string_match::{Flags, MatchType, StringMatch};
