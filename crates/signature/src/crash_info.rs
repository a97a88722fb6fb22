/*!
`CrashInfo`: структурированное описание одного падения программы.

Это производится внешним сборщиком (извлечение трассировки, извлечение
адреса) и потребляется ядром только для чтения — ничто в этом крейте его
не мутирует.
*/

/// Структурированное описание одного падения программы.
///
/// Все поля опциональны или уже нормализованы вызывающей стороной
/// (например, `backtrace` уже символизирован, `rawStdout`/`rawStderr` уже
/// разбиты на строки).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CrashInfo {
    /// Захваченный стандартный вывод, уже разбитый на строки.
    #[serde(default)]
    pub raw_stdout: Vec<String>,
    /// Захваченный стандартный вывод ошибок, уже разбитый на строки.
    #[serde(default)]
    pub raw_stderr: Vec<String>,
    /// Имена функций символизированной трассировки, с самым внутренним
    /// (упавшим) кадром по индексу `0`.
    #[serde(default)]
    pub backtrace: Vec<String>,
    /// Адрес, на котором произошёл сбой, если он известен.
    #[serde(default)]
    pub crash_address: Option<u64>,
    /// Дизассемблированная инструкция, на которой произошёл сбой, токены
    /// разделены пробелами.
    #[serde(default)]
    pub crash_instruction: Option<String>,
    /// Содержимое репродьюсера, возможно многострочное.
    #[serde(default)]
    pub testcase: Option<String>,
}

impl CrashInfo {
    /// Возвращает новый пустой `CrashInfo` — ни одно поле симптома не
    /// совпадёт с ним, кроме `stackSize` с диапазоном, включающим `0`.
    pub fn new() -> CrashInfo {
        CrashInfo::default()
    }
}
