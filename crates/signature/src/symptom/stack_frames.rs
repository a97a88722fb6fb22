/*!
`type = "stackFrames"` — распознаватель последовательности кадров стека с
подстановочными знаками и поиск минимального обобщающего редактирования.

Это самая сложная часть движка: `functionNames` — это список матчеров
имён функций, где два различимых паттерна несут семантику
подстановочного знака:

* `"?"`   — ровно один кадр стека (любой).
* `"???"` — ноль или более кадров стека.

Подстановочный знак определяется не отдельным тегом, а сравнением
текстового представления матчера (`StringMatch::pattern`) — см. design
note в §9 спецификации: PCRE-матчер с исходным текстом `"?"` или `"???"`
неотличим от настоящего подстановочного знака. Это намеренно.
*/

use serde_json::Value;
use signature_matcher::StringMatch;

use crate::crash_info::CrashInfo;
use crate::error::{Error, ErrorKind};
use crate::symptom::Symptom;

const SINGLE_WILDCARD: &str = "?";
const MULTI_WILDCARD: &str = "???";

/// Максимальная глубина (количество правок), которую исследует `diff`.
pub const MAX_DIFF_DEPTH: u32 = 3;

#[cfg(feature = "log")]
macro_rules! debug {
    ($($token:tt)*) => (::log::debug!($($token)*);)
}
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($token:tt)*) => {};
}

fn is_single_wildcard(m: &StringMatch) -> bool {
    m.pattern() == SINGLE_WILDCARD
}

fn is_multi_wildcard(m: &StringMatch) -> bool {
    m.pattern() == MULTI_WILDCARD
}

fn is_wildcard(m: &StringMatch) -> bool {
    is_single_wildcard(m) || is_multi_wildcard(m)
}

/// `MATCH(stack, pat)` из §4.4.7: распознаватель `?`/`???` над списком
/// имён функций.
fn match_seq(stack: &[String], pat: &[StringMatch]) -> bool {
    if let Some(first) = pat.first() {
        if !is_wildcard(first) {
            // Step 1: consume one literal comparison, or fail.
            return match stack.first() {
                Some(frame) if first.matches(frame) => {
                    match_seq(&stack[1..], &pat[1..])
                }
                _ => false,
            };
        }
    }

    // Step 2: pattern exhausted matches regardless of leftover stack.
    let Some(first) = pat.first() else { return true };

    if is_single_wildcard(first) {
        // Step 3: `?` consumes exactly one frame.
        if stack.is_empty() {
            return false;
        }
        return match_seq(&stack[1..], &pat[1..]);
    }

    // Step 4: `???` consumes zero or more frames.
    if match_seq(stack, &pat[1..]) {
        return true;
    }
    if stack.is_empty() {
        return false;
    }
    match_seq(&stack[1..], pat)
}

/// Результат `DIFF`: (0-индексированное не применяется — глубина и
/// готовый обобщённый паттерн).
type DiffFound = (u32, Vec<StringMatch>);

/// Поиск с возрастающим ограничением по глубине, `DIFF(stack, pat,
/// startIdx, depth, maxDepth)` из §4.4.7.
///
/// `pat` — разделяемая рабочая копия; каждая попытка правки мутирует её
/// на месте и откатывается перед тем, как пробовать следующую позицию,
/// так что свежее клонирование происходит только при успехе (§9 design
/// notes).
fn search(
    pat: &mut Vec<StringMatch>,
    stack: &[String],
    start: usize,
    depth: u32,
    max_depth: u32,
) -> Option<DiffFound> {
    let mut best: Option<DiffFound> = None;

    for i in start..pat.len() {
        // --- Insertion: insert a single `?` at position i. ---
        pat.insert(i, StringMatch::literal(SINGLE_WILDCARD));
        if match_seq(stack, pat) {
            debug!("diff: insertion at {i} succeeds at depth {depth}");
            update_best(&mut best, Some((depth, pat.clone())));
        } else if depth < max_depth {
            let found = search(pat, stack, i, depth + 1, max_depth);
            update_best(&mut best, found);
        }
        pat.remove(i);

        // --- Replacement: replace pat[i] with a single `?`, skipped when
        // pat[i] is already a wildcard (redundant with insertion above).
        if !is_wildcard(&pat[i]) {
            let original = pat[i].clone();
            pat[i] = StringMatch::literal(SINGLE_WILDCARD);
            if match_seq(stack, pat) {
                debug!("diff: replacement at {i} succeeds at depth {depth}");
                update_best(&mut best, Some((depth, pat.clone())));
            } else if depth < max_depth {
                let found = search(pat, stack, i, depth + 1, max_depth);
                update_best(&mut best, found);
            }
            pat[i] = original;
        }
    }

    best
}

/// Заменяет `*best`, только если `found` имеет строго меньшую глубину —
/// это и даёт "первый найденный выигрывает при равенстве" (§4.4.7):
/// позиция `i` перебирается по возрастанию, вставка пробуется раньше
/// замены, так что при равной глубине первая успешная попытка уже
/// записана в `best` и не будет вытеснена последующей с той же глубиной.
fn update_best(best: &mut Option<DiffFound>, found: Option<DiffFound>) {
    if let Some((d, p)) = found {
        let is_better = match best {
            None => true,
            Some((bd, _)) => d < *bd,
        };
        if is_better {
            *best = Some((d, p));
        }
    }
}

/// `type = "stackFrames"`: распознаватель последовательности кадров стека
/// с подстановочными знаками `?`/`???`.
#[derive(Clone, Debug)]
pub struct StackFramesSymptom {
    function_names: Vec<StringMatch>,
    json: Value,
}

impl StackFramesSymptom {
    pub(crate) fn from_object(
        obj: &serde_json::Map<String, Value>,
        json: Value,
    ) -> Result<StackFramesSymptom, Error> {
        let arr = match obj.get("functionNames") {
            None => return Err(Error::bare(ErrorKind::MissingField("functionNames"))),
            Some(Value::Array(a)) => a,
            Some(_) => {
                return Err(Error::bare(ErrorKind::BadType {
                    field: "functionNames",
                    expected: "array",
                }));
            }
        };
        if arr.is_empty() {
            return Err(Error::bare(ErrorKind::EmptyFrameList));
        }
        let function_names = arr
            .iter()
            .map(string_match_from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StackFramesSymptom { function_names, json })
    }

    /// Строит значение напрямую из уже распознанных паттернов — используется
    /// `diff` при построении обобщённого симптома.
    fn from_patterns(patterns: Vec<String>) -> StackFramesSymptom {
        let json = Value::Object(
            [
                ("type".to_string(), Value::String("stackFrames".to_string())),
                (
                    "functionNames".to_string(),
                    Value::Array(
                        patterns.iter().cloned().map(Value::String).collect(),
                    ),
                ),
            ]
            .into_iter()
            .collect(),
        );
        let function_names =
            patterns.into_iter().map(StringMatch::literal).collect();
        StackFramesSymptom { function_names, json }
    }

    pub fn matches(&self, crash: &CrashInfo) -> bool {
        match_seq(&crash.backtrace, &self.function_names)
    }

    /// Вычисляет минимальное обобщающее редактирование (`diff` из §4.4.7),
    /// если этот симптом ещё не совпадает с `crash`.
    ///
    /// Возвращает `(0, none)` — точнее, `None`, когда симптом уже
    /// совпадает (спецификация кодирует это отдельно, но глубина `0`
    /// неотличима от "уже совпадает", и интерфейс `diff` в §6 возвращает
    /// `none` в этом случае не требуется: см. `CrashSignature::get_distance`,
    /// которая трактует уже совпавшие симптомы как вклад `0`, не вызывая
    /// `diff` вовсе).
    pub fn diff(&self, crash: &CrashInfo) -> Option<(u32, Symptom)> {
        if self.matches(crash) {
            return None;
        }

        for max_depth in 1..=MAX_DIFF_DEPTH {
            let mut working = self.function_names.clone();
            let Some((depth, solved)) =
                search(&mut working, &crash.backtrace, 0, 1, max_depth)
            else {
                continue;
            };

            let mut patterns: Vec<String> =
                solved.iter().map(|m| m.pattern().to_string()).collect();
            while matches!(
                patterns.last().map(String::as_str),
                Some(SINGLE_WILDCARD) | Some(MULTI_WILDCARD)
            ) {
                patterns.pop();
            }
            if patterns.is_empty() {
                return None;
            }
            return Some((
                depth,
                Symptom::StackFrames(StackFramesSymptom::from_patterns(patterns)),
            ));
        }
        None
    }

    pub(crate) fn to_json(&self) -> Value {
        self.json.clone()
    }
}

fn string_match_from_value(v: &Value) -> Result<StringMatch, Error> {
    match signature_matcher::json::as_object_or_string(v)? {
        signature_matcher::json::ObjectOrString::String(s) => {
            Ok(StringMatch::literal(s))
        }
        signature_matcher::json::ObjectOrString::Object(_) => {
            // Same construction path as any other `StringMatch` field:
            // wrap the element back into a one-key object and reuse the
            // shared accessor so flags/matchType are honored.
            let mut wrapper = serde_json::Map::new();
            wrapper.insert("value".to_string(), v.clone());
            StringMatch::from_field(&wrapper, "value", true)?
                .ok_or_else(|| Error::bare(ErrorKind::MissingField("value")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stack(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn pat(names: &[&str]) -> Vec<StringMatch> {
        names.iter().map(|s| StringMatch::literal(*s)).collect()
    }

    #[test]
    fn single_wildcard_semantics() {
        let p = pat(&["A", "?", "C"]);
        assert!(match_seq(&stack(&["A", "X", "C"]), &p));
        assert!(!match_seq(&stack(&["A", "C"]), &p));
        assert!(!match_seq(&stack(&["A", "X", "Y", "C"]), &p));
    }

    #[test]
    fn multi_wildcard_semantics() {
        let p = pat(&["A", "???", "C"]);
        assert!(match_seq(&stack(&["A", "C"]), &p));
        assert!(match_seq(&stack(&["A", "X", "C"]), &p));
        assert!(match_seq(&stack(&["A", "X", "Y", "C"]), &p));
        assert!(!match_seq(&stack(&["A"]), &p));
    }

    #[test]
    fn exact_and_wildcard_mix() {
        let p = pat(&["JS_Assert", "???", "main"]);
        assert!(match_seq(&stack(&["JS_Assert", "foo", "bar", "main"]), &p));
        assert!(!match_seq(&stack(&["foo", "JS_Assert", "main"]), &p));
    }

    fn crash_with_backtrace(names: &[&str]) -> CrashInfo {
        let mut c = CrashInfo::new();
        c.backtrace = stack(names);
        c
    }

    #[test]
    fn diff_inserts_one_wildcard() {
        let sym = StackFramesSymptom { function_names: pat(&["A", "C"]), json: Value::Null };
        let crash = crash_with_backtrace(&["A", "B", "C"]);
        let (depth, generalized) = sym.diff(&crash).unwrap();
        assert_eq!(depth, 1);
        let Symptom::StackFrames(g) = generalized else { panic!("wrong variant") };
        let names: Vec<_> = g.function_names.iter().map(|m| m.pattern()).collect();
        assert_eq!(names, ["A", "?", "C"]);
    }

    #[test]
    fn diff_replaces_one_frame() {
        let sym = StackFramesSymptom { function_names: pat(&["A", "Z", "C"]), json: Value::Null };
        let crash = crash_with_backtrace(&["A", "B", "C"]);
        let (depth, generalized) = sym.diff(&crash).unwrap();
        assert_eq!(depth, 1);
        let Symptom::StackFrames(g) = generalized else { panic!("wrong variant") };
        let names: Vec<_> = g.function_names.iter().map(|m| m.pattern()).collect();
        assert_eq!(names, ["A", "?", "C"]);
    }

    #[test]
    fn diff_gives_up_when_only_trailing_wildcards_survive() {
        let sym = StackFramesSymptom { function_names: pat(&["A", "X"]), json: Value::Null };
        let crash = crash_with_backtrace(&["A"]);
        assert!(sym.diff(&crash).is_none());
    }

    #[test]
    fn diff_returns_none_when_already_matching() {
        let sym = StackFramesSymptom { function_names: pat(&["A", "?"]), json: Value::Null };
        let crash = crash_with_backtrace(&["A", "B"]);
        assert!(sym.diff(&crash).is_none());
        assert!(sym.matches(&crash));
    }

    #[test]
    fn from_object_rejects_empty_list() {
        let obj = match json!({"type": "stackFrames", "functionNames": []}) {
            Value::Object(o) => o,
            _ => unreachable!(),
        };
        assert!(StackFramesSymptom::from_object(&obj, Value::Null).is_err());
    }

    #[test]
    fn array_elements_accept_object_encoding() {
        let doc = json!({
            "type": "stackFrames",
            "functionNames": [{"value": "abort", "matchType": "pcre", "flags": ["caseInsensitive"]}, "???"]
        });
        let obj = match &doc {
            Value::Object(o) => o.clone(),
            _ => unreachable!(),
        };
        let sym = StackFramesSymptom::from_object(&obj, doc).unwrap();
        assert!(sym.matches(&crash_with_backtrace(&["ABORT", "main"])));
    }
}
