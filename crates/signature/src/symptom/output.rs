use serde_json::Value;
use signature_matcher::StringMatch;

use crate::crash_info::CrashInfo;
use crate::error::{Error, ErrorKind};

/// Откуда читать строки для `OutputSymptom`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source {
    Stdout,
    Stderr,
}

/// `type = "output"`: совпадает, если какая-либо строка выбранного
/// источника (или обоих, когда `src` не указан) совпадает с `value`.
#[derive(Clone, Debug)]
pub struct OutputSymptom {
    value: StringMatch,
    src: Option<Source>,
    json: Value,
}

impl OutputSymptom {
    pub(crate) fn from_object(
        obj: &serde_json::Map<String, Value>,
        json: Value,
    ) -> Result<OutputSymptom, Error> {
        let value = StringMatch::from_field(obj, "value", true)?
            .ok_or(Error::bare(ErrorKind::MissingField("value")))?;
        let src = match obj.get("src") {
            None => None,
            Some(Value::String(s)) => match s.to_lowercase().as_str() {
                "stdout" => Some(Source::Stdout),
                "stderr" => Some(Source::Stderr),
                _ => return Err(Error::bare(ErrorKind::BadSource(s.clone()))),
            },
            Some(_) => {
                return Err(Error::bare(ErrorKind::BadSource(String::new())));
            }
        };
        Ok(OutputSymptom { value, src, json })
    }

    pub fn matches(&self, crash: &CrashInfo) -> bool {
        let search_stdout = matches!(self.src, None | Some(Source::Stdout));
        let search_stderr = matches!(self.src, None | Some(Source::Stderr));

        if search_stdout && crash.raw_stdout.iter().any(|l| self.value.matches(l)) {
            return true;
        }
        if search_stderr && crash.raw_stderr.iter().any(|l| self.value.matches(l)) {
            return true;
        }
        false
    }

    pub(crate) fn to_json(&self) -> Value {
        self.json.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> OutputSymptom {
        let obj = match &v {
            Value::Object(o) => o.clone(),
            _ => unreachable!(),
        };
        OutputSymptom::from_object(&obj, v).unwrap()
    }

    #[test]
    fn matches_stderr_only() {
        let sym = parse(json!({
            "type": "output",
            "src": "stderr",
            "value": "Assertion failure"
        }));
        let mut crash = CrashInfo::new();
        crash.raw_stderr = vec!["foo".into(), "Assertion failure: bar".into()];
        assert!(sym.matches(&crash));

        crash.raw_stderr = vec!["foo".into()];
        assert!(!sym.matches(&crash));
    }

    #[test]
    fn no_src_searches_both_stdout_first() {
        let sym = parse(json!({"type": "output", "value": "needle"}));
        let mut crash = CrashInfo::new();
        crash.raw_stdout = vec!["needle in stdout".into()];
        assert!(sym.matches(&crash));

        let mut crash = CrashInfo::new();
        crash.raw_stderr = vec!["needle in stderr".into()];
        assert!(sym.matches(&crash));
    }

    #[test]
    fn bad_source_is_an_error() {
        let obj = match json!({"type": "output", "value": "x", "src": "stdfoo"}) {
            Value::Object(o) => o,
            _ => unreachable!(),
        };
        assert!(OutputSymptom::from_object(&obj, Value::Null).is_err());
    }
}
