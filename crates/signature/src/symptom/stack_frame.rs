use serde_json::Value;
use signature_matcher::{NumberMatch, StringMatch};

use crate::crash_info::CrashInfo;
use crate::error::{Error, ErrorKind};

/// `type = "stackFrame"`: совпадает, если существует индекс `i` в
/// `backtrace`, для которого `frameNumber.matches(i)` и
/// `functionName.matches(backtrace[i])`.
///
/// Индексы нумеруются от самого внутреннего кадра (индекс `0` — упавший
/// кадр).
#[derive(Clone, Debug)]
pub struct StackFrameSymptom {
    function_name: StringMatch,
    frame_number: NumberMatch,
    json: Value,
}

impl StackFrameSymptom {
    pub(crate) fn from_object(
        obj: &serde_json::Map<String, Value>,
        json: Value,
    ) -> Result<StackFrameSymptom, Error> {
        let function_name = StringMatch::from_field(obj, "functionName", true)?
            .ok_or(Error::bare(ErrorKind::MissingField("functionName")))?;
        let frame_number = NumberMatch::from_field(obj, "frameNumber", false)?
            .unwrap_or_else(|| NumberMatch::exact(0));
        Ok(StackFrameSymptom { function_name, frame_number, json })
    }

    pub fn matches(&self, crash: &CrashInfo) -> bool {
        crash.backtrace.iter().enumerate().any(|(i, name)| {
            self.frame_number.matches(i64::try_from(i).ok())
                && self.function_name.matches(name)
        })
    }

    pub(crate) fn to_json(&self) -> Value {
        self.json.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> StackFrameSymptom {
        let obj = match &v {
            Value::Object(o) => o.clone(),
            _ => unreachable!(),
        };
        StackFrameSymptom::from_object(&obj, v).unwrap()
    }

    #[test]
    fn default_frame_number_is_zero() {
        let sym = parse(json!({"type": "stackFrame", "functionName": "abort"}));
        let mut crash = CrashInfo::new();
        crash.backtrace = vec!["abort".into(), "main".into()];
        assert!(sym.matches(&crash));

        crash.backtrace = vec!["main".into(), "abort".into()];
        assert!(!sym.matches(&crash));
    }

    #[test]
    fn explicit_frame_number_range() {
        let sym = parse(json!({
            "type": "stackFrame",
            "functionName": "helper",
            "frameNumber": ">= 1"
        }));
        let mut crash = CrashInfo::new();
        crash.backtrace = vec!["top".into(), "helper".into(), "main".into()];
        assert!(sym.matches(&crash));
    }
}
