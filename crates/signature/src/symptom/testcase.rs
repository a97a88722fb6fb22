use serde_json::Value;
use signature_matcher::StringMatch;

use crate::crash_info::CrashInfo;
use crate::error::{Error, ErrorKind};

/// `type = "testcase"`: совпадает, если какая-либо строка репродьюсера
/// совпадает с `value`. Отсутствующий репродьюсер всегда даёт отказ.
#[derive(Clone, Debug)]
pub struct TestcaseSymptom {
    value: StringMatch,
    json: Value,
}

impl TestcaseSymptom {
    pub(crate) fn from_object(
        obj: &serde_json::Map<String, Value>,
        json: Value,
    ) -> Result<TestcaseSymptom, Error> {
        let value = StringMatch::from_field(obj, "value", true)?
            .ok_or(Error::bare(ErrorKind::MissingField("value")))?;
        Ok(TestcaseSymptom { value, json })
    }

    pub fn matches(&self, crash: &CrashInfo) -> bool {
        let Some(testcase) = crash.testcase.as_deref() else { return false };
        testcase.lines().any(|line| self.value.matches(line))
    }

    pub(crate) fn to_json(&self) -> Value {
        self.json.clone()
    }
}
