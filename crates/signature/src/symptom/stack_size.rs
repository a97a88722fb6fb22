use serde_json::Value;
use signature_matcher::NumberMatch;

use crate::crash_info::CrashInfo;
use crate::error::{Error, ErrorKind};

/// `type = "stackSize"`: совпадает, если `size.matches(len(backtrace))`.
#[derive(Clone, Debug)]
pub struct StackSizeSymptom {
    size: NumberMatch,
    json: Value,
}

impl StackSizeSymptom {
    pub(crate) fn from_object(
        obj: &serde_json::Map<String, Value>,
        json: Value,
    ) -> Result<StackSizeSymptom, Error> {
        let size = NumberMatch::from_field(obj, "size", true)?
            .ok_or(Error::bare(ErrorKind::MissingField("size")))?;
        Ok(StackSizeSymptom { size, json })
    }

    pub fn matches(&self, crash: &CrashInfo) -> bool {
        self.size.matches(i64::try_from(crash.backtrace.len()).ok())
    }

    pub(crate) fn to_json(&self) -> Value {
        self.json.clone()
    }
}
