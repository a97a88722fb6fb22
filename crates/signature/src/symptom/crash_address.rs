use serde_json::Value;
use signature_matcher::NumberMatch;

use crate::crash_info::CrashInfo;
use crate::error::{Error, ErrorKind};

/// `type = "crashAddress"`: совпадает, если `address.matches(crashAddress)`.
/// Отсутствующий адрес всегда даёт отказ.
#[derive(Clone, Debug)]
pub struct CrashAddressSymptom {
    address: NumberMatch,
    json: Value,
}

impl CrashAddressSymptom {
    pub(crate) fn from_object(
        obj: &serde_json::Map<String, Value>,
        json: Value,
    ) -> Result<CrashAddressSymptom, Error> {
        let address = NumberMatch::from_field(obj, "address", true)?
            .ok_or(Error::bare(ErrorKind::MissingField("address")))?;
        Ok(CrashAddressSymptom { address, json })
    }

    pub fn matches(&self, crash: &CrashInfo) -> bool {
        self.address.matches_u64(crash.crash_address)
    }

    pub(crate) fn to_json(&self) -> Value {
        self.json.clone()
    }
}
