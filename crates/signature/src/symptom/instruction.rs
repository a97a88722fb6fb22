use serde_json::Value;
use signature_matcher::StringMatch;

use crate::crash_info::CrashInfo;
use crate::error::{Error, ErrorKind};

/// `type = "instruction"`: совпадает, если упавшая инструкция известна и
/// удовлетворяет всем заданным условиям (конъюнкция): каждое имя в
/// `registerNames` встречается как подстрока, и `instructionName`, если
/// задан, совпадает.
///
/// Хотя бы одно из двух полей должно присутствовать.
#[derive(Clone, Debug)]
pub struct InstructionSymptom {
    instruction_name: Option<StringMatch>,
    register_names: Vec<String>,
    json: Value,
}

impl InstructionSymptom {
    pub(crate) fn from_object(
        obj: &serde_json::Map<String, Value>,
        json: Value,
    ) -> Result<InstructionSymptom, Error> {
        let instruction_name =
            StringMatch::from_field(obj, "instructionName", false)?;
        let register_names = match obj.get("registerNames") {
            None => Vec::new(),
            Some(Value::Array(arr)) => arr
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| {
                        Error::bare(ErrorKind::BadType {
                            field: "registerNames",
                            expected: "array of strings",
                        })
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(Error::bare(ErrorKind::BadType {
                    field: "registerNames",
                    expected: "array of strings",
                }));
            }
        };

        if instruction_name.is_none() && register_names.is_empty() {
            return Err(Error::bare(ErrorKind::MissingField(
                "instructionName or registerNames",
            )));
        }

        Ok(InstructionSymptom { instruction_name, register_names, json })
    }

    pub fn matches(&self, crash: &CrashInfo) -> bool {
        let Some(instr) = crash.crash_instruction.as_deref() else {
            return false;
        };
        if !self.register_names.iter().all(|reg| instr.contains(reg.as_str())) {
            return false;
        }
        if let Some(name) = &self.instruction_name {
            if !name.matches(instr) {
                return false;
            }
        }
        true
    }

    pub(crate) fn to_json(&self) -> Value {
        self.json.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> InstructionSymptom {
        let obj = match &v {
            Value::Object(o) => o.clone(),
            _ => unreachable!(),
        };
        InstructionSymptom::from_object(&obj, v).unwrap()
    }

    #[test]
    fn register_and_name_conjunction() {
        let sym = parse(json!({
            "type": "instruction",
            "instructionName": "mov",
            "registerNames": ["rax", "rdi"]
        }));
        let mut crash = CrashInfo::new();
        crash.crash_instruction = Some("mov rax, [rdi]".into());
        assert!(sym.matches(&crash));

        crash.crash_instruction = Some("mov rax, [rsi]".into());
        assert!(!sym.matches(&crash));
    }

    #[test]
    fn absent_instruction_never_matches() {
        let sym = parse(json!({"type": "instruction", "instructionName": "mov"}));
        let crash = CrashInfo::new();
        assert!(!sym.matches(&crash));
    }

    #[test]
    fn requires_at_least_one_field() {
        let obj = match json!({"type": "instruction"}) {
            Value::Object(o) => o,
            _ => unreachable!(),
        };
        assert!(InstructionSymptom::from_object(&obj, Value::Null).is_err());
    }
}
