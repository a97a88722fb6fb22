/*!
`Symptom`: один проверяемый признак падения, разобранный из объекта с
ключом `type`.

Каждый вид симптома живёт в своём собственном модуле и хранит исходное
JSON-значение, из которого он был построен, чтобы `to_json` мог
воспроизвести его дословно (см. design note §9: round-trip через поля,
не указанные в сокращённой форме, тоже должен сохраняться).
*/

mod crash_address;
mod instruction;
mod output;
mod stack_frame;
pub(crate) mod stack_frames;
mod stack_size;
mod testcase;

pub use crash_address::CrashAddressSymptom;
pub use instruction::InstructionSymptom;
pub use output::{OutputSymptom, Source};
pub use stack_frame::StackFrameSymptom;
pub use stack_frames::StackFramesSymptom;
pub use stack_size::StackSizeSymptom;
pub use testcase::TestcaseSymptom;

use serde_json::Value;

use crate::crash_info::CrashInfo;
use crate::error::{Error, ErrorKind};

/// Один проверяемый признак падения.
///
/// Каждый вариант соответствует ровно одному значению ключа JSON `type`.
#[derive(Clone, Debug)]
pub enum Symptom {
    Output(OutputSymptom),
    StackFrame(StackFrameSymptom),
    StackFrames(StackFramesSymptom),
    StackSize(StackSizeSymptom),
    CrashAddress(CrashAddressSymptom),
    Instruction(InstructionSymptom),
    Testcase(TestcaseSymptom),
}

impl Symptom {
    /// Разбирает один симптом из JSON значения, диспетчеризуя по его
    /// ключу `type`.
    pub fn from_value(v: &Value) -> Result<Symptom, Error> {
        let obj = match v {
            Value::Object(o) => o,
            _ => {
                return Err(Error::bare(ErrorKind::BadType {
                    field: "symptom",
                    expected: "object",
                }));
            }
        };
        let ty = match obj.get("type") {
            Some(Value::String(s)) => s.as_str(),
            Some(_) => {
                return Err(Error::bare(ErrorKind::BadType {
                    field: "type",
                    expected: "string",
                }));
            }
            None => return Err(Error::bare(ErrorKind::MissingField("type"))),
        };

        match ty {
            "output" => output::OutputSymptom::from_object(obj, v.clone())
                .map(Symptom::Output),
            "stackFrame" => {
                stack_frame::StackFrameSymptom::from_object(obj, v.clone())
                    .map(Symptom::StackFrame)
            }
            "stackFrames" => {
                stack_frames::StackFramesSymptom::from_object(obj, v.clone())
                    .map(Symptom::StackFrames)
            }
            "stackSize" => {
                stack_size::StackSizeSymptom::from_object(obj, v.clone())
                    .map(Symptom::StackSize)
            }
            "crashAddress" => {
                crash_address::CrashAddressSymptom::from_object(obj, v.clone())
                    .map(Symptom::CrashAddress)
            }
            "instruction" => {
                instruction::InstructionSymptom::from_object(obj, v.clone())
                    .map(Symptom::Instruction)
            }
            "testcase" => testcase::TestcaseSymptom::from_object(obj, v.clone())
                .map(Symptom::Testcase),
            other => Err(Error::bare(ErrorKind::UnknownSymptomType(other.to_string()))),
        }
    }

    pub fn matches(&self, crash: &CrashInfo) -> bool {
        match self {
            Symptom::Output(s) => s.matches(crash),
            Symptom::StackFrame(s) => s.matches(crash),
            Symptom::StackFrames(s) => s.matches(crash),
            Symptom::StackSize(s) => s.matches(crash),
            Symptom::CrashAddress(s) => s.matches(crash),
            Symptom::Instruction(s) => s.matches(crash),
            Symptom::Testcase(s) => s.matches(crash),
        }
    }

    /// Для `stackFrames`, вычисляет генерализующее редактирование, когда
    /// этот симптом ещё не совпадает; для всех остальных видов симптомов
    /// всегда возвращает `None` — они не поддерживают обобщение.
    pub fn diff(&self, crash: &CrashInfo) -> Option<(u32, Symptom)> {
        match self {
            Symptom::StackFrames(s) => s.diff(crash),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Symptom::Output(s) => s.to_json(),
            Symptom::StackFrame(s) => s.to_json(),
            Symptom::StackFrames(s) => s.to_json(),
            Symptom::StackSize(s) => s.to_json(),
            Symptom::CrashAddress(s) => s.to_json(),
            Symptom::Instruction(s) => s.to_json(),
            Symptom::Testcase(s) => s.to_json(),
        }
    }
}
