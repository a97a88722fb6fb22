/*!
Движок сопоставления сигнатур падений: разбирает декларативные JSON
сигнатуры и проверяет, описывают ли они данное падение программы.

Сигнатура — это конъюнкция **симптомов** (`output`, `stackFrame`,
`stackFrames`, `stackSize`, `crashAddress`, `instruction`, `testcase`);
каждый симптом проверяет одну грань структурированного отчёта о падении
([`CrashInfo`]). `stackFrames` дополнительно поддерживает частичное
совпадение через [`CrashSignature::get_distance`] и обобщение через
[`CrashSignature::fit`] — см. [`symptom::StackFramesSymptom::diff`].

Этот крейт не содержит ни CLI, ни точки входа процесса: он используется
исключительно как библиотека вызывающим кодом, который сам решает, откуда
берутся JSON сигнатуры и структурированные отчёты о падении.
*/

mod crash_info;
mod error;
mod signature;
pub mod symptom;

pub use crate::crash_info::CrashInfo;
pub use crate::error::{Error, ErrorKind};
pub use crate::signature::CrashSignature;
pub use crate::symptom::Symptom;
