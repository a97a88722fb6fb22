/*!
`CrashSignature`: конъюнкция симптомов, разобранная из объекта с ключом
`"symptoms"`.
*/

use serde_json::Value;

use crate::crash_info::CrashInfo;
use crate::error::{Error, ErrorKind};
use crate::symptom::Symptom;
use crate::symptom::stack_frames::MAX_DIFF_DEPTH;

/// Штраф, который вносит в `getDistance` симптом `stackFrames`, который не
/// совпадает и для которого `diff` не находит обобщения в пределах
/// `maxDepth`. Выбрано как `maxDepth + 1`, так что такой симптом всегда
/// весит строго больше любого найденного обобщения, но конечен (в
/// отличие от `infinity`, которая испортила бы сумму).
const UNGENERALIZABLE_PENALTY: u32 = MAX_DIFF_DEPTH + 1;

/// Упорядоченная конъюнкция симптомов плюс исходный JSON, из которого она
/// была разобрана.
///
/// Порядок сохраняется для сериализации, но сопоставление (`matches`) от
/// порядка не зависит — это чистая конъюнкция.
#[derive(Clone, Debug)]
pub struct CrashSignature {
    symptoms: Vec<Symptom>,
    json: Value,
}

impl CrashSignature {
    /// Разбирает сигнатуру из JSON объекта с ключом `"symptoms"`.
    pub fn parse(v: &Value) -> Result<CrashSignature, Error> {
        let obj = match v {
            Value::Object(o) => o,
            _ => {
                return Err(Error::bare(ErrorKind::BadType {
                    field: "signature",
                    expected: "object",
                }));
            }
        };
        let arr = match obj.get("symptoms") {
            Some(Value::Array(a)) => a,
            Some(_) => {
                return Err(Error::bare(ErrorKind::BadType {
                    field: "symptoms",
                    expected: "array",
                }));
            }
            None => return Err(Error::bare(ErrorKind::MissingField("symptoms"))),
        };
        let symptoms =
            arr.iter().map(Symptom::from_value).collect::<Result<Vec<_>, _>>()?;
        Ok(CrashSignature { symptoms, json: v.clone() })
    }

    /// Конъюнкция: совпадает, если совпадают все симптомы.
    pub fn matches(&self, crash: &CrashInfo) -> bool {
        self.symptoms.iter().all(|s| s.matches(crash))
    }

    /// Сумма по всем симптомам `stackFrames` глубины, возвращённой `diff`,
    /// плюс единица за каждый не-`stackFrames` симптом, который не
    /// совпадает; ноль при полном совпадении.
    pub fn get_distance(&self, crash: &CrashInfo) -> u32 {
        self.symptoms
            .iter()
            .map(|s| match s {
                Symptom::StackFrames(sf) => {
                    if sf.matches(crash) {
                        0
                    } else {
                        match sf.diff(crash) {
                            Some((depth, _)) => depth,
                            None => UNGENERALIZABLE_PENALTY,
                        }
                    }
                }
                other => u32::from(!other.matches(crash)),
            })
            .sum()
    }

    /// Возвращает новую сигнатуру, в которой каждый симптом `stackFrames`
    /// заменён своим обобщением `diff` (когда оно найдено в пределах
    /// `maxDepth = 3`); остальные симптомы остаются без изменений.
    pub fn fit(&self, crash: &CrashInfo) -> CrashSignature {
        let symptoms: Vec<Symptom> = self
            .symptoms
            .iter()
            .map(|s| match s.diff(crash) {
                Some((_, generalized)) => generalized,
                None => s.clone(),
            })
            .collect();
        let json = Value::Object(
            [(
                "symptoms".to_string(),
                Value::Array(symptoms.iter().map(Symptom::to_json).collect()),
            )]
            .into_iter()
            .collect(),
        );
        CrashSignature { symptoms, json }
    }

    pub fn to_json(&self) -> Value {
        self.json.clone()
    }
}
