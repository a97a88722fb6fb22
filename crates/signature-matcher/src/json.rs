/*!
Доступ к типизированным полям декодированного JSON объекта.

Это единственное место в этом крейте, где могут возникать ошибки типа JSON
(`ErrorKind::BadType`, `ErrorKind::MissingKey`). Код выше по стеку
предполагает, что входные данные уже хорошо типизированы.
*/

use serde_json::Value;

use crate::error::{Error, ErrorKind};

/// Представляет либо число, либо строку, полученную из JSON значения, для
/// полей, которые принимают оба кодирования (например, спецификации
/// `NumberMatch`).
#[derive(Clone, Debug)]
pub enum NumberOrString {
    Number(i64),
    String(String),
}

/// Представляет либо JSON объект, либо строку, для полей, которые принимают
/// оба кодирования (например, спецификации `StringMatch`).
#[derive(Clone, Debug)]
pub enum ObjectOrString<'a> {
    Object(&'a serde_json::Map<String, Value>),
    String(&'a str),
}

/// Возвращает строковое значение ключа `k`.
///
/// Завершается ошибкой `BadType`, если ключ присутствует, но не является
/// строкой. Завершается ошибкой `MissingKey`, если ключ отсутствует и
/// `required` истинно. В противном случае возвращает `Ok(None)`.
pub fn get_string_checked(
    obj: &serde_json::Map<String, Value>,
    k: &str,
    required: bool,
) -> Result<Option<String>, Error> {
    match obj.get(k) {
        None if required => {
            Err(Error::new(k, ErrorKind::MissingKey))
        }
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::new(
            k,
            ErrorKind::BadType { expected: "string" },
        )),
    }
}

/// Возвращает целочисленное значение ключа `k`.
pub fn get_number_checked(
    obj: &serde_json::Map<String, Value>,
    k: &str,
    required: bool,
) -> Result<Option<i64>, Error> {
    match obj.get(k) {
        None if required => Err(Error::new(k, ErrorKind::MissingKey)),
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| Error::new(k, ErrorKind::BadType { expected: "integer" })),
        Some(_) => Err(Error::new(
            k,
            ErrorKind::BadType { expected: "number" },
        )),
    }
}

/// Возвращает значение-массив ключа `k`.
pub fn get_array_checked<'a>(
    obj: &'a serde_json::Map<String, Value>,
    k: &str,
    required: bool,
) -> Result<Option<&'a Vec<Value>>, Error> {
    match obj.get(k) {
        None if required => Err(Error::new(k, ErrorKind::MissingKey)),
        None => Ok(None),
        Some(Value::Array(a)) => Ok(Some(a)),
        Some(_) => Err(Error::new(
            k,
            ErrorKind::BadType { expected: "array" },
        )),
    }
}

/// Возвращает значение ключа `k` как число или строку.
///
/// Используется полями, кодирующими спецификацию `NumberMatch`
/// (`IntOrRange` в описании внешнего интерфейса).
pub fn get_number_or_string_checked(
    obj: &serde_json::Map<String, Value>,
    k: &str,
    required: bool,
) -> Result<Option<NumberOrString>, Error> {
    match obj.get(k) {
        None if required => Err(Error::new(k, ErrorKind::MissingKey)),
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|i| Some(NumberOrString::Number(i)))
            .ok_or_else(|| Error::new(k, ErrorKind::BadType { expected: "integer" })),
        Some(Value::String(s)) => Ok(Some(NumberOrString::String(s.clone()))),
        Some(_) => Err(Error::new(
            k,
            ErrorKind::BadType { expected: "number or string" },
        )),
    }
}

/// Возвращает значение ключа `k` как объект или строку.
///
/// Используется полями, кодирующими спецификацию `StringMatch`
/// (`StringOrMatch` в описании внешнего интерфейса).
pub fn get_object_or_string_checked<'a>(
    obj: &'a serde_json::Map<String, Value>,
    k: &str,
    required: bool,
) -> Result<Option<ObjectOrString<'a>>, Error> {
    match obj.get(k) {
        None if required => Err(Error::new(k, ErrorKind::MissingKey)),
        None => Ok(None),
        Some(Value::Object(o)) => Ok(Some(ObjectOrString::Object(o))),
        Some(Value::String(s)) => Ok(Some(ObjectOrString::String(s))),
        Some(_) => Err(Error::new(
            k,
            ErrorKind::BadType { expected: "object or string" },
        )),
    }
}

/// Та же проверка типа, но на верхнем уровне (не под ключом объекта) —
/// используется при разборе значения, которое само может быть строкой
/// или объектом (например, тело `StringMatch`).
pub fn as_object_or_string(v: &Value) -> Result<ObjectOrString<'_>, Error> {
    match v {
        Value::Object(o) => Ok(ObjectOrString::Object(o)),
        Value::String(s) => Ok(ObjectOrString::String(s)),
        _ => Err(Error::bare(ErrorKind::BadType {
            expected: "object or string",
        })),
    }
}

/// Та же проверка типа, но на верхнем уровне, для тела `NumberMatch`.
pub fn as_number_or_string(v: &Value) -> Result<NumberOrString, Error> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .map(NumberOrString::Number)
            .ok_or_else(|| Error::bare(ErrorKind::BadType { expected: "integer" })),
        Value::String(s) => Ok(NumberOrString::String(s.clone())),
        _ => Err(Error::bare(ErrorKind::BadType {
            expected: "number or string",
        })),
    }
}
