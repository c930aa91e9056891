//! Request parameter plumbing: bodies that may arrive as JSON or as a
//! urlencoded form, and identifiers that may arrive as numbers or strings.

use std::collections::HashMap;

use actix_web::web;
use actix_web::Either;
use serde::Deserialize;
use serde_json::Value;

/// A request body accepted either as `application/json` or as
/// `application/x-www-form-urlencoded`.
pub type Body<T> = Either<web::Json<T>, web::Form<T>>;

pub fn into_inner<T>(body: Body<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// An id as a client sent it. Forms always send text; JSON may send either.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdParam {
    Number(i64),
    Text(String),
}

impl IdParam {
    /// The numeric id, or `None` when the text is not one. Such an id cannot
    /// name a stored row.
    pub fn resolve(&self) -> Option<i64> {
        match self {
            IdParam::Number(id) => Some(*id),
            IdParam::Text(text) => text.trim().parse().ok(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(IdParam::Number),
            Value::String(s) if !s.is_empty() => Some(IdParam::Text(s.clone())),
            _ => None,
        }
    }
}

/// Field names that may carry the same logical id, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdFields {
    names: Vec<String>,
}

impl IdFields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The value of the first recognized field that is present and non-empty.
    pub fn resolve(&self, fields: &HashMap<String, Value>) -> Option<IdParam> {
        self.names
            .iter()
            .find_map(|name| fields.get(name).and_then(IdParam::from_value))
    }
}

impl Default for IdFields {
    fn default() -> Self {
        Self::new(["thread_id", "report_id"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn thread_id_wins_over_report_id() {
        let id = IdFields::default().resolve(&fields(json!({ "report_id": 2, "thread_id": 1 })));
        assert_eq!(id, Some(IdParam::Number(1)));
    }

    #[test]
    fn report_id_is_the_fallback() {
        let id = IdFields::default().resolve(&fields(json!({ "report_id": "7" })));
        assert_eq!(id.and_then(|id| id.resolve()), Some(7));
    }

    #[test]
    fn empty_field_counts_as_absent() {
        let id = IdFields::default().resolve(&fields(json!({ "thread_id": "", "report_id": 3 })));
        assert_eq!(id, Some(IdParam::Number(3)));
    }

    #[test]
    fn custom_priority_is_honored() {
        let names = IdFields::new(["report_id", "thread_id"]);
        let id = names.resolve(&fields(json!({ "thread_id": 1, "report_id": 2 })));
        assert_eq!(id, Some(IdParam::Number(2)));
    }

    #[test]
    fn non_numeric_text_does_not_resolve() {
        assert_eq!(IdParam::Text("<nonexistent>".into()).resolve(), None);
        assert_eq!(IdParam::Text(" 12 ".into()).resolve(), Some(12));
    }
}
