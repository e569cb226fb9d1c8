//! Shape rules applied to a post before any mutating call.
//!
//! Both functions are pure: they read a candidate and return either the
//! validated value or every violated rule, in field order. A candidate is
//! either a typed `PostInput` or raw JSON; with raw JSON a wrong-typed field
//! is reported as a violation rather than failing to decode.

use serde_json::Value;

use crate::error::{ValidationError, Violation};
use crate::types::{NewPost, Post, PostInput};

/// One field of a candidate before the rules run.
#[derive(Debug, Clone)]
enum Slot<T> {
    Missing,
    WrongType,
    Present(T),
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Slot::Missing, Slot::Present)
    }
}

/// The fields of a candidate, extracted but not yet checked.
#[derive(Debug, Clone)]
pub struct CandidateFields {
    shape: Option<Violation>,
    user_id: Slot<i64>,
    id: Slot<i64>,
    title: Slot<String>,
    body: Slot<String>,
}

/// Anything the validators accept.
pub trait PostCandidate {
    fn fields(&self) -> CandidateFields;
}

impl PostCandidate for PostInput {
    fn fields(&self) -> CandidateFields {
        CandidateFields {
            shape: None,
            user_id: self.user_id.into(),
            id: self.id.into(),
            title: self.title.clone().into(),
            body: self.body.clone().into(),
        }
    }
}

impl PostCandidate for Value {
    fn fields(&self) -> CandidateFields {
        let Some(object) = self.as_object() else {
            return CandidateFields {
                shape: Some(Violation {
                    field: "post",
                    message: "post must be a JSON object".to_string(),
                }),
                user_id: Slot::Missing,
                id: Slot::Missing,
                title: Slot::Missing,
                body: Slot::Missing,
            };
        };
        CandidateFields {
            shape: None,
            user_id: json_slot(object.get("userId"), json_integer),
            id: json_slot(object.get("id"), json_integer),
            title: json_slot(object.get("title"), |v| v.as_str().map(str::to_string)),
            body: json_slot(object.get("body"), |v| v.as_str().map(str::to_string)),
        }
    }
}

/// `null` counts as absent, like an omitted key.
fn json_slot<T>(value: Option<&Value>, convert: impl Fn(&Value) -> Option<T>) -> Slot<T> {
    match value {
        None | Some(Value::Null) => Slot::Missing,
        Some(v) => convert(v).map_or(Slot::WrongType, Slot::Present),
    }
}

/// Integral floats such as `1.0` are accepted; `1.5` is not.
fn json_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Validate a candidate for creation. A present `id` is dropped, not rejected,
/// whatever its type.
pub fn validate_for_create<C: PostCandidate + ?Sized>(candidate: &C) -> Result<NewPost, ValidationError> {
    let fields = candidate.fields();
    let mut violations: Vec<Violation> = fields.shape.into_iter().collect();
    let user_id = integer(&mut violations, "userId", fields.user_id);
    let title = non_empty(&mut violations, "title", "Title", fields.title);
    let body = non_empty(&mut violations, "body", "Body", fields.body);

    match (user_id, title, body) {
        (Some(user_id), Some(title), Some(body)) if violations.is_empty() => Ok(NewPost {
            user_id,
            title,
            body,
        }),
        _ => Err(ValidationError { violations }),
    }
}

/// Validate a candidate for update. Same rules as creation, plus a required
/// integer `id`.
pub fn validate_for_update<C: PostCandidate + ?Sized>(candidate: &C) -> Result<Post, ValidationError> {
    let fields = candidate.fields();
    let mut violations: Vec<Violation> = fields.shape.into_iter().collect();
    let user_id = integer(&mut violations, "userId", fields.user_id);
    let id = integer(&mut violations, "id", fields.id);
    let title = non_empty(&mut violations, "title", "Title", fields.title);
    let body = non_empty(&mut violations, "body", "Body", fields.body);

    match (user_id, id, title, body) {
        (Some(user_id), Some(id), Some(title), Some(body)) if violations.is_empty() => Ok(Post {
            user_id,
            id,
            title,
            body,
        }),
        _ => Err(ValidationError { violations }),
    }
}

fn integer(violations: &mut Vec<Violation>, field: &'static str, slot: Slot<i64>) -> Option<i64> {
    let message = match slot {
        Slot::Present(value) => return Some(value),
        Slot::Missing => format!("{field} is required"),
        Slot::WrongType => format!("{field} must be an integer"),
    };
    violations.push(Violation { field, message });
    None
}

fn non_empty(
    violations: &mut Vec<Violation>,
    field: &'static str,
    label: &str,
    slot: Slot<String>,
) -> Option<String> {
    let message = match slot {
        Slot::Present(s) if !s.is_empty() => return Some(s),
        Slot::Present(_) => format!("{label} cannot be empty"),
        Slot::Missing => format!("{field} is required"),
        Slot::WrongType => format!("{field} must be a string"),
    };
    violations.push(Violation { field, message });
    None
}
