//! Request validation - turns wire shapes into checked domain input.
//!
//! Everything here runs before the repository is touched. Bodies arrive as raw
//! JSON so a field of the wrong type (or `null`) is reported on that field,
//! next to every other violation.

use folio_core::domain::{NewPost, PostChanges, PostId};
use folio_shared::FieldError;
use folio_shared::dto::{CreatePostRequest, UpdatePostRequest};
use serde_json::{Map, Value};
use validator::Validate;

use crate::middleware::error::AppError;

/// Parse the `{id}` path segment. Only ASCII digits are accepted.
pub fn parse_post_id(raw: &str) -> Result<PostId, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::Validation(vec![FieldError::new(
            "id",
            "pattern",
            "Invalid ID format",
        )]));
    }

    raw.parse().map_err(|_| {
        AppError::Validation(vec![FieldError::new("id", "range", "ID is out of range")])
    })
}

pub fn new_post(body: Value) -> Result<NewPost, AppError> {
    let mut fields = body_object(body)?;
    let mut violations = Vec::new();

    let request = CreatePostRequest {
        title: string_field(&mut fields, "title", &mut violations),
        content: string_field(&mut fields, "content", &mut violations),
    };
    check(&request, violations)?;

    // `required` has already rejected missing fields.
    let CreatePostRequest { title, content } = request;
    Ok(NewPost::new(
        title.unwrap_or_default(),
        content.unwrap_or_default(),
    ))
}

pub fn post_changes(body: Value) -> Result<PostChanges, AppError> {
    let mut fields = body_object(body)?;
    let mut violations = Vec::new();

    let request = UpdatePostRequest {
        title: string_field(&mut fields, "title", &mut violations),
        content: string_field(&mut fields, "content", &mut violations),
    };
    check(&request, violations)?;

    Ok(PostChanges {
        title: request.title,
        content: request.content,
    })
}

fn body_object(body: Value) -> Result<Map<String, Value>, AppError> {
    match body {
        Value::Object(fields) => Ok(fields),
        other => Err(AppError::Validation(vec![FieldError::new(
            "body",
            "type",
            format!("Expected object, received {}", json_type(&other)),
        )])),
    }
}

/// Take a string field out of the body. Absent is `None`; any other JSON type,
/// `null` included, is recorded as a violation.
fn string_field(
    fields: &mut Map<String, Value>,
    name: &'static str,
    violations: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.remove(name)? {
        Value::String(value) => Some(value),
        other => {
            violations.push(FieldError::new(
                name,
                "type",
                format!("Expected string, received {}", json_type(&other)),
            ));
            None
        }
    }
}

/// Merge type violations with the declarative constraints. A field that already
/// has the wrong type is not reported again as missing.
fn check(request: &impl Validate, mut violations: Vec<FieldError>) -> Result<(), AppError> {
    if let Err(errors) = request.validate() {
        let constraint_violations: Vec<FieldError> = FieldError::from_validation(&errors)
            .into_iter()
            .filter(|e| !violations.iter().any(|v| v.field == e.field))
            .collect();
        violations.extend(constraint_violations);
    }

    if violations.is_empty() {
        return Ok(());
    }

    violations.sort_by(|a, b| a.field.cmp(&b.field));
    Err(AppError::Validation(violations))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
