//! Request validation.
//!
//! Every handler validates its path and body up front and reports all
//! failing fields at once, before any service call:
//!
//! ```json
//! {"errors": [{"location": "body", "param": "name", "msg": "Invalid value"}]}
//! ```

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

const INVALID_VALUE: &str = "Invalid value";

/// One failing request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub location: &'static str,
    pub param: String,
    pub msg: String,
}

impl FieldError {
    /// A missing or malformed body field.
    pub fn body(param: &str) -> Self {
        Self {
            location: "body",
            param: param.to_string(),
            msg: INVALID_VALUE.to_string(),
        }
    }

    /// A missing or malformed path parameter.
    pub fn params(param: &str) -> Self {
        Self {
            location: "params",
            param: param.to_string(),
            msg: INVALID_VALUE.to_string(),
        }
    }
}

/// Collects field errors for one request.
#[derive(Debug, Default)]
pub struct Validator {
    fields: Map<String, Value>,
    errors: Vec<FieldError>,
}

impl Validator {
    /// A validator for a request without a body.
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator over the extracted JSON body.
    ///
    /// A request that is not declared as JSON is treated as an empty body, so
    /// every required field is reported missing. A declared JSON body that
    /// fails to parse is rejected outright.
    pub fn with_body(body: Result<Json<Value>, JsonRejection>) -> Result<Self, ApiError> {
        let fields = match body {
            Ok(Json(Value::Object(fields))) => fields,
            Ok(Json(_)) | Err(JsonRejection::MissingJsonContentType(_)) => Map::new(),
            Err(rejection) => return Err(ApiError::BadRequest(rejection.body_text())),
        };
        Ok(Self {
            fields,
            errors: Vec::new(),
        })
    }

    /// Parses an integer path parameter.
    pub fn path_id(&mut self, param: &str, raw: &str) -> Option<i64> {
        let parsed = raw.trim().parse::<i64>().ok();
        if parsed.is_none() {
            self.errors.push(FieldError::params(param));
        }
        parsed
    }

    /// Requires a string body field.
    pub fn string(&mut self, param: &str) -> Option<String> {
        match self.fields.get(param) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => {
                self.errors.push(FieldError::body(param));
                None
            }
        }
    }

    /// Requires a non-negative integer body field. Integer strings such as
    /// `"5"` and integral floats such as `5.0` are accepted.
    pub fn quantity(&mut self, param: &str) -> Option<u32> {
        let parsed = match self.fields.get(param) {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(q) => u32::try_from(q).ok(),
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(f))
                    .map(|f| f as u32),
            },
            Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.push(FieldError::body(param));
        }
        parsed
    }

    /// The validation error for everything collected so far.
    pub fn into_error(self) -> ApiError {
        ApiError::Validation(self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(body: Value) -> Validator {
        Validator::with_body(Ok(Json(body))).unwrap()
    }

    #[test]
    fn strings_must_be_strings() {
        let mut v = validator(serde_json::json!({ "name": "W1", "address": 12 }));
        assert_eq!(v.string("name").as_deref(), Some("W1"));
        assert!(v.string("address").is_none());
        assert!(v.string("missing").is_none());

        let ApiError::Validation(errors) = v.into_error() else {
            panic!("expected validation error");
        };
        assert_eq!(errors, vec![FieldError::body("address"), FieldError::body("missing")]);
    }

    #[test]
    fn quantity_accepts_non_negative_integers() {
        let mut v = validator(serde_json::json!({
            "a": 5, "b": "7", "c": 0, "d": -1, "e": 1.5, "f": "x", "g": 5_000_000_000u64,
            "h": 5.0, "i": -2.0, "j": 5.0e9
        }));
        assert_eq!(v.quantity("a"), Some(5));
        assert_eq!(v.quantity("b"), Some(7));
        assert_eq!(v.quantity("c"), Some(0));
        assert_eq!(v.quantity("d"), None);
        assert_eq!(v.quantity("e"), None);
        assert_eq!(v.quantity("f"), None);
        assert_eq!(v.quantity("g"), None);
        assert_eq!(v.quantity("h"), Some(5));
        assert_eq!(v.quantity("i"), None);
        assert_eq!(v.quantity("j"), None);
    }

    #[test]
    fn path_ids_must_be_integers() {
        let mut v = Validator::new();
        assert_eq!(v.path_id("id", "42"), Some(42));
        assert_eq!(v.path_id("id", "abc"), None);

        let ApiError::Validation(errors) = v.into_error() else {
            panic!("expected validation error");
        };
        assert_eq!(errors, vec![FieldError::params("id")]);
    }

    #[test]
    fn non_object_body_reports_missing_fields() {
        let mut v = validator(serde_json::json!([1, 2, 3]));
        assert!(v.string("name").is_none());
    }
}
