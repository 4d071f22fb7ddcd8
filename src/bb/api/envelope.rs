// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Response envelope detection and normalization.
//!
//! Newer endpoints wrap every response as
//! `{ "status": bool, "message": ..., "body": ..., "errors": [...] }`; older
//! ones return the payload directly. Both are resolved here, once, into a
//! `NormalizedResult`.

use hyper::StatusCode;

use serde_json::{self, Map, Value};

/// The uniform `{status, message, body, errors}` wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEnvelope {
    status: bool,
    message: Option<String>,
    body: Option<Value>,
    data: Option<Value>,
    errors: Vec<String>,
    raw: Value,
}

impl ApiEnvelope {
    /// True only when the `status` field is the boolean `true`.
    pub fn status(&self) -> bool {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(String::as_str)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// True if the envelope carried a non-null `body` or `data`.
    pub fn has_payload(&self) -> bool {
        self.body.is_some() || self.data.is_some()
    }

    /// The payload: `body`, else `data`, else the envelope itself.
    pub fn payload(&self) -> Value {
        self.body
            .clone()
            .or_else(|| self.data.clone())
            .unwrap_or_else(|| self.raw.clone())
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let present = |key: &str| match object.get(key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v.clone()),
        };
        Self {
            status: object.get("status") == Some(&Value::Bool(true)),
            message: object
                .get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from),
            body: present("body"),
            data: present("data"),
            errors: object.get("errors").map(collect_errors).unwrap_or_default(),
            raw: Value::Object(object.clone()),
        }
    }
}

// `errors` is documented as a list of strings, but validation failures
// arrive as `{ "Field": ["msg", ...] }`. Both are flattened.
fn collect_errors(value: &Value) -> Vec<String> {
    let errors: Vec<String> = match *value {
        Value::String(ref s) => vec![s.clone()],
        Value::Array(ref items) => items.iter().flat_map(collect_errors).collect(),
        Value::Object(ref fields) => fields.values().flat_map(collect_errors).collect(),
        _ => vec![],
    };
    errors.into_iter().filter(|e| !e.trim().is_empty()).collect()
}

/// A parsed response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// A JSON object carrying a `status` field.
    Modern(ApiEnvelope),
    /// Anything else: other JSON, a raw string for non-JSON text, or null
    /// for an empty body.
    Legacy(Value),
}

impl Envelope {
    /// Classifies a response body. Never fails: text that is not JSON is
    /// kept as a JSON string.
    pub fn parse(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        if text.trim().is_empty() {
            return Envelope::Legacy(Value::Null);
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(ref object)) if object.contains_key("status") => {
                Envelope::Modern(ApiEnvelope::from_object(object))
            }
            Ok(value) => Envelope::Legacy(value),
            Err(_) => Envelope::Legacy(Value::String(text.into_owned())),
        }
    }
}

/// The outcome of a single gateway call.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResult {
    ok: bool,
    status: StatusCode,
    data: Value,
    envelope: Option<ApiEnvelope>,
}

impl NormalizedResult {
    pub fn new(status: StatusCode, envelope: Envelope) -> Self {
        let http_ok = status.is_success();
        match envelope {
            Envelope::Modern(envelope) => Self {
                ok: http_ok && envelope.status(),
                status,
                data: envelope.payload(),
                envelope: Some(envelope),
            },
            Envelope::Legacy(data) => Self {
                ok: http_ok,
                status,
                data,
                envelope: None,
            },
        }
    }

    pub fn from_body(status: StatusCode, body: &[u8]) -> Self {
        Self::new(status, Envelope::parse(body))
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    pub fn envelope(&self) -> Option<&ApiEnvelope> {
        self.envelope.as_ref()
    }

    /// False when the server sent nothing beyond the envelope: an empty
    /// body, a null legacy value, or an envelope without `body`/`data`.
    pub fn has_payload(&self) -> bool {
        match self.envelope {
            Some(ref envelope) => envelope.has_payload(),
            None => !self.data.is_null(),
        }
    }

    /// The most specific failure message available.
    pub fn failure_message(&self) -> String {
        if let Some(ref envelope) = self.envelope {
            if let Some(message) = envelope.message() {
                return message.to_string();
            }
            if !envelope.errors().is_empty() {
                return envelope.errors().join(", ");
            }
        } else {
            match self.data {
                Value::String(ref s) if !s.trim().is_empty() => return s.trim().to_string(),
                Value::Object(ref object) => {
                    let found = ["message", "title", "error"]
                        .iter()
                        .filter_map(|key| object.get(*key).and_then(Value::as_str))
                        .find(|m| !m.trim().is_empty());
                    if let Some(message) = found {
                        return message.to_string();
                    }
                    if let Some(errors) = object.get("errors") {
                        let errors = collect_errors(errors);
                        if !errors.is_empty() {
                            return errors.join(", ");
                        }
                    }
                }
                _ => {}
            }
        }
        format!("Request failed with status {}", self.status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_envelope_unwraps_body() {
        let result = NormalizedResult::from_body(
            StatusCode::OK,
            br#"{"status": true, "body": {"id": 1}}"#,
        );
        assert!(result.is_ok());
        assert_eq!(result.data(), &json!({"id": 1}));
        assert!(result.envelope().is_some());
    }

    #[test]
    fn failed_envelope_fails_despite_http_success() {
        let result =
            NormalizedResult::from_body(StatusCode::OK, br#"{"status": false, "message": "bad"}"#);
        assert!(!result.is_ok());
        assert_eq!(result.status(), StatusCode::OK);
        assert_eq!(result.failure_message(), "bad");
    }

    #[test]
    fn truthy_but_non_boolean_status_is_not_success() {
        let result =
            NormalizedResult::from_body(StatusCode::OK, br#"{"status": "true", "body": 1}"#);
        assert!(!result.is_ok());
    }

    #[test]
    fn data_field_used_when_body_missing() {
        let result = NormalizedResult::from_body(
            StatusCode::OK,
            br#"{"status": true, "body": null, "data": [1, 2]}"#,
        );
        assert_eq!(result.data(), &json!([1, 2]));
    }

    #[test]
    fn whole_envelope_used_when_no_payload_field() {
        let result =
            NormalizedResult::from_body(StatusCode::OK, br#"{"status": true, "message": "done"}"#);
        assert!(result.is_ok());
        assert!(!result.has_payload());
        assert_eq!(result.data(), &json!({"status": true, "message": "done"}));
    }

    #[test]
    fn payload_presence_is_tracked() {
        let with_body =
            NormalizedResult::from_body(StatusCode::OK, br#"{"status": true, "body": []}"#);
        assert!(with_body.has_payload());

        let null_body =
            NormalizedResult::from_body(StatusCode::OK, br#"{"status": true, "body": null}"#);
        assert!(!null_body.has_payload());

        assert!(!NormalizedResult::from_body(StatusCode::OK, b"").has_payload());
        assert!(NormalizedResult::from_body(StatusCode::OK, b"[]").has_payload());
    }

    #[test]
    fn http_failure_wins_over_envelope_status() {
        let result = NormalizedResult::from_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"status": true, "body": {}}"#,
        );
        assert!(!result.is_ok());
    }

    #[test]
    fn legacy_json_passes_through() {
        let result = NormalizedResult::from_body(StatusCode::OK, br#"[{"id": 3}]"#);
        assert!(result.is_ok());
        assert!(result.envelope().is_none());
        assert_eq!(result.data(), &json!([{"id": 3}]));
    }

    #[test]
    fn non_json_body_is_kept_as_text() {
        let result = NormalizedResult::from_body(StatusCode::OK, b"Deleted");
        assert!(result.is_ok());
        assert_eq!(result.data(), &Value::String("Deleted".into()));

        let failed = NormalizedResult::from_body(StatusCode::BAD_GATEWAY, b"upstream down");
        assert_eq!(failed.failure_message(), "upstream down");
    }

    #[test]
    fn empty_body_is_null() {
        let result = NormalizedResult::from_body(StatusCode::NO_CONTENT, b"");
        assert!(result.is_ok());
        assert_eq!(result.data(), &Value::Null);
    }

    #[test]
    fn errors_are_joined_when_message_missing() {
        let result = NormalizedResult::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"status": false, "errors": ["Name is required", "Phone is invalid"]}"#,
        );
        assert_eq!(result.failure_message(), "Name is required, Phone is invalid");
    }

    #[test]
    fn validation_problem_details_are_flattened() {
        let result = NormalizedResult::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"title": "", "errors": {"Amount": ["Amount must be positive"]}}"#,
        );
        assert_eq!(result.failure_message(), "Amount must be positive");
    }

    #[test]
    fn generic_message_as_last_resort() {
        let result = NormalizedResult::from_body(StatusCode::NOT_FOUND, b"");
        assert_eq!(result.failure_message(), "Request failed with status 404");
    }
}
