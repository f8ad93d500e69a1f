use serde_json::Value;

use crate::{error::SubmitError, provider::RawResponse, settings::ResponseMode};

/// Turns a raw parse response into the result value to display.
///
/// The body is decoded as JSON before the status is looked at, so an
/// undecodable error page surfaces as `Decode` rather than `Server`.
pub fn interpret(response: &RawResponse, mode: ResponseMode) -> Result<Value, SubmitError> {
    let body: Value = serde_json::from_str(&response.body)?;

    if !response.is_success() {
        let message = error_field(&body)
            .unwrap_or_else(|| format!("Server error: {}", response.status));
        return Err(SubmitError::Server {
            status: response.status,
            message,
        });
    }

    match mode {
        ResponseMode::Bare => Ok(body),
        ResponseMode::Envelope => unwrap_envelope(body),
    }
}

fn unwrap_envelope(mut body: Value) -> Result<Value, SubmitError> {
    let succeeded = body.get("success").and_then(Value::as_bool) == Some(true);
    let data = body
        .as_object_mut()
        .and_then(|envelope| envelope.remove("data"))
        .filter(|data| !data.is_null());

    match data {
        Some(data) if succeeded => Ok(data),
        _ => Err(SubmitError::Rejected(
            error_field(&body).unwrap_or_else(|| "Unknown error parsing transcript".to_string()),
        )),
    }
}

fn error_field(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Two-space indented JSON, as shown in the output field.
pub fn render(value: &Value) -> String {
    // Serializing a `Value` cannot fail: its map keys are always strings.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn envelope_success_yields_data() {
        let value = interpret(
            &raw(200, r#"{"success":true,"data":{"speakers":["A","B"]}}"#),
            ResponseMode::Envelope,
        )
        .unwrap();
        assert_eq!(value, json!({ "speakers": ["A", "B"] }));
    }

    #[test]
    fn envelope_failure_uses_server_error() {
        let err = interpret(
            &raw(200, r#"{"success":false,"error":"no timestamps"}"#),
            ResponseMode::Envelope,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "no timestamps");
    }

    #[test]
    fn envelope_without_data_falls_back_to_generic_message() {
        for body in [r#"{"success":true}"#, r#"{"success":true,"data":null}"#, "[1,2]"] {
            let err = interpret(&raw(200, body), ResponseMode::Envelope).unwrap_err();
            assert!(matches!(err, SubmitError::Rejected(_)));
            assert_eq!(err.to_string(), "Unknown error parsing transcript");
        }
    }

    #[test]
    fn bare_mode_returns_whole_body() {
        let value = interpret(
            &raw(200, r#"{"raw_transcript":"hello"}"#),
            ResponseMode::Bare,
        )
        .unwrap();
        assert_eq!(value, json!({ "raw_transcript": "hello" }));
    }

    #[test]
    fn non_success_status_prefers_error_field() {
        let err = interpret(&raw(400, r#"{"error":"bad format"}"#), ResponseMode::Bare).unwrap_err();
        assert!(matches!(err, SubmitError::Server { status: 400, .. }));
        assert!(err.to_string().contains("bad format"));
    }

    #[test]
    fn non_success_status_without_error_field() {
        let err = interpret(&raw(503, "{}"), ResponseMode::Envelope).unwrap_err();
        assert_eq!(err.to_string(), "Server error: 503");
    }

    #[test]
    fn undecodable_body_is_a_decode_error_even_on_failure_status() {
        let err = interpret(&raw(500, "<html>oops</html>"), ResponseMode::Envelope).unwrap_err();
        assert!(matches!(err, SubmitError::Decode(_)));
    }

    #[test]
    fn render_uses_two_space_indent_and_round_trips() {
        let value = json!({ "a": [1, { "b": null }], "c": "text" });
        let text = render(&value);
        assert!(text.contains("\n  \"a\": ["));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, value);
    }
}
