use std::io;

use serde_json::{Value, json};
use subscope_client::{ClientError, SuccessEnvelope};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "detect" | "catalog" => {}
        other => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{other}`"
            )));
        }
    }

    let payload = json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": success.data.clone(),
    });
    serialize_json_pretty(&payload)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    serialize_json_pretty(&payload)
}

fn serialize_json_pretty(value: &Value) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
