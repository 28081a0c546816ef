// `{success, data}` / `{success, message}` envelopes for JSON output.
//
// Shared by the web API and the CLI `--json` mode. The payload is serialized
// straight into the envelope without passing through `serde_json::Value`,
// whose object type would re-sort keys and lose the topic table order.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub message: String,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
