use serde::{Deserialize, Serialize};

pub const NO_TIME_PROVIDED: &str = "No time provided";
pub const TIME_NOT_FOUND: &str = "Time not found";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Body of `POST /save` and `POST /delete`.
///
/// `time` is optional so that `{}` and `{"time": null}` reach the handlers
/// instead of being rejected during deserialization.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct TimePayload {
    #[serde(default)]
    pub time: Option<String>,
}

impl TimePayload {
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: Some(time.into()),
        }
    }
}

/// JSON reply of the save and delete endpoints:
/// `{"status":"success"}` or `{"status":"error","message":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusResponse {
    Success,
    Error { message: String },
}

impl StatusResponse {
    pub fn error(message: &str) -> Self {
        StatusResponse::Error {
            message: message.to_string(),
        }
    }
}
