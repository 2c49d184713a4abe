//! Wire types for the OneBot webhook.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hook::MsgRecord;

/// Request body posted to the webhook: `{"message": "<record>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessageReq {
    pub message: String,
}

impl PostMessageReq {
    pub fn from_record(record: &MsgRecord) -> Self {
        Self {
            message: record.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, SendError> {
        serde_json::to_string(self).map_err(SendError::Serialize)
    }
}

/// What the webhook did with a request that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// HTTP 200, with the response body
    Delivered { response: String },
    /// Any other status
    Rejected { status: StatusCode },
}

/// Failures before a status code was obtained.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("invalid webhook URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to encode request body: {0}")]
    Serialize(serde_json::Error),

    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
}
