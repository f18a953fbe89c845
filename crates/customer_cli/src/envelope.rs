//! Status-coded JSON envelope printed for every command.
//!
//! Maps service outcomes onto HTTP-style codes: `Found` is 200 (204 for
//! delete), `NotFound` is 404. Exit status follows the code class.

use crate::error::CliError;
use customer_core::{NoContent, NotFound, Outcome};
use serde::Serialize;

pub const STATUS_OK: u16 = 200;
pub const STATUS_NO_CONTENT: u16 = 204;
pub const STATUS_NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn ok<T: Serialize>(value: &T) -> Result<Self, CliError> {
        Ok(Self {
            status_code: STATUS_OK,
            value: Some(serde_json::to_value(value)?),
            message: None,
        })
    }

    pub fn no_content() -> Self {
        Self {
            status_code: STATUS_NO_CONTENT,
            value: None,
            message: None,
        }
    }

    pub fn not_found(reason: &NotFound) -> Self {
        Self {
            status_code: STATUS_NOT_FOUND,
            value: None,
            message: Some(reason.to_string()),
        }
    }

    pub fn from_outcome<T: Serialize>(outcome: Outcome<T>) -> Result<Self, CliError> {
        match outcome {
            Outcome::Found(value) => Self::ok(&value),
            Outcome::NotFound(reason) => Ok(Self::not_found(&reason)),
        }
    }

    pub fn from_deletion(outcome: Outcome<NoContent>) -> Self {
        match outcome {
            Outcome::Found(NoContent) => Self::no_content(),
            Outcome::NotFound(reason) => Self::not_found(&reason),
        }
    }

    /// `0` for success codes, `1` for not-found.
    pub fn exit_status(&self) -> u8 {
        if self.status_code < 400 {
            0
        } else {
            1
        }
    }
}
