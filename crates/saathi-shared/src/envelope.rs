//! The uniform response envelope every saathi endpoint returns:
//! `{ success, data, message, pagination? }`.
//!
//! Payload shapes are declared per endpoint and validated here, at the
//! boundary, instead of being branched on at each consumption site.

use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload of a successful response.
    ///
    /// A failure envelope yields the server message verbatim, or `fallback`
    /// when the server did not supply one. A success envelope without a
    /// payload is a contract violation and reported as a decode error.
    pub fn into_result(self, fallback: &str) -> Result<T, ApiError> {
        if self.success {
            self.data
                .ok_or_else(|| ApiError::Decode("missing data field".to_string()))
        } else {
            Err(ApiError::Api(
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }

    /// Like [`Envelope::into_result`] for endpoints whose payload is
    /// irrelevant (deletes, acknowledgements). Ignores `data` entirely.
    pub fn into_ack(self, fallback: &str) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Api(
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}
