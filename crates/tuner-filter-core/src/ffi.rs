//! FFI-oriented JSON API for cross-language bindings.
//!
//! All functions take string inputs and return JSON strings of the form
//! `{ "success": bool, "data"?: ..., "error"?: string }`.

use serde::Serialize;

use crate::error::{Result, TunerError};
use crate::permission::GrantedCapabilities;
use crate::request::SectionSettingsRequest;
use crate::types::SectionSettingsWithTableInfo;

// ---------------------------------------------------------------------------
// Result envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FfiResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn failure(message: String) -> String {
    let result = FfiResult::<()> {
        success: false,
        data: None,
        error: Some(message),
    };
    // A unit payload with a string error always serializes.
    serde_json::to_string(&result).unwrap_or_default()
}

fn envelope<T: Serialize>(outcome: std::thread::Result<Result<T>>) -> String {
    match outcome {
        Ok(Ok(data)) => serde_json::to_string(&FfiResult {
            success: true,
            data: Some(data),
            error: None,
        })
        .unwrap_or_else(|e| failure(format!("JSON serialization error: {e}"))),
        Ok(Err(e)) => failure(e.to_string()),
        Err(_) => failure("Internal panic".to_string()),
    }
}

fn parse_capabilities(capabilities_json: &str) -> Result<GrantedCapabilities> {
    let names: Vec<String> = serde_json::from_str(capabilities_json)
        .map_err(|e| TunerError::Json(format!("capabilities: {e}")))?;
    Ok(names.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Public FFI functions
// ---------------------------------------------------------------------------

/// Build one settings value.
///
/// Input: request JSON (`{ "mainType": "ts", "tableId"?: n, "version"?: n }`)
/// and a JSON array of capability names granted to the caller.
/// Output: the built settings (`mainType`, `tableId`, `version`).
pub fn build_to_json(request_json: &str, capabilities_json: &str) -> String {
    envelope(std::panic::catch_unwind(|| {
        let ctx = parse_capabilities(capabilities_json)?;
        let request: SectionSettingsRequest = serde_json::from_str(request_json)?;
        request.build_with(&ctx)
    }))
}

/// Build several settings values with the same capabilities.
///
/// Input: JSON array of requests. Fails as a whole on the first error.
pub fn build_multi_to_json(requests_json: &str, capabilities_json: &str) -> String {
    envelope(std::panic::catch_unwind(|| {
        let ctx = parse_capabilities(capabilities_json)?;
        let requests: Vec<SectionSettingsRequest> = serde_json::from_str(requests_json)?;
        requests
            .iter()
            .map(|r| r.build_with(&ctx))
            .collect::<Result<Vec<SectionSettingsWithTableInfo>>>()
    }))
}

/// Describe a request with defaults applied. Nothing is built, so no
/// capabilities are needed.
pub fn describe_to_json(request_json: &str) -> String {
    envelope(std::panic::catch_unwind(|| {
        let request: SectionSettingsRequest = serde_json::from_str(request_json)?;
        Ok(request.describe())
    }))
}
