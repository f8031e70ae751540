//! C ABI bindings for tuner section filter settings.
//!
//! All functions use C-compatible string types:
//! - Input: `*const c_char` (null-terminated C string)
//! - Output: `*mut c_char` (caller must free with `tuner_filter_free_string`)
//!
//! Every output is a JSON envelope `{ "success": bool, "data"?: ..., "error"?: string }`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use tuner_filter_core::{build_multi_to_json, build_to_json, describe_to_json, API_VERSION};

/// Read a C string argument, or produce the JSON error envelope naming it.
///
/// # Safety
/// `ptr` must be null or a valid null-terminated string.
unsafe fn read_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, *mut c_char> {
    if ptr.is_null() {
        return Err(error_envelope(&format!("{name} is null")));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| error_envelope(&format!("Invalid UTF-8 in {name}")))
}

/// Build one settings value from a request and the caller's granted capabilities.
///
/// # Safety
/// - `request_json` must be a valid null-terminated UTF-8 JSON object.
/// - `capabilities_json` must be a valid null-terminated UTF-8 JSON array of strings.
/// - The returned pointer must be freed with `tuner_filter_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuner_filter_build(
    request_json: *const c_char,
    capabilities_json: *const c_char,
) -> *mut c_char {
    let request = match unsafe { read_arg(request_json, "request_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    let capabilities = match unsafe { read_arg(capabilities_json, "capabilities_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };

    to_c_string(&build_to_json(request, capabilities))
}

/// Build several settings values; fails as a whole on the first error.
///
/// # Safety
/// - `requests_json` must be a valid null-terminated UTF-8 JSON array.
/// - `capabilities_json` must be a valid null-terminated UTF-8 JSON array of strings.
/// - The returned pointer must be freed with `tuner_filter_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuner_filter_build_multi(
    requests_json: *const c_char,
    capabilities_json: *const c_char,
) -> *mut c_char {
    let requests = match unsafe { read_arg(requests_json, "requests_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    let capabilities = match unsafe { read_arg(capabilities_json, "capabilities_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };

    to_c_string(&build_multi_to_json(requests, capabilities))
}

/// Describe a request with defaults applied.
///
/// # Safety
/// - `request_json` must be a valid null-terminated UTF-8 JSON object.
/// - The returned pointer must be freed with `tuner_filter_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuner_filter_describe(request_json: *const c_char) -> *mut c_char {
    match unsafe { read_arg(request_json, "request_json") } {
        Ok(s) => to_c_string(&describe_to_json(s)),
        Err(e) => e,
    }
}

/// Version of the JSON API returned by these functions.
///
/// The returned pointer must be freed with `tuner_filter_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn tuner_filter_api_version() -> *mut c_char {
    to_c_string(API_VERSION)
}

/// Free a string previously returned by one of the tuner_filter_* functions.
///
/// # Safety
/// - `ptr` must be a pointer previously returned by one of the tuner_filter_* functions,
///   or null (in which case this is a no-op).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuner_filter_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

fn error_envelope(message: &str) -> *mut c_char {
    let json = serde_json::json!({ "success": false, "error": message });
    to_c_string(&json.to_string())
}

/// Helper: Convert a Rust string to a C-compatible heap-allocated string.
fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}
