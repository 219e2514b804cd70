//! Error type shared by the bridge internals.
//!
//! Nothing here crosses the JNI boundary: the exported functions swallow every
//! variant after tracing it.

#[cfg(any(test, target_os = "android"))]
use std::ffi::CString;
use std::io;

use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("failed to write to stdout: {0}")]
    Stdout(#[from] io::Error),
    #[cfg_attr(not(target_os = "android"), allow(dead_code))]
    #[error("debug log write failed with code {code}")]
    DebugLog { code: i32 },
    #[cfg_attr(target_os = "android", allow(dead_code))]
    #[error("failed to write to debug log: {0}")]
    DebugLogIo(io::Error),
    #[error("logger: {0}")]
    Logger(String),
}

#[cfg(any(test, target_os = "android"))]
pub(crate) fn cstring_from_str_lossy(value: &str) -> CString {
    let sanitized: String = if value.as_bytes().contains(&0) {
        value.chars().map(|c| if c == '\0' { ' ' } else { c }).collect()
    } else {
        value.to_owned()
    };
    // Interior NULs were replaced above.
    CString::new(sanitized).unwrap_or_default()
}
