//! Platform debug-log channel.
//!
//! On Android records go to `liblog` and show up in logcat. Elsewhere they are
//! written to stderr in logcat's brief format so desktop builds behave the same.

use std::fmt;

use crate::error::Result;

/// Log priority, numbered like `android_LogPriority`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum Priority {
    Verbose = 2,
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
}

impl Priority {
    fn letter(self) -> char {
        match self {
            Priority::Verbose => 'V',
            Priority::Debug => 'D',
            Priority::Info => 'I',
            Priority::Warn => 'W',
            Priority::Error => 'E',
        }
    }
}

impl From<log::Level> for Priority {
    fn from(value: log::Level) -> Self {
        match value {
            log::Level::Error => Priority::Error,
            log::Level::Warn => Priority::Warn,
            log::Level::Info => Priority::Info,
            log::Level::Debug => Priority::Debug,
            log::Level::Trace => Priority::Verbose,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A sink for tagged diagnostic messages.
pub trait DebugChannel {
    fn write(&self, priority: Priority, tag: &str, message: &str) -> Result<()>;
}

/// The process's platform debug log.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformLog;

#[cfg(any(test, not(target_os = "android")))]
pub(crate) fn format_brief(priority: Priority, tag: &str, message: &str) -> String {
    format!("{priority}/{tag}: {message}")
}

/// Writes one brief-format line to `out`, reporting failures as debug-log errors.
#[cfg(any(test, not(target_os = "android")))]
fn write_brief(
    out: &mut impl std::io::Write,
    priority: Priority,
    tag: &str,
    message: &str,
) -> Result<()> {
    let line = format_brief(priority, &tag.replace('\0', " "), &message.replace('\0', " "));
    writeln!(out, "{line}").map_err(crate::error::Error::DebugLogIo)
}

#[cfg(target_os = "android")]
mod sys {
    use std::os::raw::{c_char, c_int};

    #[link(name = "log")]
    unsafe extern "C" {
        pub(super) fn __android_log_write(
            prio: c_int,
            tag: *const c_char,
            text: *const c_char,
        ) -> c_int;
    }
}

#[cfg(target_os = "android")]
impl DebugChannel for PlatformLog {
    fn write(&self, priority: Priority, tag: &str, message: &str) -> Result<()> {
        use crate::error::{Error, cstring_from_str_lossy};

        let tag = cstring_from_str_lossy(tag);
        let message = cstring_from_str_lossy(message);
        // Safety: both pointers are valid NUL-terminated strings for the call.
        let code = unsafe {
            sys::__android_log_write(priority as i32, tag.as_ptr(), message.as_ptr())
        };
        if code < 0 {
            return Err(Error::DebugLog { code });
        }
        Ok(())
    }
}

#[cfg(not(target_os = "android"))]
impl DebugChannel for PlatformLog {
    fn write(&self, priority: Priority, tag: &str, message: &str) -> Result<()> {
        write_brief(&mut std::io::stderr().lock(), priority, tag, message)
    }
}
