//! The greeting written by `MainActivity.sayHello`.

use std::io::Write;

use crate::debug_log::{DebugChannel, Priority};
use crate::error::Result;

pub const GREETING: &str = "Hello World!";
pub const LOG_TAG: &str = "mediacodec";

/// Outcome of each write performed by [`say_hello`].
#[derive(Debug)]
pub(crate) struct Report {
    pub(crate) stdout: Result<()>,
    pub(crate) debug_log: Result<()>,
}

/// Writes [`GREETING`] to `out` and then to `channel` under [`LOG_TAG`].
///
/// Both writes are attempted on every call; a failure on one does not skip
/// the other.
pub(crate) fn say_hello(out: &mut impl Write, channel: &impl DebugChannel) -> Report {
    let stdout = write_line(out);
    let debug_log = channel.write(Priority::Info, LOG_TAG, GREETING);
    Report { stdout, debug_log }
}

fn write_line(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{GREETING}")?;
    out.flush()?;
    Ok(())
}
