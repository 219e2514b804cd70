//! JNI native bridge for the mediacodec demo.

mod bridge;
mod debug_log;
mod error;
mod greeting;
mod logging;
