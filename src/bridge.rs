//! JNI entry points for `com.splashtop.demo.MainActivity`.
//!
//! The Java side loads this library with `System.loadLibrary("mediacodec")`
//! and declares `public native void sayHello(String name)`.

use std::ffi::c_void;
use std::io;
use std::panic::AssertUnwindSafe;

use jni::JNIEnv;
use jni::JavaVM;
use jni::objects::{JObject, JString};
use jni::sys::{JNI_VERSION_1_6, jint};

use crate::debug_log::PlatformLog;
use crate::greeting::say_hello;
use crate::logging;

/// Called by the runtime when the library is loaded.
///
/// Installs the crate logger. Loading never fails because of logging.
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(_vm: JavaVM, _reserved: *mut c_void) -> jint {
    match logging::init() {
        Ok(()) => log::debug!("native library loaded"),
        Err(err) => eprintln!("mediacodec: {err}"),
    }
    JNI_VERSION_1_6
}

/// Native half of `MainActivity.sayHello(String)`.
///
/// `name` is accepted but never read, so a null reference is fine.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_splashtop_demo_MainActivity_sayHello<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    _name: JString<'local>,
) {
    greet();
}

fn greet() {
    // Nothing may unwind into the JVM.
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        let report = say_hello(&mut io::stdout().lock(), &PlatformLog);
        if let Err(err) = report.stdout {
            log::debug!("{err}");
        }
        if let Err(err) = report.debug_log {
            log::debug!("{err}");
        }
    }));
    if result.is_err() {
        log::debug!("panic while writing greeting");
    }
}
