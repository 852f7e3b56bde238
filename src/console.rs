// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;

/**
The fallback console every emitted line is echoed to, unless the facility is in release mode.

Writes to stdout natively and to the browser console on wasm32.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Console {}

impl Console {
    pub const fn new() -> Self {
        Self {}
    }

    /**
    Writes the record as one line.

    Never panics; an I/O failure is returned for the caller to report or drop.
    */
    pub fn write_record(&self, record: &LogRecord) -> std::io::Result<()> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let mut lock = std::io::stdout().lock();
            writeln!(lock, "{}", record)?;
            lock.flush()
        }
        #[cfg(target_arch = "wasm32")]
        {
            use crate::level::Severity;
            let msg = wasm_bindgen::JsValue::from_str(&record.to_string());
            match record.level() {
                Severity::Error => web_sys::console::error_1(&msg),
                Severity::Warn => web_sys::console::warn_1(&msg),
                Severity::Info => web_sys::console::info_1(&msg),
                Severity::Debug | Severity::Verbose => web_sys::console::debug_1(&msg),
                Severity::Trace => web_sys::console::trace_1(&msg),
                Severity::Profiling | Severity::Disabled => web_sys::console::log_1(&msg),
            }
            Ok(())
        }
    }
}

/// Best-effort report on stderr.  A failure to write the report is dropped.
pub(crate) fn report_internal(context: &str, error: &dyn std::fmt::Display) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::io::Write;
        let _ = writeln!(std::io::stderr().lock(), "contextlog: {context}: {error}");
    }
    #[cfg(target_arch = "wasm32")]
    {
        let msg = format!("contextlog: {context}: {error}");
        web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(&msg));
    }
}
