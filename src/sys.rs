// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-specific time and memory probes.
//!
//! `Instant` comes from `std::time` on native platforms and from `web_time` on
//! WebAssembly.  [`resident_memory_bytes`] backs
//! [`ContextLogger::memory_stats`](crate::ContextLogger::memory_stats).

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

/// Resident set size of the current process in bytes, where the platform exposes it.
#[cfg(target_os = "linux")]
pub fn resident_memory_bytes() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss(&status)
}

#[cfg(not(target_os = "linux"))]
pub fn resident_memory_bytes() -> Option<u64> {
    None
}

//VmRSS is reported in kB
#[cfg_attr(not(any(target_os = "linux", test)), allow(dead_code))]
fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kilobytes: u64 = line
        .trim_start_matches("VmRSS:")
        .trim()
        .trim_end_matches("kB")
        .trim()
        .parse()
        .ok()?;
    Some(kilobytes * 1024)
}

#[cfg(test)]
mod tests {
    use super::parse_vm_rss;

    #[test]
    fn parses_vm_rss() {
        let status = "Name:\tcargo\nVmPeak:\t  100 kB\nVmRSS:\t    2048 kB\nThreads:\t1\n";
        assert_eq!(parse_vm_rss(status), Some(2048 * 1024));
    }

    #[test]
    fn missing_vm_rss() {
        assert_eq!(parse_vm_rss("Name:\tkthreadd\n"), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_reports_memory() {
        assert!(super::resident_memory_bytes().is_some_and(|bytes| bytes > 0));
    }
}
