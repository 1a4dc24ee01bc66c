//! Process memory introspection for the end-of-run report.
//!
//! The snapshot is an explicit value the caller requests at a point of its
//! choosing, not an implicit global read at teardown. Detection is
//! best-effort: unavailable fields degrade to zero rather than erroring,
//! since a failed report must never fail the count.

use std::fmt;

/// Point-in-time memory usage of this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryUsage {
    /// Current resident set size in bytes.
    pub resident_bytes: u64,
    /// Peak resident set size in bytes over the process lifetime.
    pub peak_resident_bytes: u64,
    /// Virtual address space reserved by the process, in bytes.
    pub virtual_bytes: u64,
}

impl MemoryUsage {
    /// Take a snapshot of the current process.
    ///
    /// On Linux, reads `/proc/self/status` (VmRSS, VmHWM, VmSize); the peak
    /// falls back to `getrusage(2)` when the proc field is missing. On macOS
    /// only the `getrusage` peak is available.
    pub fn snapshot() -> MemoryUsage {
        let mut usage = read_proc_self_status().unwrap_or_default();

        if usage.peak_resident_bytes == 0 {
            if let Some(peak) = rusage_peak_rss() {
                usage.peak_resident_bytes = peak;
            }
        }

        usage
    }
}

impl fmt::Display for MemoryUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rss = {}, peak rss = {}, vsz = {}",
            format_bytes(self.resident_bytes),
            format_bytes(self.peak_resident_bytes),
            format_bytes(self.virtual_bytes)
        )
    }
}

/// Parse VmRSS / VmHWM / VmSize out of /proc/self/status.
///
/// Fields are reported in kB lines like `VmRSS:    524288 kB`.
#[cfg(target_os = "linux")]
fn read_proc_self_status() -> Option<MemoryUsage> {
    let content = std::fs::read_to_string("/proc/self/status").ok()?;
    let mut usage = MemoryUsage::default();

    for line in content.lines() {
        let (field, rest) = match line.split_once(':') {
            Some(parts) => parts,
            None => continue,
        };
        let target = match field {
            "VmRSS" => &mut usage.resident_bytes,
            "VmHWM" => &mut usage.peak_resident_bytes,
            "VmSize" => &mut usage.virtual_bytes,
            _ => continue,
        };
        if let Some(kb) = rest
            .trim()
            .split_whitespace()
            .next()
            .and_then(|v| v.parse::<u64>().ok())
        {
            *target = kb * 1024;
        }
    }

    Some(usage)
}

#[cfg(not(target_os = "linux"))]
fn read_proc_self_status() -> Option<MemoryUsage> {
    None
}

/// Peak RSS via getrusage(2). ru_maxrss is in kilobytes on Linux and in
/// bytes on macOS.
fn rusage_peak_rss() -> Option<u64> {
    let mut rusage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut rusage) };
    if rc != 0 {
        return None;
    }
    let raw = rusage.ru_maxrss as u64;
    if cfg!(target_os = "macos") {
        Some(raw)
    } else {
        Some(raw * 1024)
    }
}

/// Format bytes as human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
