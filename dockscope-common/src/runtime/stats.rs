//! Resource usage arithmetic
//!
//! Mirrors the numbers `docker stats --no-stream` prints, computed from raw
//! counters so it can be tested without a daemon.

/// CPU counters from one stats sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSample {
    /// Container CPU time, nanoseconds
    pub total_usage: u64,
    /// Host CPU time, nanoseconds
    pub system_usage: Option<u64>,
    pub online_cpus: Option<u64>,
    /// Length of the per-CPU usage array, used when `online_cpus` is missing
    pub percpu_count: usize,
}

/// CPU usage between two samples, as a percentage of one core
///
/// Returns 0 when either delta is not positive (first sample, counter reset).
pub fn cpu_percent(current: &CpuSample, previous: &CpuSample) -> f64 {
    let cpu_delta = current.total_usage as f64 - previous.total_usage as f64;
    let system_delta = match (current.system_usage, previous.system_usage) {
        (Some(now), Some(before)) => now as f64 - before as f64,
        _ => return 0.0,
    };

    if cpu_delta <= 0.0 || system_delta <= 0.0 {
        return 0.0;
    }

    let cpus = current
        .online_cpus
        .filter(|n| *n > 0)
        .unwrap_or(current.percpu_count.max(1) as u64) as f64;

    (cpu_delta / system_delta) * cpus * 100.0
}

/// Memory usage as a percentage of the limit; 0 without a limit
pub fn memory_percent(usage: u64, limit: u64) -> f64 {
    if limit == 0 {
        return 0.0;
    }
    usage as f64 / limit as f64 * 100.0
}

/// Sum block I/O entries into (read, write) bytes
///
/// Entry ops are matched case-insensitively; cgroup v1 reports `Read`, v2
/// reports `read`.
pub fn block_io<'a, I>(entries: I) -> (u64, u64)
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    entries
        .into_iter()
        .fold((0, 0), |(read, write), (op, value)| {
            if op.eq_ignore_ascii_case("read") {
                (read + value, write)
            } else if op.eq_ignore_ascii_case("write") {
                (read, write + value)
            } else {
                (read, write)
            }
        })
}
