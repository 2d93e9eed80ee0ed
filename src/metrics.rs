// Performance metrics module
//
// Provides lightweight metrics tracking for monitoring installer runs

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Global performance metrics
///
/// Uses atomic operations for thread-safe metric tracking without locks.
/// Metrics are collected over the application lifetime and logged on
/// shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Number of install runs that finished successfully
    pub installs_succeeded: AtomicUsize,

    /// Number of install runs that ended in a reported failure
    pub installs_failed: AtomicUsize,

    /// Total files written into the mods directory (copied + downloaded)
    pub files_placed: AtomicUsize,

    /// Total bytes fetched from the remote source
    pub bytes_downloaded: AtomicU64,

    /// Total wall-clock install time in milliseconds
    pub total_install_time_ms: AtomicU64,

    /// Application start time
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            installs_succeeded: AtomicUsize::new(0),
            installs_failed: AtomicUsize::new(0),
            files_placed: AtomicUsize::new(0),
            bytes_downloaded: AtomicU64::new(0),
            total_install_time_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a successful install run
    pub fn record_install_succeeded(&self) {
        self.installs_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed install run
    pub fn record_install_failed(&self) {
        self.installs_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record files written into place
    pub fn record_files_placed(&self, count: usize) {
        self.files_placed.fetch_add(count, Ordering::Relaxed);
    }

    /// Record bytes fetched from the remote source
    pub fn record_bytes_downloaded(&self, bytes: u64) {
        self.bytes_downloaded.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record wall-clock time of an install run
    pub fn record_install_time(&self, duration: Duration) {
        self.total_install_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        let uptime = self.uptime();
        tracing::info!("=== Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", uptime.as_secs_f64());
        tracing::info!(
            "Installs: {} succeeded, {} failed",
            self.installs_succeeded.load(Ordering::Relaxed),
            self.installs_failed.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Files placed: {}, bytes downloaded: {}",
            self.files_placed.load(Ordering::Relaxed),
            self.bytes_downloaded.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Total install time: {:.2}s",
            self.total_install_time_ms.load(Ordering::Relaxed) as f64 / 1000.0
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
