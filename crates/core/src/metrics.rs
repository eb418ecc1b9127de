//! Metrics collection and reporting for a codec run.
//!
//! Every encode or decode session fills one `Metrics` value:
//! - Throughput (bytes in/out)
//! - Group, abbreviation and noise counts
//! - Timing information
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT thread-safe. A session owns its metrics and
//! hands them back when it finishes.

use std::time::{Duration, Instant};

/// Counters for a single encode or decode run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input/Output ===
    /// Total bytes read from the source
    pub input_bytes: u64,

    /// Total bytes written to the sink, line breaks included
    pub output_bytes: u64,

    // === Groups ===
    /// Full 5-symbol groups encoded or decoded
    pub groups: u64,

    /// All-zero blocks written or expanded as one symbol
    pub zero_runs: u64,

    /// All-space blocks written or expanded as one symbol
    pub space_runs: u64,

    /// Bytes in the trailing partial block (0 if the data ended on a group)
    pub tail_bytes: u64,

    // === Decoding ===
    /// Input bytes dropped because they are not alphabet symbols
    pub skipped_bytes: u64,

    /// Read cycles performed
    pub read_cycles: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
            groups: 0,
            zero_runs: 0,
            space_runs: 0,
            tail_bytes: 0,
            skipped_bytes: 0,
            read_cycles: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Output size relative to input size.
    ///
    /// Returns 0.0 if nothing was read.
    pub fn expansion_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Compute throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stderr.
    ///
    /// Stdout is reserved for codec output.
    pub fn print_summary(&self) {
        eprintln!("\n=== Run Summary ===");
        eprintln!("Duration: {} ms", self.duration().as_millis());
        eprintln!("Input:  {} bytes", self.input_bytes);
        eprintln!("Output: {} bytes", self.output_bytes);
        eprintln!("Ratio: {:.1}%", self.expansion_ratio() * 100.0);
        eprintln!(
            "Throughput: {:.2} MiB/s",
            self.throughput_bps() / 1024.0 / 1024.0
        );
        eprintln!();
        eprintln!("=== Groups ===");
        eprintln!("Full groups: {}", self.groups);
        eprintln!("Zero runs: {}", self.zero_runs);
        eprintln!("Space runs: {}", self.space_runs);
        eprintln!("Tail bytes: {}", self.tail_bytes);
        if self.read_cycles > 0 {
            eprintln!();
            eprintln!("=== Decoding ===");
            eprintln!("Read cycles: {}", self.read_cycles);
            eprintln!("Skipped bytes: {}", self.skipped_bytes);
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
