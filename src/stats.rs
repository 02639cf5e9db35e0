//! Run statistics and formatting helpers.

use colored::Colorize;
use std::time::{Duration, Instant};

/// Counters for one conversion run.
#[derive(Debug)]
pub struct Statistics {
    /// Parsed batch count.
    pub batches: usize,
    /// Parsed row count across all batches.
    pub rows: usize,
    /// Input bytes read.
    pub bytes_read: u64,
    /// Output bytes written.
    pub bytes_written: u64,
    start_time: Instant,
}

impl Statistics {
    /// Start a new run's statistics.
    pub fn new() -> Self {
        Self {
            batches: 0,
            rows: 0,
            bytes_read: 0,
            bytes_written: 0,
            start_time: Instant::now(),
        }
    }

    /// Count one parsed batch and its rows.
    pub fn record_batch(&mut self, rows: usize) {
        self.batches += 1;
        self.rows += rows;
    }

    /// Add input bytes.
    pub fn add_bytes_read(&mut self, bytes: u64) {
        self.bytes_read += bytes;
    }

    /// Add output bytes.
    pub fn add_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Print the colored summary box.
    pub fn print_summary(&self) {
        let elapsed = self.elapsed();

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 Conversion summary".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} Batches:      {}",
            "📦".bright_cyan(),
            self.batches.to_string().green()
        );
        println!(
            "  {} Rows:         {}",
            "📋".bright_green(),
            self.rows.to_string().green()
        );
        println!(
            "  {} Input size:   {}",
            "📥".bright_yellow(),
            format_bytes(self.bytes_read)
        );
        println!(
            "  {} Output size:  {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        );
        println!(
            "  {} Elapsed:      {:.2}s",
            "⏱️".bright_cyan(),
            elapsed.as_secs_f64()
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a byte count as a human-readable string (e.g. "1.25 MB").
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }

    #[test]
    fn test_statistics_counters() {
        let mut stats = Statistics::new();

        stats.record_batch(3);
        stats.record_batch(2);
        stats.add_bytes_read(1024);
        stats.add_bytes_written(512);

        assert_eq!(stats.batches, 2);
        assert_eq!(stats.rows, 5);
        assert_eq!(stats.bytes_read, 1024);
        assert_eq!(stats.bytes_written, 512);
    }
}
