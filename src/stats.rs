// src/stats.rs
// =============================================================================
// Counters for one mirror run and the summary printed at the end.
//
// One RunStatistics value lives for the whole run. The crawler holds it by
// &mut and only ever adds to it, so every counter only grows. The start
// time is taken when the value is created, the end time by finish().
// =============================================================================

use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;
use std::fmt;

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct RunStatistics {
    started_at: DateTime<Local>,
    finished_at: Option<DateTime<Local>>,
    /// Pages read and scanned for links
    links_visited: u64,
    files_downloaded: u64,
    /// Page text plus saved file bytes
    bytes_transferred: u64,
    /// Saved file bytes only
    total_download_size: u64,
    /// Existing files left alone because overwrite is off
    skipped: u64,
    /// Fetch and save failures
    failures: u64,
}

impl RunStatistics {
    pub fn start() -> Self {
        Self {
            started_at: Local::now(),
            finished_at: None,
            links_visited: 0,
            files_downloaded: 0,
            bytes_transferred: 0,
            total_download_size: 0,
            skipped: 0,
            failures: 0,
        }
    }

    /// Stamps the end time. Later calls keep the first stamp.
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Local::now());
        }
    }

    pub fn record_page(&mut self, text_len: u64) {
        self.links_visited += 1;
        self.bytes_transferred += text_len;
    }

    pub fn record_download(&mut self, file_size: u64) {
        self.files_downloaded += 1;
        self.total_download_size += file_size;
        self.bytes_transferred += file_size;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn links_visited(&self) -> u64 {
        self.links_visited
    }

    pub fn files_downloaded(&self) -> u64 {
        self.files_downloaded
    }

    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred
    }

    pub fn total_download_size(&self) -> u64 {
        self.total_download_size
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    // Wall-clock time so far if the run has not finished yet
    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at.unwrap_or_else(Local::now) - self.started_at
    }

    pub fn render(&self) -> String {
        let end = self.finished_at.unwrap_or_else(Local::now);
        format!(
            "\
Start Time:                 {}
End Time:                   {}
Elapsed Time:               {}

#Links:                     {}
#Downloads:                 {}
#Skipped:                   {}
#Failures:                  {}

Total bytes transferred:    {}
Total file size:            {}
",
            self.started_at.format(TIME_FORMAT),
            end.format(TIME_FORMAT),
            format_elapsed(end - self.started_at),
            self.links_visited,
            self.files_downloaded,
            self.skipped,
            self.failures,
            format_bytes(self.bytes_transferred),
            format_bytes(self.total_download_size),
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Summary<'a> {
            #[serde(flatten)]
            stats: &'a RunStatistics,
            elapsed_ms: i64,
        }

        serde_json::to_string_pretty(&Summary {
            stats: self,
            elapsed_ms: self.elapsed().num_milliseconds(),
        })
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// Renders a byte count in the largest unit that keeps the value below 1024
//
// Up to three decimals, trailing zeros dropped:
//   0         -> "0 B"
//   1024      -> "1 KB"
//   1_572_864 -> "1.5 MB"
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let number = format!("{:.3}", value);
    let number = number.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", number, UNITS[unit])
}

// H:MM:SS.mmm
fn format_elapsed(elapsed: TimeDelta) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    let hours = millis / 3_600_000;
    let minutes = (millis / 60_000) % 60;
    let seconds = (millis / 1000) % 60;
    format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis % 1000)
}
