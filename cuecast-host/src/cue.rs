//! Cue-sheet entries
//!
//! A cue entry describes the track currently on air, one value per line:
//!
//! ```text
//! filename
//! size in bytes
//! bitrate in kbit/s
//! total play time as days:hours:minutes:seconds
//! percent played
//! playlist line number
//! artist
//! title
//! ```
//!
//! Entries are rendered to text only; writing them out is up to the daemon.

use crate::host::TrackSelection;
use crate::metadata::split_artist_title;
use std::fmt;
use std::time::Duration;

/// Placeholder for a missing artist or title
const MISSING: &str = "(none)";

/// Streaming progress of the current track, supplied by the daemon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamProgress {
    pub file_size: u64,
    pub bitrate_kbps: u32,
    pub bytes_played: u64,
}

/// One cue-sheet entry
#[derive(Debug, Clone, PartialEq)]
pub struct CueEntry {
    pub filename: String,
    pub file_size: u64,
    pub bitrate_kbps: u32,
    pub play_time: Duration,
    pub percent_played: f64,
    pub line_number: i64,
    pub artist: Option<String>,
    pub title: Option<String>,
}

impl CueEntry {
    pub fn new(selection: &TrackSelection, progress: StreamProgress) -> Self {
        let (artist, title) = split_artist_title(&selection.title);

        Self {
            filename: selection.track.to_string(),
            file_size: progress.file_size,
            bitrate_kbps: progress.bitrate_kbps,
            play_time: play_time(progress.file_size, progress.bitrate_kbps),
            percent_played: percent(progress.bytes_played, progress.file_size),
            line_number: selection.line_number,
            artist: artist.filter(|a| !a.is_empty()).map(str::to_string),
            title: Some(title).filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    /// Eight newline-terminated lines
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.filename)?;
        writeln!(f, "{}", self.file_size)?;
        writeln!(f, "{}", self.bitrate_kbps)?;
        writeln!(f, "{}", format_play_time(self.play_time))?;
        writeln!(f, "{:.6}", self.percent_played)?;
        writeln!(f, "{}", self.line_number)?;
        writeln!(f, "{}", self.artist.as_deref().unwrap_or(MISSING))?;
        writeln!(f, "{}", self.title.as_deref().unwrap_or(MISSING))
    }
}

/// Total play time of a constant-bitrate file
fn play_time(file_size: u64, bitrate_kbps: u32) -> Duration {
    if bitrate_kbps == 0 {
        return Duration::ZERO;
    }
    let bytes_per_second = u64::from(bitrate_kbps) * 1000 / 8;
    Duration::from_secs(file_size / bytes_per_second)
}

fn percent(bytes_played: u64, file_size: u64) -> f64 {
    if file_size == 0 {
        return 0.0;
    }
    bytes_played as f64 / file_size as f64 * 100.0
}

/// `days:hours:minutes:seconds`, unpadded
pub fn format_play_time(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}:{}:{}:{}", days, hours, minutes, seconds)
}
