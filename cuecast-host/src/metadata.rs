//! Metadata publication: which title to show and when to send it
//!
//! The first title is held back longer because the streaming server may not
//! have accepted the source connection yet; an update sent too early is lost.
//! The module signals "first track" by returning line number 0.

use cuecast_common::config::MetadataConfig;
use cuecast_common::TitleSource;
use cuecast_pm::{Metadata, TrackName};
use std::time::Duration;
use tracing::debug;

/// Delays applied before publishing a track title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataPlan {
    pub initial_delay: Duration,
    pub update_delay: Duration,
}

impl MetadataPlan {
    pub fn from_config(config: &MetadataConfig) -> Self {
        Self {
            initial_delay: config.initial_delay(),
            update_delay: config.update_delay(),
        }
    }

    /// Publish delay for a track at `line_number`
    pub fn delay_for(&self, line_number: i64) -> Duration {
        if line_number == 0 {
            self.initial_delay
        } else {
            self.update_delay
        }
    }
}

impl Default for MetadataPlan {
    fn default() -> Self {
        Self::from_config(&MetadataConfig::default())
    }
}

/// Pick the title to publish: module metadata if any, else the cleaned filename
pub fn resolve_title(track: &TrackName, metadata: Metadata) -> (String, TitleSource) {
    match metadata.into_option() {
        Some(text) => (text, TitleSource::Module),
        None => (clean_filename(track.as_str()), TitleSource::Filename),
    }
}

/// Turn a path into something that looks like a song name
///
/// Drops everything up to the last `/`, then everything from the last `.`.
/// Falls back to the unstripped name when stripping would leave nothing.
pub fn clean_filename(path: &str) -> String {
    let base = match path.rfind('/') {
        Some(idx) if idx + 1 < path.len() => &path[idx + 1..],
        _ => path,
    };

    let cleaned = match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    };

    debug!("Filename cleaned up from [{}] to [{}]", path, cleaned);
    cleaned.to_string()
}

/// Split "Artist - Title" on the first separator
///
/// Without a separator there is no artist and the whole string is the title.
pub fn split_artist_title(title: &str) -> (Option<&str>, &str) {
    match title.split_once(" - ") {
        Some((artist, song)) => (Some(artist), song),
        None => (None, title),
    }
}
