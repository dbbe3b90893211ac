//! One host session: initialize, pull a fixed number of tracks, shut down

use crate::cue::{CueEntry, StreamProgress};
use crate::host::{PlaylistHost, TrackSelection};
use cuecast_common::{HostEvent, Result};
use cuecast_pm::ModuleStatus;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// How a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Tracks to pull before shutting down
    pub tracks: u32,
    /// Sleep through each publish delay before "publishing" the title
    pub honor_publish_delay: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tracks: 3,
            honor_publish_delay: true,
        }
    }
}

/// What a finished session produced
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub selections: Vec<TrackSelection>,
    /// Cue entry written for each selection, at track start
    pub cues: Vec<CueEntry>,
    pub shutdown: ModuleStatus,
}

/// Drive `host` through a full session
///
/// A failed initialize still shuts the module down, then returns the
/// initialize error. No track is requested in that case.
pub async fn run(host: &mut PlaylistHost, options: SessionOptions) -> Result<SessionReport> {
    if let Err(e) = host.initialize() {
        if let Err(shutdown_err) = host.shutdown() {
            warn!("Shutdown after failed initialization: {}", shutdown_err);
        }
        return Err(e);
    }

    let mut selections = Vec::with_capacity(options.tracks as usize);
    let mut cues = Vec::with_capacity(options.tracks as usize);
    for _ in 0..options.tracks {
        let selection = host.next_track()?;

        // Stream progress is the daemon's; at track start nothing has played
        let cue = host.cue_entry(StreamProgress::default())?;
        debug!("Cue entry for line {}:\n{}", selection.line_number, cue);

        if options.honor_publish_delay && !selection.publish_delay.is_zero() {
            tokio::time::sleep(selection.publish_delay).await;
        }
        info!(
            "Publishing metadata for line {}: {}",
            selection.line_number, selection.title
        );

        selections.push(selection);
        cues.push(cue);
    }

    let shutdown = host.shutdown()?;
    Ok(SessionReport {
        selections,
        cues,
        shutdown,
    })
}

/// Counts kept by [`log_events`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventLogStats {
    pub logged: u64,
    pub skipped: u64,
}

/// Log every host event as JSON until the bus closes
///
/// A lagging receiver reports the number of dropped events and keeps going.
pub async fn log_events(mut rx: broadcast::Receiver<HostEvent>) -> EventLogStats {
    let mut stats = EventLogStats::default();

    loop {
        match rx.recv().await {
            Ok(event) => {
                match serde_json::to_string(&event) {
                    Ok(json) => debug!("event: {}", json),
                    Err(e) => debug!("event not serializable: {}", e),
                }
                stats.logged += 1;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Event logger lagged, {} events skipped", skipped);
                stats.skipped += skipped;
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("Event bus closed, event logger stopping");
                break;
            }
        }
    }

    stats
}
