//! Reference skeleton modules
//!
//! Starting points for real playlist modules. Every entry point except the
//! metadata hook logs a diagnostic. All answers are constants, except the line
//! number, which counts up from 0.
//!
//! Two variants ship:
//! - [`SkeletonModule::new`]: all entry points, including the metadata hook
//! - [`SkeletonModule::basic`]: no metadata hook

use crate::contract::{EntryPoint, MetadataProvider, ModuleStatus, PlaylistModule};
use crate::line_counter::LineCounter;
use crate::track::{Metadata, TrackName};
use tracing::info;

pub const MODULE_VERSION: &str = "0.0.1";

/// Track every skeleton returns
pub const REFERENCE_TRACK: &str = "Very nice song.mp3";

/// Title the full skeleton reports for every track
pub const REFERENCE_METADATA: &str = "Artist - Title (Label, Year)";

/// Fixed diagnostic the skeleton logs when `entry` is called
///
/// `None` for the self test, whose message carries [`MODULE_VERSION`], and for
/// the metadata hook, which logs nothing.
pub fn diagnostic(entry: EntryPoint) -> Option<&'static str> {
    match entry {
        EntryPoint::GetNext => Some("Executing get_next() function..."),
        EntryPoint::Initialize => Some("Executing initialize() function.."),
        EntryPoint::Shutdown => Some("Executing shutdown() function..."),
        EntryPoint::GetCurrentLineNumber => Some("Executing get_current_lineno() function..."),
        EntryPoint::SelfTest | EntryPoint::GetMetadata => None,
    }
}

fn log_call(entry: EntryPoint) {
    if let Some(message) = diagnostic(entry) {
        info!("{}", message);
    }
}

/// Skeleton playlist module
#[derive(Debug, Clone)]
pub struct SkeletonModule {
    songs: LineCounter,
    track: TrackName,
    metadata: Option<FixedMetadata>,
}

#[derive(Debug, Clone)]
struct FixedMetadata {
    text: Metadata,
}

impl MetadataProvider for FixedMetadata {
    fn metadata(&mut self) -> Metadata {
        self.text.clone()
    }
}

impl SkeletonModule {
    /// Skeleton with the metadata hook
    pub fn new() -> Self {
        Self {
            songs: LineCounter::new(),
            track: TrackName::from_static(REFERENCE_TRACK),
            metadata: Some(FixedMetadata {
                text: Metadata::new(REFERENCE_METADATA),
            }),
        }
    }

    /// Skeleton without the metadata hook
    pub fn basic() -> Self {
        Self {
            metadata: None,
            ..Self::new()
        }
    }

    /// Serve `track` instead of the reference track
    pub fn with_track(mut self, track: TrackName) -> Self {
        self.track = track;
        self
    }

    /// Replace the metadata answer; has no effect on the basic variant
    pub fn with_metadata(mut self, text: Metadata) -> Self {
        if let Some(metadata) = self.metadata.as_mut() {
            metadata.text = text;
        }
        self
    }
}

impl Default for SkeletonModule {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistModule for SkeletonModule {
    fn version(&self) -> &str {
        MODULE_VERSION
    }

    fn self_test(&mut self) {
        info!("ices module version {} initializing...", MODULE_VERSION);
    }

    fn initialize(&mut self) -> ModuleStatus {
        log_call(EntryPoint::Initialize);
        ModuleStatus::Ok
    }

    fn shutdown(&mut self) -> ModuleStatus {
        log_call(EntryPoint::Shutdown);
        ModuleStatus::Ok
    }

    fn next_track(&mut self) -> TrackName {
        log_call(EntryPoint::GetNext);
        self.track.clone()
    }

    fn current_line_number(&mut self) -> i64 {
        log_call(EntryPoint::GetCurrentLineNumber);
        self.songs.advance()
    }

    fn metadata_provider(&mut self) -> Option<&mut dyn MetadataProvider> {
        self.metadata
            .as_mut()
            .map(|metadata| metadata as &mut dyn MetadataProvider)
    }
}
