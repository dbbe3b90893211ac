//! Test modules that record every entry point the host calls

use cuecast_pm::{
    EntryPoint, LineCounter, Metadata, MetadataProvider, ModuleStatus, PlaylistModule, TrackName,
};
use std::sync::{Arc, Mutex};

/// Shared log of entry point calls, readable after the module moved into a host
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<EntryPoint>>>);

impl CallLog {
    pub fn record(&self, entry: EntryPoint) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn calls(&self) -> Vec<EntryPoint> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: EntryPoint) -> usize {
        self.calls().iter().filter(|e| **e == entry).count()
    }
}

struct RecordingMetadata {
    log: CallLog,
    answer: Metadata,
}

impl MetadataProvider for RecordingMetadata {
    fn metadata(&mut self) -> Metadata {
        self.log.record(EntryPoint::GetMetadata);
        self.answer.clone()
    }
}

/// Configurable module for host tests
pub struct ScriptedModule {
    log: CallLog,
    initialize: ModuleStatus,
    shutdown: ModuleStatus,
    tracks: Vec<TrackName>,
    served: usize,
    lines: LineCounter,
    metadata: Option<RecordingMetadata>,
}

impl ScriptedModule {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            initialize: ModuleStatus::Ok,
            shutdown: ModuleStatus::Ok,
            tracks: vec![
                TrackName::new("/music/first.mp3").unwrap(),
                TrackName::new("/music/Second Song.ogg").unwrap(),
            ],
            served: 0,
            lines: LineCounter::new(),
            metadata: None,
        }
    }

    pub fn failing_initialize(mut self) -> Self {
        self.initialize = ModuleStatus::Failed;
        self
    }

    pub fn failing_shutdown(mut self) -> Self {
        self.shutdown = ModuleStatus::Failed;
        self
    }

    /// Add a metadata hook answering `answer` every time
    pub fn with_metadata(mut self, answer: Metadata) -> Self {
        self.metadata = Some(RecordingMetadata {
            log: self.log.clone(),
            answer,
        });
        self
    }
}

impl PlaylistModule for ScriptedModule {
    fn version(&self) -> &str {
        "test"
    }

    fn self_test(&mut self) {
        self.log.record(EntryPoint::SelfTest);
    }

    fn initialize(&mut self) -> ModuleStatus {
        self.log.record(EntryPoint::Initialize);
        self.initialize
    }

    fn shutdown(&mut self) -> ModuleStatus {
        self.log.record(EntryPoint::Shutdown);
        self.shutdown
    }

    fn next_track(&mut self) -> TrackName {
        self.log.record(EntryPoint::GetNext);
        let track = self.tracks[self.served % self.tracks.len()].clone();
        self.served += 1;
        track
    }

    fn current_line_number(&mut self) -> i64 {
        self.log.record(EntryPoint::GetCurrentLineNumber);
        self.lines.advance()
    }

    fn metadata_provider(&mut self) -> Option<&mut dyn MetadataProvider> {
        self.metadata
            .as_mut()
            .map(|metadata| metadata as &mut dyn MetadataProvider)
    }
}
