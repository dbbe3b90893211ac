//! Playlist module callback contract
//!
//! The host calls these entry points synchronously from a single thread and
//! blocks until each returns. Call order is governed by the lifecycle:
//!
//! ```text
//! self_test → initialize ──ok──▶ { next_track | metadata | current_line_number }* → shutdown
//!                        └─failed──▶ shutdown
//! ```

use crate::track::{Metadata, TrackName};
use std::fmt;

/// Named entry points a host resolves on a loaded module
///
/// The names are the ones scripted modules export, and show up in host logs
/// whenever the entry point is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    SelfTest,
    GetNext,
    GetMetadata,
    Initialize,
    Shutdown,
    GetCurrentLineNumber,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 6] = [
        EntryPoint::SelfTest,
        EntryPoint::GetNext,
        EntryPoint::GetMetadata,
        EntryPoint::Initialize,
        EntryPoint::Shutdown,
        EntryPoint::GetCurrentLineNumber,
    ];

    /// Exported symbol name
    pub fn name(self) -> &'static str {
        match self {
            EntryPoint::SelfTest => "testfunction",
            EntryPoint::GetNext => "ices_python_get_next",
            EntryPoint::GetMetadata => "ices_python_get_metadata",
            EntryPoint::Initialize => "ices_python_initialize",
            EntryPoint::Shutdown => "ices_python_shutdown",
            EntryPoint::GetCurrentLineNumber => "ices_python_get_current_lineno",
        }
    }

    /// Look an entry point up by its exported name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|entry| entry.name() == name)
    }

    /// Only the metadata hook may be missing from a module
    pub fn is_optional(self) -> bool {
        matches!(self, EntryPoint::GetMetadata)
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a lifecycle entry point (initialize, shutdown)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    Ok,
    Failed,
}

impl ModuleStatus {
    pub fn is_ok(self) -> bool {
        self == ModuleStatus::Ok
    }

    /// Interpret an integer return: non-zero is success, zero is failure
    pub fn from_raw(value: i64) -> Self {
        if value != 0 {
            ModuleStatus::Ok
        } else {
            ModuleStatus::Failed
        }
    }
}

impl From<bool> for ModuleStatus {
    fn from(ok: bool) -> Self {
        if ok {
            ModuleStatus::Ok
        } else {
            ModuleStatus::Failed
        }
    }
}

impl From<ModuleStatus> for bool {
    fn from(status: ModuleStatus) -> Self {
        status.is_ok()
    }
}

/// Required entry points of a playlist module
///
/// Implementations are driven from one thread with `&mut self`, so they keep
/// their state (such as the line counter) in plain fields.
pub trait PlaylistModule {
    /// Module version reported by `self_test`
    fn version(&self) -> &str;

    /// Confirms the module loaded; emits a diagnostic naming the version
    fn self_test(&mut self);

    /// Prepare the module. The host requests no tracks unless this returns `Ok`.
    fn initialize(&mut self) -> ModuleStatus;

    /// Tear the module down. Called exactly once; no calls follow it.
    fn shutdown(&mut self) -> ModuleStatus;

    /// Name of the next media item to stream
    fn next_track(&mut self) -> TrackName;

    /// Playlist line number for cue-sheet bookkeeping
    ///
    /// The first call after `initialize` returns exactly 0. Every later call
    /// returns a strictly larger value, so 0 is never seen again. Hosts delay
    /// the first metadata update when they see 0.
    fn current_line_number(&mut self) -> i64;

    /// Optional metadata capability; `None` when the module has no metadata hook
    fn metadata_provider(&mut self) -> Option<&mut dyn MetadataProvider> {
        None
    }
}

/// Optional metadata hook of a playlist module
pub trait MetadataProvider {
    /// Display string for the current track, or [`Metadata::none`] to make the
    /// host fall back to the file's own metadata
    fn metadata(&mut self) -> Metadata;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_point_names_round_trip() {
        for entry in EntryPoint::ALL {
            assert_eq!(EntryPoint::from_name(entry.name()), Some(entry));
        }
        assert_eq!(EntryPoint::from_name("ices_perl_get_next"), None);
    }

    #[test]
    fn test_only_metadata_is_optional() {
        let optional: Vec<_> = EntryPoint::ALL.into_iter().filter(|e| e.is_optional()).collect();
        assert_eq!(optional, vec![EntryPoint::GetMetadata]);
    }

    #[test]
    fn test_status_from_raw() {
        assert_eq!(ModuleStatus::from_raw(1), ModuleStatus::Ok);
        assert_eq!(ModuleStatus::from_raw(-1), ModuleStatus::Ok);
        assert_eq!(ModuleStatus::from_raw(0), ModuleStatus::Failed);
    }

    #[test]
    fn test_status_bool_conversions() {
        assert_eq!(ModuleStatus::from(true), ModuleStatus::Ok);
        assert_eq!(ModuleStatus::from(false), ModuleStatus::Failed);
        assert!(bool::from(ModuleStatus::Ok));
        assert!(!bool::from(ModuleStatus::Failed));
    }
}
