//! Playlist host: owns one loaded module and drives it through its lifecycle
//!
//! Guarantees toward the module:
//! - `self_test` once, at load
//! - per-track entry points only after a successful `initialize`
//! - `shutdown` exactly once, whether `initialize` succeeded or not
//!
//! All module calls take `&mut self`, so a module is never entered from two
//! threads at once.

use crate::cue::{CueEntry, StreamProgress};
use crate::metadata::{resolve_title, MetadataPlan};
use cuecast_common::config::TomlConfig;
use cuecast_common::{Error, EventBus, HostEvent, LifecycleState, Result, TitleSource};
use cuecast_pm::{EntryPoint, Metadata, ModuleRegistry, ModuleStatus, PlaylistModule, TrackName};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Everything the host learned about one track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSelection {
    pub track: TrackName,
    pub line_number: i64,
    /// Title to publish
    pub title: String,
    pub title_source: TitleSource,
    /// Wait this long before publishing `title`
    pub publish_delay: Duration,
}

/// Host for a single playlist module instance
pub struct PlaylistHost {
    session_id: Uuid,
    module_name: String,
    module: Box<dyn PlaylistModule>,
    has_metadata: bool,
    state: LifecycleState,
    plan: MetadataPlan,
    current: Option<TrackSelection>,
    events: EventBus,
}

impl PlaylistHost {
    /// Take ownership of a module, probe its capabilities and self-test it
    pub fn load(
        module_name: impl Into<String>,
        mut module: Box<dyn PlaylistModule>,
        plan: MetadataPlan,
        events: EventBus,
    ) -> Self {
        let module_name = module_name.into();
        let session_id = Uuid::new_v4();

        let has_metadata = module.metadata_provider().is_some();
        if !has_metadata {
            debug!(
                "Module '{}' has no {} entry point; titles come from filenames",
                module_name,
                EntryPoint::GetMetadata
            );
        }

        debug!("Calling {}", EntryPoint::SelfTest);
        module.self_test();

        info!(
            "Loaded playlist module '{}' v{} (session {})",
            module_name,
            module.version(),
            session_id
        );

        events.emit_lossy(HostEvent::ModuleLoaded {
            session_id,
            module: module_name.clone(),
            has_metadata,
            timestamp: chrono::Utc::now(),
        });

        Self {
            session_id,
            module_name,
            module,
            has_metadata,
            state: LifecycleState::Uninitialized,
            plan,
            current: None,
            events,
        }
    }

    /// Resolve `module_name` in the registry and load it with timing from `config`
    pub fn from_registry(
        registry: &ModuleRegistry,
        module_name: &str,
        config: &TomlConfig,
        events: EventBus,
    ) -> Result<Self> {
        let module = registry.create(module_name)?;
        Ok(Self::load(
            module_name,
            module,
            MetadataPlan::from_config(&config.metadata),
            events,
        ))
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether the module exposes the optional metadata hook
    pub fn has_metadata(&self) -> bool {
        self.has_metadata
    }

    /// Most recent selection
    pub fn current(&self) -> Option<&TrackSelection> {
        self.current.as_ref()
    }

    /// Line number of the most recent selection; does not call the module
    pub fn current_line_number(&self) -> Option<i64> {
        self.current.as_ref().map(|selection| selection.line_number)
    }

    /// Initialize the module
    ///
    /// On failure the host enters `Failed` and refuses every per-track query.
    pub fn initialize(&mut self) -> Result<()> {
        self.require("initialize", self.state == LifecycleState::Uninitialized)?;

        debug!("Calling {}", EntryPoint::Initialize);
        match self.module.initialize() {
            ModuleStatus::Ok => {
                info!("Playlist module '{}' initialized", self.module_name);
                self.transition(LifecycleState::Ready);
                Ok(())
            }
            ModuleStatus::Failed => {
                error!("Initialization of playlist module '{}' failed", self.module_name);
                self.transition(LifecycleState::Failed);
                Err(Error::InitializeFailed(self.module_name.clone()))
            }
        }
    }

    /// Pull the next track with its line number and title
    pub fn next_track(&mut self) -> Result<TrackSelection> {
        self.require("next_track", self.state.accepts_track_queries())?;

        debug!("Calling {}", EntryPoint::GetNext);
        let track = self.module.next_track();

        debug!("Calling {}", EntryPoint::GetCurrentLineNumber);
        let line_number = self.module.current_line_number();
        if let Some(previous) = self.current_line_number() {
            if line_number <= previous {
                warn!(
                    "Module '{}' returned line number {} after {}; cue sheet may be out of order",
                    self.module_name, line_number, previous
                );
            }
        }

        let metadata = self.query_metadata();
        let (title, title_source) = resolve_title(&track, metadata);
        let publish_delay = self.plan.delay_for(line_number);

        if line_number == 0 {
            debug!("Initially delaying metadata update by {:?}", publish_delay);
        }
        info!("Next track: {} (line {}) [{}]", track, line_number, title);

        let selection = TrackSelection {
            track,
            line_number,
            title,
            title_source,
            publish_delay,
        };

        self.events.emit_lossy(HostEvent::TrackSelected {
            session_id: self.session_id,
            track: selection.track.to_string(),
            line_number,
            title: selection.title.clone(),
            title_source,
            publish_delay_ms: u64::try_from(publish_delay.as_millis()).unwrap_or(u64::MAX),
            timestamp: chrono::Utc::now(),
        });

        self.current = Some(selection.clone());
        Ok(selection)
    }

    /// Cue entry for the current track at the given stream progress
    pub fn cue_entry(&self, progress: StreamProgress) -> Result<CueEntry> {
        self.current
            .as_ref()
            .map(|selection| CueEntry::new(selection, progress))
            .ok_or(Error::NoCurrentTrack)
    }

    /// Shut the module down
    ///
    /// A failed module shutdown is logged and returned; the host terminates
    /// either way.
    pub fn shutdown(&mut self) -> Result<ModuleStatus> {
        self.require("shutdown", self.state.accepts_shutdown())?;

        debug!("Calling {}", EntryPoint::Shutdown);
        let status = self.module.shutdown();
        if status.is_ok() {
            info!("Playlist module '{}' shut down", self.module_name);
        } else {
            warn!("Shutdown of playlist module '{}' failed", self.module_name);
        }

        self.events.emit_lossy(HostEvent::ShutdownReported {
            session_id: self.session_id,
            success: status.is_ok(),
            timestamp: chrono::Utc::now(),
        });
        self.transition(LifecycleState::Terminated);

        Ok(status)
    }

    /// Metadata from the optional hook; absent hook means no metadata
    fn query_metadata(&mut self) -> Metadata {
        match self.module.metadata_provider() {
            Some(provider) => {
                debug!("Calling {}", EntryPoint::GetMetadata);
                provider.metadata()
            }
            None => Metadata::none(),
        }
    }

    fn require(&self, operation: &'static str, allowed: bool) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(Error::NotReady {
                operation,
                state: self.state,
            })
        }
    }

    fn transition(&mut self, new_state: LifecycleState) {
        let old_state = self.state;
        self.state = new_state;
        debug!("Module state {} -> {}", old_state, new_state);

        self.events.emit_lossy(HostEvent::ModuleStateChanged {
            session_id: self.session_id,
            old_state,
            new_state,
            timestamp: chrono::Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuecast_pm::SkeletonModule;

    fn host(module: SkeletonModule) -> PlaylistHost {
        PlaylistHost::load("skeleton", Box::new(module), MetadataPlan::default(), EventBus::new(16))
    }

    #[test]
    fn test_load_probes_capability() {
        assert!(host(SkeletonModule::new()).has_metadata());
        assert!(!host(SkeletonModule::basic()).has_metadata());
    }

    #[test]
    fn test_queries_refused_before_initialize() {
        let mut host = host(SkeletonModule::new());
        assert_eq!(host.state(), LifecycleState::Uninitialized);

        let result = host.next_track();
        assert!(matches!(
            result,
            Err(Error::NotReady {
                operation: "next_track",
                state: LifecycleState::Uninitialized
            })
        ));
        assert!(host.shutdown().is_err());
    }

    #[test]
    fn test_first_selection_uses_initial_delay() {
        let mut host = host(SkeletonModule::new());
        host.initialize().unwrap();

        let first = host.next_track().unwrap();
        assert_eq!(first.line_number, 0);
        assert_eq!(first.publish_delay, Duration::from_secs(3));
        assert_eq!(first.title, "Artist - Title (Label, Year)");
        assert_eq!(first.title_source, TitleSource::Module);

        let second = host.next_track().unwrap();
        assert_eq!(second.line_number, 1);
        assert_eq!(second.publish_delay, Duration::from_millis(1));
        assert_eq!(host.current_line_number(), Some(1));
    }

    #[test]
    fn test_cue_entry_requires_selection() {
        let mut host = host(SkeletonModule::new());
        host.initialize().unwrap();
        assert!(matches!(
            host.cue_entry(StreamProgress::default()),
            Err(Error::NoCurrentTrack)
        ));

        host.next_track().unwrap();
        let entry = host.cue_entry(StreamProgress::default()).unwrap();
        assert_eq!(entry.filename, "Very nice song.mp3");
        assert_eq!(entry.artist.as_deref(), Some("Artist"));
    }

    #[test]
    fn test_second_initialize_refused() {
        let mut host = host(SkeletonModule::new());
        host.initialize().unwrap();
        assert!(matches!(host.initialize(), Err(Error::NotReady { .. })));
    }
}
