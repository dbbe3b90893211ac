//! Event types for the Cuecast host
//!
//! Provides the lifecycle state enum, host event definitions and the EventBus
//! the host publishes on.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Lifecycle of one loaded playlist module
///
/// `Uninitialized` → `Ready` on a successful initialize, `Uninitialized` →
/// `Failed` otherwise. Both `Ready` and `Failed` end in `Terminated` once the
/// module's shutdown has been called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Uninitialized,
    Ready,
    Failed,
    Terminated,
}

impl LifecycleState {
    /// Whether per-track queries (next track, metadata, line number) may reach the module
    pub fn accepts_track_queries(self) -> bool {
        matches!(self, LifecycleState::Ready)
    }

    /// Whether the module's shutdown entry point may still be called
    pub fn accepts_shutdown(self) -> bool {
        matches!(self, LifecycleState::Ready | LifecycleState::Failed)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Ready => "ready",
            LifecycleState::Failed => "failed",
            LifecycleState::Terminated => "terminated",
        };
        f.write_str(s)
    }
}

/// Where the published title of a track came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// The module's metadata hook returned a display string
    Module,
    /// No module metadata; title derived from the track filename
    Filename,
}

/// Host event types
///
/// Events are broadcast via EventBus and serialize to JSON tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    /// Module instance resolved and self-tested
    ModuleLoaded {
        session_id: Uuid,
        module: String,
        /// Whether the optional metadata hook is present
        has_metadata: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Lifecycle transition
    ModuleStateChanged {
        session_id: Uuid,
        old_state: LifecycleState,
        new_state: LifecycleState,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Host pulled the next track from the module
    ///
    /// Triggers:
    /// - Metadata publication after `publish_delay_ms`
    /// - Cue sheet update
    TrackSelected {
        session_id: Uuid,
        track: String,
        line_number: i64,
        title: String,
        title_source: TitleSource,
        publish_delay_ms: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Module shutdown returned; `success` is the module's own report
    ShutdownReported {
        session_id: Uuid,
        success: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl HostEvent {
    /// Session the event belongs to
    pub fn session_id(&self) -> Uuid {
        match self {
            HostEvent::ModuleLoaded { session_id, .. }
            | HostEvent::ModuleStateChanged { session_id, .. }
            | HostEvent::TrackSelected { session_id, .. }
            | HostEvent::ShutdownReported { session_id, .. } => *session_id,
        }
    }
}

/// Central event distribution bus for host events
///
/// The EventBus uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block the host)
/// - Multiple concurrent subscribers
/// - Lagged message detection for slow subscribers
///
/// # Examples
///
/// ```
/// use cuecast_common::events::{EventBus, HostEvent, LifecycleState};
///
/// let event_bus = EventBus::new(100);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit_lossy(HostEvent::ModuleStateChanged {
///     session_id: uuid::Uuid::new_v4(),
///     old_state: LifecycleState::Uninitialized,
///     new_state: LifecycleState::Ready,
///     timestamp: chrono::Utc::now(),
/// });
///
/// assert!(rx.try_recv().is_ok());
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<HostEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    #[allow(clippy::result_large_err)]
    pub fn emit(&self, event: HostEvent) -> Result<usize, broadcast::error::SendError<HostEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: HostEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ready_accepts_track_queries() {
        assert!(LifecycleState::Ready.accepts_track_queries());
        assert!(!LifecycleState::Uninitialized.accepts_track_queries());
        assert!(!LifecycleState::Failed.accepts_track_queries());
        assert!(!LifecycleState::Terminated.accepts_track_queries());
    }

    #[test]
    fn test_shutdown_allowed_after_ready_or_failed() {
        assert!(LifecycleState::Ready.accepts_shutdown());
        assert!(LifecycleState::Failed.accepts_shutdown());
        assert!(!LifecycleState::Uninitialized.accepts_shutdown());
        assert!(!LifecycleState::Terminated.accepts_shutdown());
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = HostEvent::TrackSelected {
            session_id: Uuid::nil(),
            track: "Very nice song.mp3".to_string(),
            line_number: 0,
            title: "Artist - Title".to_string(),
            title_source: TitleSource::Module,
            publish_delay_ms: 3000,
            timestamp: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TrackSelected");
        assert_eq!(json["title_source"], "module");
        assert_eq!(json["line_number"], 0);

        let back: HostEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_emit_without_subscribers() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);

        let event = HostEvent::ShutdownReported {
            session_id: Uuid::new_v4(),
            success: true,
            timestamp: chrono::Utc::now(),
        };

        // No receivers: emit reports it, emit_lossy swallows it
        assert!(bus.emit(event.clone()).is_err());
        bus.emit_lossy(event);
    }

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();
        let session_id = Uuid::new_v4();

        bus.emit(HostEvent::ModuleLoaded {
            session_id,
            module: "skeleton".to_string(),
            has_metadata: true,
            timestamp: chrono::Utc::now(),
        })
        .unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.session_id(), session_id);
        assert_eq!(bus.capacity(), 10);
    }
}
