//! # Cuecast Playlist Modules (cuecast-pm)
//!
//! The callback contract a streaming host uses to ask a playlist module what to
//! play next, what title to show, and which playlist line it is on, plus the
//! reference skeleton modules and the registry the host resolves them from.
//!
//! A module implements [`PlaylistModule`] (the required entry points). The
//! metadata hook is the optional [`MetadataProvider`] capability, reached through
//! [`PlaylistModule::metadata_provider`].

pub mod contract;
pub mod line_counter;
pub mod registry;
pub mod skeleton;
pub mod track;

pub use contract::{EntryPoint, MetadataProvider, ModuleStatus, PlaylistModule};
pub use line_counter::LineCounter;
pub use registry::ModuleRegistry;
pub use skeleton::SkeletonModule;
pub use track::{Metadata, TrackName};
