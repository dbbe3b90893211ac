//! # Cuecast Host Library (cuecast-host)
//!
//! A conforming host for playlist modules: loads one module, enforces its
//! lifecycle, pulls tracks, decides when and what metadata to publish, and
//! renders cue-sheet entries.
//!
//! Media decoding, streaming and file output belong to the surrounding daemon
//! and are not done here.

pub mod cue;
pub mod host;
pub mod metadata;
pub mod session;

pub use cue::{CueEntry, StreamProgress};
pub use host::{PlaylistHost, TrackSelection};
pub use metadata::MetadataPlan;
pub use session::{EventLogStats, SessionOptions, SessionReport};
