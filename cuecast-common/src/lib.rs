//! # Cuecast Common Library
//!
//! Shared code for the playlist module crate and the host driver:
//! - Error type
//! - Configuration loading
//! - Host event types and EventBus

pub mod config;
pub mod error;
pub mod events;

pub use error::{Error, Result};
pub use events::{EventBus, HostEvent, LifecycleState, TitleSource};
