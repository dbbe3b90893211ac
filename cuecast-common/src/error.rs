//! Common error types for Cuecast

use crate::events::LifecycleState;
use thiserror::Error;

/// Common result type for Cuecast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the module crate and the host
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No playlist module registered under the requested name
    #[error("Unknown playlist module: {0}")]
    UnknownModule(String),

    /// The module's initialize entry point reported failure
    #[error("Initialization of playlist module '{0}' failed")]
    InitializeFailed(String),

    /// Operation attempted in a lifecycle state that does not allow it
    #[error("{operation} not allowed while module is {state}")]
    NotReady {
        operation: &'static str,
        state: LifecycleState,
    },

    /// Cue data requested before any track was selected
    #[error("No track has been selected yet")]
    NoCurrentTrack,

    /// Invalid value handed across the module boundary
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
