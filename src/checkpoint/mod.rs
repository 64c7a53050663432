//! Checkpoint and restore for machines.
//!
//! A checkpoint captures the runtime state of a machine - active path,
//! pending events and transition trace - so a control process can persist
//! it and pick up where it left off after a restart. Handlers and
//! transition actions are code, not data: they are never captured, and a
//! restored machine re-runs its entry hooks down the restored path to
//! re-establish handler state.
//!
//! Capture with [`Machine::checkpoint`](crate::engine::Machine::checkpoint),
//! apply with [`Machine::restore`](crate::engine::Machine::restore).

use crate::core::{EventId, StateId, TransitionTrace};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's runtime state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: StateId, E: EventId> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When the checkpoint was captured
    pub timestamp: DateTime<Utc>,

    /// The machine's configured initial state
    pub initial_state: S,

    /// Active path at capture time, root-most first
    pub active_path: Vec<S>,

    /// Events that were queued but not yet dispatched
    pub pending_events: Vec<E>,

    /// Transition trace at capture time
    pub trace: TransitionTrace<S, E>,
}

impl<S: StateId, E: EventId> Checkpoint<S, E> {
    /// Encode the checkpoint as JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self)
            .map_err(|err| CheckpointError::SerializationFailed(err.to_string()))
    }

    /// Decode a checkpoint from JSON, checking the format version.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|err| CheckpointError::DeserializationFailed(err.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Encode the checkpoint in the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self)
            .map_err(|err| CheckpointError::SerializationFailed(err.to_string()))
    }

    /// Decode a checkpoint from the binary format, checking the version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|err| CheckpointError::DeserializationFailed(err.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}
