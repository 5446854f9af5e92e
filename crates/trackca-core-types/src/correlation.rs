//! Correlation types for per-event tracking
//!
//! Every processed event gets an `EventId` so that the log lines of its
//! relaxation, seeding and following phases can be grouped together. The
//! multipass finder additionally numbers its passes with a `PassId`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one processed event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Generate a new random EventId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. an upstream event number)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordinal of a pass inside a multipass search, starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PassId(u32);

impl PassId {
    pub const FIRST: PassId = PassId(0);

    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// The pass following this one
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for PassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through the phases of one event for correlation
#[derive(Debug, Clone)]
pub struct EventContext {
    pub event_id: EventId,
    pub pass_id: Option<PassId>,
}

impl EventContext {
    /// Create a new context with a fresh EventId
    pub fn new() -> Self {
        Self {
            event_id: EventId::new(),
            pass_id: None,
        }
    }

    /// Create a context with an existing EventId
    pub fn with_event_id(event_id: EventId) -> Self {
        Self {
            event_id,
            pass_id: None,
        }
    }

    /// Attach a pass ordinal to the context
    pub fn with_pass_id(mut self, pass_id: PassId) -> Self {
        self.pass_id = Some(pass_id);
        self
    }
}

impl Default for EventContext {
    fn default() -> Self {
        Self::new()
    }
}
