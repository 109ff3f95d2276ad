//! Identifiers and injectable generators for paths, events and phases.
//!
//! Ids are opaque strings on the wire. The core never mints them from the wall
//! clock; callers hand in an [`IdGenerator`] so tests stay deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a [`crate::data::MovementPath`].
    PathId
);
string_id!(
    /// Identifier of the ball or a player on the field.
    EntityId
);
string_id!(
    /// Identifier of an [`crate::event::AnimationEvent`].
    EventId
);
string_id!(
    /// Identifier of an [`crate::event::AnimationPhase`].
    PhaseId
);

/// Source of fresh identifiers, injected by the host.
pub trait IdGenerator {
    fn next_path_id(&mut self) -> PathId;
    fn next_event_id(&mut self) -> EventId;
    fn next_phase_id(&mut self) -> PhaseId;
}

/// Monotonic counters per id kind (`path-0`, `path-1`, `event-0`, ...).
#[derive(Default, Debug)]
pub struct SequentialIds {
    next_path: u32,
    next_event: u32,
    next_phase: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl IdGenerator for SequentialIds {
    #[inline]
    fn next_path_id(&mut self) -> PathId {
        let id = PathId(format!("path-{}", self.next_path));
        self.next_path = self.next_path.wrapping_add(1);
        id
    }

    #[inline]
    fn next_event_id(&mut self) -> EventId {
        let id = EventId(format!("event-{}", self.next_event));
        self.next_event = self.next_event.wrapping_add(1);
        id
    }

    #[inline]
    fn next_phase_id(&mut self) -> PhaseId {
        let id = PhaseId(format!("phase-{}", self.next_phase));
        self.next_phase = self.next_phase.wrapping_add(1);
        id
    }
}

/// Random v4 UUIDs, for hosts that persist ids across sessions.
#[derive(Default, Debug, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_path_id(&mut self) -> PathId {
        PathId(Uuid::new_v4().to_string())
    }

    fn next_event_id(&mut self) -> EventId {
        EventId(Uuid::new_v4().to_string())
    }

    fn next_phase_id(&mut self) -> PhaseId {
        PhaseId(Uuid::new_v4().to_string())
    }
}
