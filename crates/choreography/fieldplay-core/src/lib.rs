//! Fieldplay Core (engine-agnostic)
//!
//! Movement choreography for a virtual field: keyframed paths for the ball and
//! players, time/progress sampling with easing, multi-entity events with phase
//! boundaries, and the drag-to-path recorder.
//!
//! Everything here is synchronous and pure except [`recorder::PathRecorder`],
//! whose state is owned by the drag interaction driving it. Rendering, input and
//! persistence live in the host; it passes positions and clocks in and stores
//! the values handed back.

pub mod config;
pub mod data;
pub mod derivative;
pub mod error;
pub mod event;
pub mod ids;
pub mod interp;
pub mod phase;
pub mod recorder;
pub mod sampling;
pub mod stored;
pub mod timeline;
pub mod value;

// Re-exports for consumers (hosts and schedulers)
pub use config::{Config, RecorderConfig};
pub use data::{
    create_path, create_path_from_waypoints, EntityType, Keyframe, KeyframeUpdate, MovementPath,
};
pub use derivative::{
    velocity_at_progress, velocity_at_progress_with, velocity_at_progress_with_delta,
};
pub use error::ChoreoError;
pub use event::{
    create_event, AnimationEvent, AnimationPhase, PathDurations, PhaseUpdate, PlayerPathConfig,
    PlayerPathUpdate,
};
pub use ids::{EntityId, EventId, IdGenerator, PathId, PhaseId, SequentialIds, UuidIds};
pub use interp::Easing;
pub use phase::{active_phase_index, next_phase_boundary, pending_phase_boundary, phase_window};
pub use recorder::{
    DragSessions, HistoryEntry, PathRecorder, PathStore, RecorderHost, RecorderState,
};
pub use sampling::{
    path_length, position_at_progress, position_at_progress_with_easing, position_at_time,
    position_at_time_with_offset, sample_positions,
};
pub use stored::{parse_stored_choreography_json, StoredChoreography};
pub use timeline::{
    resolve_player_position, sample_event, PathLibrary, PathSource, PlayerPose, PoseState,
};
pub use value::Vec3;

/// Result alias for fallible model operations.
pub type Result<T> = core::result::Result<T, ChoreoError>;
