//! Tunable thresholds for fieldplay-core.

use serde::{Deserialize, Serialize};

/// Minimum per-axis difference between a path's endpoints for it to count as moving.
pub const MOVEMENT_EPSILON: f32 = 1e-4;

/// Progress step used for finite-difference velocity estimates.
pub const VELOCITY_PROGRESS_DELTA: f32 = 0.01;

/// Core configuration. The plain functions use the defaults; the `*_with`
/// variants and `from_config` constructors read a host's overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub movement_epsilon: f32,
    pub velocity_delta: f32,
    pub recorder: RecorderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movement_epsilon: MOVEMENT_EPSILON,
            velocity_delta: VELOCITY_PROGRESS_DELTA,
            recorder: RecorderConfig::default(),
        }
    }
}

/// Thresholds for drag-to-path capture. Distances are field units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecorderConfig {
    /// Planar distance a sample must travel from the last recorded point to be kept.
    pub min_sample_distance: f32,
    /// The release position is appended only when further than this from the last point.
    pub final_point_epsilon: f32,
    /// Drags whose planar start/end displacement is at or below this are clicks.
    pub min_drag_displacement: f32,
    /// Floor applied to the recorded wall-clock duration, in seconds.
    pub min_duration_secs: f32,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            min_sample_distance: 1.5,
            final_point_epsilon: 0.1,
            min_drag_displacement: 1.0,
            min_duration_secs: 2.0,
        }
    }
}
