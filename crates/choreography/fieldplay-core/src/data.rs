//! Path model: keyframes and movement paths.
//!
//! Paths are plain values. Every mutator borrows the path and returns a new one
//! with keyframes re-sorted and `duration` recomputed, so a path handed to a
//! sampler is never observed half-edited.

use serde::{Deserialize, Serialize};

use crate::config::{Config, MOVEMENT_EPSILON};
use crate::error::ChoreoError;
use crate::ids::{EntityId, IdGenerator, PathId};
use crate::value::Vec3;
use crate::Result;

/// Minimum keyframe count for a path that can be scheduled.
pub const MIN_KEYFRAMES: usize = 2;

/// A position sample at a path-local time (seconds).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub timestamp: f32,
    pub position: Vec3,
}

impl Keyframe {
    #[inline]
    pub fn new(timestamp: f32, position: Vec3) -> Self {
        Self {
            timestamp,
            position,
        }
    }
}

/// Partial keyframe edit; `None` fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyframeUpdate {
    #[serde(default)]
    pub timestamp: Option<f32>,
    #[serde(default)]
    pub position: Option<Vec3>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Ball,
    Player,
}

/// Timed movement of one entity. `duration` (seconds) always equals the last
/// keyframe's timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementPath {
    pub id: PathId,
    pub entity_id: EntityId,
    pub entity_type: EntityType,
    pub keyframes: Vec<Keyframe>,
    pub duration: f32,
}

fn sort_keyframes(keyframes: &mut [Keyframe]) {
    // Stable: keyframes sharing a timestamp keep their relative order.
    keyframes.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
}

fn last_timestamp(keyframes: &[Keyframe]) -> f32 {
    keyframes.last().map(|k| k.timestamp).unwrap_or(0.0)
}

/// Two-keyframe path from `start` at t=0 to `end` at t=`duration` seconds.
pub fn create_path(
    ids: &mut dyn IdGenerator,
    entity_id: EntityId,
    entity_type: EntityType,
    start: Vec3,
    end: Vec3,
    duration: f32,
) -> MovementPath {
    let duration = duration.max(0.0);
    MovementPath {
        id: ids.next_path_id(),
        entity_id,
        entity_type,
        keyframes: vec![Keyframe::new(0.0, start), Keyframe::new(duration, end)],
        duration,
    }
}

/// Build a path from arbitrary-order waypoints. Fails with
/// [`ChoreoError::InvalidPath`] for fewer than two waypoints; never pads.
pub fn create_path_from_waypoints(
    ids: &mut dyn IdGenerator,
    entity_id: EntityId,
    entity_type: EntityType,
    waypoints: Vec<Keyframe>,
) -> Result<MovementPath> {
    if waypoints.len() < MIN_KEYFRAMES {
        return Err(ChoreoError::InvalidPath {
            provided: waypoints.len(),
            required: MIN_KEYFRAMES,
        });
    }
    let mut keyframes = waypoints;
    sort_keyframes(&mut keyframes);
    let duration = last_timestamp(&keyframes);
    Ok(MovementPath {
        id: ids.next_path_id(),
        entity_id,
        entity_type,
        keyframes,
        duration,
    })
}

impl MovementPath {
    /// Rebuild with new keyframes, restoring the sort and duration invariants.
    fn with_keyframes(&self, mut keyframes: Vec<Keyframe>) -> MovementPath {
        sort_keyframes(&mut keyframes);
        MovementPath {
            id: self.id.clone(),
            entity_id: self.entity_id.clone(),
            entity_type: self.entity_type,
            duration: last_timestamp(&keyframes),
            keyframes,
        }
    }

    /// Insert a keyframe. Negative timestamps are clamped to zero.
    pub fn add_keyframe(&self, keyframe: Keyframe) -> MovementPath {
        self.add_keyframe_indexed(keyframe).0
    }

    /// Like [`MovementPath::add_keyframe`], also returning where the keyframe landed.
    pub fn add_keyframe_indexed(&self, keyframe: Keyframe) -> (MovementPath, usize) {
        let keyframe = Keyframe {
            timestamp: keyframe.timestamp.max(0.0),
            ..keyframe
        };
        // Stable sort places it after existing keyframes with the same timestamp.
        let index = self
            .keyframes
            .iter()
            .take_while(|k| k.timestamp <= keyframe.timestamp)
            .count();
        let mut keyframes = self.keyframes.clone();
        keyframes.insert(index, keyframe);
        (self.with_keyframes(keyframes), index)
    }

    /// Remove the keyframe at `index`, refusing to drop below two keyframes.
    pub fn remove_keyframe(&self, index: usize) -> Result<MovementPath> {
        let len = self.keyframes.len();
        if index >= len {
            return Err(ChoreoError::KeyframeOutOfRange { index, len });
        }
        if len - 1 < MIN_KEYFRAMES {
            return Err(ChoreoError::invariant(format!(
                "removing keyframe {index} would leave path '{}' with {} keyframe(s)",
                self.id,
                len - 1
            )));
        }
        let mut keyframes = self.keyframes.clone();
        keyframes.remove(index);
        Ok(self.with_keyframes(keyframes))
    }

    /// Apply a partial edit to the keyframe at `index`, then re-sort.
    pub fn update_keyframe(&self, index: usize, update: KeyframeUpdate) -> Result<MovementPath> {
        let len = self.keyframes.len();
        if index >= len {
            return Err(ChoreoError::KeyframeOutOfRange { index, len });
        }
        let mut keyframes = self.keyframes.clone();
        let target = &mut keyframes[index];
        if let Some(ts) = update.timestamp {
            target.timestamp = ts.max(0.0);
        }
        if let Some(pos) = update.position {
            target.position = pos;
        }
        Ok(self.with_keyframes(keyframes))
    }

    /// Schedulable: at least two keyframes and a positive duration.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.keyframes.len() >= MIN_KEYFRAMES && self.duration > 0.0
    }

    #[inline]
    pub fn is_incomplete(&self) -> bool {
        self.keyframes.len() < MIN_KEYFRAMES
    }

    /// Whether the endpoints differ by more than [`MOVEMENT_EPSILON`] on any axis.
    #[inline]
    pub fn has_movement(&self) -> bool {
        self.has_movement_within(MOVEMENT_EPSILON)
    }

    /// [`MovementPath::has_movement`] with the host's `movement_epsilon`.
    #[inline]
    pub fn has_movement_with(&self, cfg: &Config) -> bool {
        self.has_movement_within(cfg.movement_epsilon)
    }

    pub fn has_movement_within(&self, epsilon: f32) -> bool {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => !first.position.approx_eq(last.position, epsilon),
            _ => false,
        }
    }

    #[inline]
    pub fn start_position(&self) -> Option<Vec3> {
        self.keyframes.first().map(|k| k.position)
    }

    #[inline]
    pub fn end_position(&self) -> Option<Vec3> {
        self.keyframes.last().map(|k| k.position)
    }

    /// Duration on the event clock (milliseconds).
    #[inline]
    pub fn duration_ms(&self) -> f32 {
        self.duration * 1000.0
    }
}
