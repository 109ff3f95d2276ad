//! Scheduler-facing helpers: resolve every entity of an event at a global time.
//!
//! The event clock runs in milliseconds, paths in seconds; the conversion lives
//! here and nowhere else. A config whose path id no longer resolves (deleted by
//! the host) or whose path is incomplete leaves the entity standing where it
//! was last seen.

use hashbrown::HashMap;
use log::warn;
use serde::{Deserialize, Serialize};
use std::hash::BuildHasher;

use crate::data::MovementPath;
use crate::event::{AnimationEvent, PathDurations, PlayerPathConfig};
use crate::ids::{EntityId, PathId};
use crate::recorder::PathStore;
use crate::sampling::position_at_time_with_offset;
use crate::value::Vec3;

/// Lookup of full paths by id.
pub trait PathSource {
    fn path(&self, id: &PathId) -> Option<&MovementPath>;
}

impl<S: BuildHasher> PathSource for std::collections::HashMap<PathId, MovementPath, S> {
    fn path(&self, id: &PathId) -> Option<&MovementPath> {
        self.get(id)
    }
}

impl PathSource for [MovementPath] {
    fn path(&self, id: &PathId) -> Option<&MovementPath> {
        self.iter().find(|p| &p.id == id)
    }
}

/// In-memory path store keyed by id.
#[derive(Clone, Debug, Default)]
pub struct PathLibrary {
    paths: HashMap<PathId, MovementPath>,
}

impl PathLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a path, returning the one it replaced.
    pub fn insert(&mut self, path: MovementPath) -> Option<MovementPath> {
        self.paths.insert(path.id.clone(), path)
    }

    #[inline]
    pub fn get(&self, id: &PathId) -> Option<&MovementPath> {
        self.paths.get(id)
    }

    pub fn remove(&mut self, id: &PathId) -> Option<MovementPath> {
        self.paths.remove(id)
    }

    #[inline]
    pub fn contains(&self, id: &PathId) -> bool {
        self.paths.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovementPath> {
        self.paths.values()
    }
}

impl FromIterator<MovementPath> for PathLibrary {
    fn from_iter<I: IntoIterator<Item = MovementPath>>(iter: I) -> Self {
        let mut lib = PathLibrary::new();
        for path in iter {
            lib.insert(path);
        }
        lib
    }
}

impl PathSource for PathLibrary {
    fn path(&self, id: &PathId) -> Option<&MovementPath> {
        self.get(id)
    }
}

impl PathDurations for PathLibrary {
    fn path_duration(&self, path: &PathId) -> Option<f32> {
        self.get(path).map(|p| p.duration)
    }
}

impl PathStore for PathLibrary {
    /// Ids sorted so discards happen in a stable order.
    fn paths_for_entity(&self, entity: &EntityId) -> Vec<PathId> {
        let mut ids: Vec<PathId> = self
            .paths
            .values()
            .filter(|p| &p.entity_id == entity)
            .map(|p| p.id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn discard_path(&mut self, path: &PathId) {
        self.paths.remove(path);
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoseState {
    /// Global clock is before the config's start offset.
    Waiting,
    Moving,
    Finished,
    /// No schedulable path; holding the last known position.
    Stationary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPose {
    pub player_id: EntityId,
    pub position: Vec3,
    pub state: PoseState,
}

/// Resolve one config at `global_ms`. Returns `None` only when the path is
/// unusable and no last known position is available.
pub fn resolve_player_position<P>(
    config: &PlayerPathConfig,
    paths: &P,
    global_ms: f32,
    last_known: Option<Vec3>,
) -> Option<PlayerPose>
where
    P: PathSource + ?Sized,
{
    let stationary = |position: Vec3| PlayerPose {
        player_id: config.player_id.clone(),
        position,
        state: PoseState::Stationary,
    };

    let path = match paths.path(&config.path_id) {
        Some(p) => p,
        None => {
            warn!(
                "timeline: player '{}' references missing path '{}'; holding last known position",
                config.player_id, config.path_id
            );
            return last_known.map(stationary);
        }
    };
    if path.is_incomplete() {
        return path.end_position().or(last_known).map(stationary);
    }

    let global_s = global_ms / 1000.0;
    let offset_s = config.start_time_offset / 1000.0;
    let state = if global_s < offset_s {
        PoseState::Waiting
    } else if global_s > offset_s + path.duration {
        PoseState::Finished
    } else {
        PoseState::Moving
    };
    Some(PlayerPose {
        player_id: config.player_id.clone(),
        position: position_at_time_with_offset(path, global_s, offset_s),
        state,
    })
}

/// Resolve every player path of `event` at `global_ms`, in config order.
/// `last_known` supplies fallback positions for dangling references.
pub fn sample_event<P, F>(
    event: &AnimationEvent,
    paths: &P,
    global_ms: f32,
    last_known: F,
) -> Vec<PlayerPose>
where
    P: PathSource + ?Sized,
    F: Fn(&EntityId) -> Option<Vec3>,
{
    event
        .player_paths
        .iter()
        .filter_map(|cfg| resolve_player_position(cfg, paths, global_ms, last_known(&cfg.player_id)))
        .collect()
}
