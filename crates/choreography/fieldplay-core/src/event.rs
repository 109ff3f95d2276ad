//! Events: several entities' paths on one shared millisecond timeline, split by
//! named phases.
//!
//! An event references paths by id and never owns them. Mutators follow the path
//! model's copy-on-write style: borrow, return a new event.

use serde::{Deserialize, Serialize};
use std::hash::BuildHasher;

use crate::data::MovementPath;
use crate::ids::{EntityId, EventId, IdGenerator, PathId, PhaseId};

/// Binds one entity's path into an event, starting `start_time_offset` ms in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPathConfig {
    pub player_id: EntityId,
    pub path_id: PathId,
    #[serde(default)]
    pub start_time_offset: f32,
}

impl PlayerPathConfig {
    pub fn new(player_id: impl Into<EntityId>, path_id: impl Into<PathId>, start_time_offset: f32) -> Self {
        Self {
            player_id: player_id.into(),
            path_id: path_id.into(),
            start_time_offset: start_time_offset.max(0.0),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPathUpdate {
    #[serde(default)]
    pub path_id: Option<PathId>,
    #[serde(default)]
    pub start_time_offset: Option<f32>,
}

/// A named pause boundary at `start_time` ms on the event clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationPhase {
    pub id: PhaseId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: f32,
}

impl AnimationPhase {
    pub fn new(id: impl Into<PhaseId>, name: impl Into<String>, start_time: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            start_time: start_time.max(0.0),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The zero-time phase plays immediately and never pauses playback.
    #[inline]
    pub fn is_prologue(&self) -> bool {
        self.start_time <= 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_time: Option<f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationEvent {
    pub id: EventId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minimum length in ms; see [`AnimationEvent::resolve_end_time`].
    pub duration: f32,
    #[serde(default)]
    pub player_paths: Vec<PlayerPathConfig>,
    #[serde(default)]
    pub phases: Vec<AnimationPhase>,
    /// Host-supplied creation instant, ms since the Unix epoch.
    #[serde(default)]
    pub created_at: f64,
}

/// Lookup of path durations (seconds) by id.
pub trait PathDurations {
    fn path_duration(&self, path: &PathId) -> Option<f32>;
}

impl<S: BuildHasher> PathDurations for std::collections::HashMap<PathId, f32, S> {
    fn path_duration(&self, path: &PathId) -> Option<f32> {
        self.get(path).copied()
    }
}

impl<S: BuildHasher> PathDurations for hashbrown::HashMap<PathId, f32, S> {
    fn path_duration(&self, path: &PathId) -> Option<f32> {
        self.get(path).copied()
    }
}

impl PathDurations for [MovementPath] {
    fn path_duration(&self, path: &PathId) -> Option<f32> {
        self.iter().find(|p| &p.id == path).map(|p| p.duration)
    }
}

/// Empty event with no paths or phases.
pub fn create_event(
    ids: &mut dyn IdGenerator,
    name: impl Into<String>,
    duration_ms: f32,
    created_at: f64,
) -> AnimationEvent {
    AnimationEvent {
        id: ids.next_event_id(),
        name: name.into(),
        description: None,
        duration: duration_ms.max(0.0),
        player_paths: Vec::new(),
        phases: Vec::new(),
        created_at,
    }
}

fn sort_phases(phases: &mut [AnimationPhase]) {
    phases.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
}

impl AnimationEvent {
    /// Insert `config`, replacing any existing config for the same player.
    pub fn add_player_path(&self, config: PlayerPathConfig) -> AnimationEvent {
        let mut next = self.clone();
        match next
            .player_paths
            .iter_mut()
            .find(|c| c.player_id == config.player_id)
        {
            Some(existing) => *existing = config,
            None => next.player_paths.push(config),
        }
        next
    }

    pub fn remove_player_path(&self, player_id: &EntityId) -> AnimationEvent {
        let mut next = self.clone();
        next.player_paths.retain(|c| &c.player_id != player_id);
        next
    }

    /// Apply a partial edit to a player's config; unknown players are a no-op.
    pub fn update_player_path(&self, player_id: &EntityId, update: PlayerPathUpdate) -> AnimationEvent {
        let mut next = self.clone();
        if let Some(cfg) = next
            .player_paths
            .iter_mut()
            .find(|c| &c.player_id == player_id)
        {
            if let Some(path_id) = update.path_id {
                cfg.path_id = path_id;
            }
            if let Some(offset) = update.start_time_offset {
                cfg.start_time_offset = offset.max(0.0);
            }
        }
        next
    }

    #[inline]
    pub fn player_path(&self, player_id: &EntityId) -> Option<&PlayerPathConfig> {
        self.player_paths.iter().find(|c| &c.player_id == player_id)
    }

    /// Named, positive duration, at least one player path.
    pub fn is_valid_event(&self) -> bool {
        !self.name.trim().is_empty() && self.duration > 0.0 && !self.player_paths.is_empty()
    }

    /// Actual end of the event in ms: the configured duration, extended to cover
    /// the latest-finishing player path. Unknown path ids count as zero length.
    pub fn resolve_end_time<D>(&self, durations: &D) -> f32
    where
        D: PathDurations + ?Sized,
    {
        self.player_paths
            .iter()
            .map(|cfg| {
                let secs = durations.path_duration(&cfg.path_id).unwrap_or(0.0);
                cfg.start_time_offset + secs * 1000.0
            })
            .fold(self.duration, f32::max)
    }

    #[inline]
    pub fn references_path(&self, path_id: &PathId) -> bool {
        self.player_paths.iter().any(|c| &c.path_id == path_id)
    }

    pub fn referenced_path_ids(&self) -> impl Iterator<Item = &PathId> {
        self.player_paths.iter().map(|c| &c.path_id)
    }

    /// Phases ordered by start time, regardless of how they were stored.
    pub fn sorted_phases(&self) -> Vec<AnimationPhase> {
        let mut phases = self.phases.clone();
        sort_phases(&mut phases);
        phases
    }

    /// Insert a phase (replacing one with the same id) and keep phases sorted.
    pub fn add_phase(&self, phase: AnimationPhase) -> AnimationEvent {
        let mut next = self.clone();
        next.phases.retain(|p| p.id != phase.id);
        next.phases.push(phase);
        sort_phases(&mut next.phases);
        next
    }

    pub fn remove_phase(&self, phase_id: &PhaseId) -> AnimationEvent {
        let mut next = self.clone();
        next.phases.retain(|p| &p.id != phase_id);
        next
    }

    pub fn update_phase(&self, phase_id: &PhaseId, update: PhaseUpdate) -> AnimationEvent {
        let mut next = self.clone();
        if let Some(phase) = next.phases.iter_mut().find(|p| &p.id == phase_id) {
            if let Some(name) = update.name {
                phase.name = name;
            }
            if let Some(description) = update.description {
                phase.description = Some(description);
            }
            if let Some(start) = update.start_time {
                phase.start_time = start.max(0.0);
            }
        }
        sort_phases(&mut next.phases);
        next
    }
}
