//! Drag-to-path capture.
//!
//! State machine: `Idle -> Recording -> Idle`, driven only by the host's
//! gesture signals. While recording, live positions are thinned by planar
//! distance so the keyframe count stays bounded whatever the pointer sample
//! rate. On release the kept points are spread evenly over the elapsed
//! wall-clock time and emitted as a [`MovementPath`].
//!
//! The end transition may be signalled from several sources (pointer up,
//! cancel, pointer leaving the surface, a window-level listener). Only the
//! first one while recording has any effect.

use hashbrown::HashMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::{Config, RecorderConfig};
use crate::data::{create_path_from_waypoints, EntityType, Keyframe, MovementPath};
use crate::ids::{EntityId, IdGenerator, PathId};
use crate::value::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecorderState {
    Idle,
    Recording,
}

/// Notifications for the host's undo history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HistoryEntry {
    /// An unprotected earlier path was dropped when a new drag began.
    PathDiscarded { path_id: PathId, entity_id: EntityId },
    PathRecorded { path_id: PathId, entity_id: EntityId },
}

/// Where the host keeps paths; the recorder only lists and drops them.
pub trait PathStore {
    fn paths_for_entity(&self, entity: &EntityId) -> Vec<PathId>;
    fn discard_path(&mut self, path: &PathId);
}

/// Collaborators queried and notified by the recorder. Adapters implement this
/// over their own path/event stores.
pub trait RecorderHost: PathStore {
    /// Whether a saved event's player paths reference `path`.
    fn is_referenced_by_saved_event(&self, path: &PathId) -> bool;

    /// Whether `path` sits in the captured-but-not-yet-saved set.
    fn is_captured_unsaved(&self, path: &PathId) -> bool;

    #[inline]
    fn is_protected(&self, path: &PathId) -> bool {
        self.is_referenced_by_saved_event(path) || self.is_captured_unsaved(path)
    }

    fn record_history(&mut self, _entry: HistoryEntry) {}
}

#[derive(Clone, Debug)]
struct Capture {
    entity_id: EntityId,
    entity_type: EntityType,
    points: Vec<Vec3>,
    started_at_ms: f64,
}

/// Recorder for a single entity's drag.
#[derive(Clone, Debug, Default)]
pub struct PathRecorder {
    cfg: RecorderConfig,
    capture: Option<Capture>,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: RecorderConfig) -> Self {
        Self { cfg, capture: None }
    }

    /// Recorder using the `recorder` section of a host config.
    pub fn from_config(cfg: &Config) -> Self {
        Self::with_config(cfg.recorder)
    }

    #[inline]
    pub fn config(&self) -> &RecorderConfig {
        &self.cfg
    }

    #[inline]
    pub fn state(&self) -> RecorderState {
        if self.capture.is_some() {
            RecorderState::Recording
        } else {
            RecorderState::Idle
        }
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        self.capture.is_some()
    }

    /// Entity being recorded, if any.
    pub fn entity(&self) -> Option<&EntityId> {
        self.capture.as_ref().map(|c| &c.entity_id)
    }

    /// Points kept so far (empty when idle).
    pub fn recorded_points(&self) -> &[Vec3] {
        self.capture
            .as_ref()
            .map(|c| c.points.as_slice())
            .unwrap_or(&[])
    }

    /// Gesture down. Drops the entity's unprotected earlier paths, then starts
    /// capturing at `current_position`. Restarts if already recording.
    pub fn begin<H>(
        &mut self,
        entity_id: EntityId,
        entity_type: EntityType,
        current_position: Vec3,
        now_ms: f64,
        host: &mut H,
    ) where
        H: RecorderHost + ?Sized,
    {
        if let Some(prev) = self.capture.take() {
            debug!(
                "recorder: restarting capture for '{}' ({} point(s) dropped)",
                prev.entity_id,
                prev.points.len()
            );
        }

        for path_id in host.paths_for_entity(&entity_id) {
            if host.is_protected(&path_id) {
                trace!("recorder: keeping protected path '{path_id}'");
                continue;
            }
            debug!("recorder: discarding superseded path '{path_id}' of '{entity_id}'");
            host.discard_path(&path_id);
            host.record_history(HistoryEntry::PathDiscarded {
                path_id,
                entity_id: entity_id.clone(),
            });
        }

        debug!("recorder: begin '{entity_id}' at {current_position:?}");
        self.capture = Some(Capture {
            entity_id,
            entity_type,
            points: vec![current_position],
            started_at_ms: now_ms,
        });
    }

    /// Live position sample. Returns whether the point was kept.
    pub fn update(&mut self, position: Vec3) -> bool {
        let min = self.cfg.min_sample_distance;
        let capture = match self.capture.as_mut() {
            Some(c) => c,
            None => return false,
        };
        let keep = match capture.points.last() {
            Some(last) => last.planar_distance(position) >= min,
            None => true,
        };
        if keep {
            capture.points.push(position);
            trace!(
                "recorder: kept sample #{} for '{}'",
                capture.points.len() - 1,
                capture.entity_id
            );
        }
        keep
    }

    /// Gesture end (release, cancel or leaving the surface). Idempotent: when
    /// idle this returns `None` without touching anything.
    ///
    /// Returns the finished path, or `None` when the drag was too short to be
    /// more than a click.
    pub fn finish<H>(
        &mut self,
        final_position: Vec3,
        now_ms: f64,
        ids: &mut dyn IdGenerator,
        host: &mut H,
    ) -> Option<MovementPath>
    where
        H: RecorderHost + ?Sized,
    {
        let Capture {
            entity_id,
            entity_type,
            mut points,
            started_at_ms,
        } = self.capture.take()?;

        if let Some(last) = points.last() {
            if last.distance(final_position) > self.cfg.final_point_epsilon {
                points.push(final_position);
            }
        }

        let (first, last) = match (points.first(), points.last()) {
            (Some(f), Some(l)) if points.len() >= 2 => (*f, *l),
            _ => {
                debug!("recorder: '{entity_id}' released with a single point; no path");
                return None;
            }
        };
        let displacement = first.planar_distance(last);
        if displacement <= self.cfg.min_drag_displacement {
            debug!("recorder: '{entity_id}' moved {displacement:.3}; treating as click");
            return None;
        }

        let elapsed_secs = ((now_ms - started_at_ms) / 1000.0).max(0.0) as f32;
        let duration = elapsed_secs.max(self.cfg.min_duration_secs);
        let last_index = (points.len() - 1) as f32;
        let waypoints: Vec<Keyframe> = points
            .iter()
            .enumerate()
            .map(|(i, p)| Keyframe::new(i as f32 / last_index * duration, *p))
            .collect();

        match create_path_from_waypoints(ids, entity_id.clone(), entity_type, waypoints) {
            Ok(path) => {
                debug!(
                    "recorder: '{entity_id}' recorded path '{}' ({} keyframes, {duration:.2}s)",
                    path.id,
                    path.keyframes.len()
                );
                host.record_history(HistoryEntry::PathRecorded {
                    path_id: path.id.clone(),
                    entity_id,
                });
                Some(path)
            }
            Err(err) => {
                debug!("recorder: '{entity_id}' dropped: {err}");
                None
            }
        }
    }

    /// Leave Recording without emitting anything. Returns whether a capture
    /// was in progress.
    pub fn abort(&mut self) -> bool {
        match self.capture.take() {
            Some(c) => {
                debug!("recorder: aborted capture for '{}'", c.entity_id);
                true
            }
            None => false,
        }
    }
}

/// One recorder per dragged entity, so simultaneous drags never interfere.
#[derive(Debug, Default)]
pub struct DragSessions {
    cfg: RecorderConfig,
    active: HashMap<EntityId, PathRecorder>,
}

impl DragSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: RecorderConfig) -> Self {
        Self {
            cfg,
            active: HashMap::new(),
        }
    }

    /// Sessions whose recorders all use the `recorder` section of `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::with_config(cfg.recorder)
    }

    pub fn begin<H>(
        &mut self,
        entity_id: EntityId,
        entity_type: EntityType,
        current_position: Vec3,
        now_ms: f64,
        host: &mut H,
    ) where
        H: RecorderHost + ?Sized,
    {
        let cfg = self.cfg;
        self.active
            .entry(entity_id.clone())
            .or_insert_with(|| PathRecorder::with_config(cfg))
            .begin(entity_id, entity_type, current_position, now_ms, host);
    }

    pub fn update(&mut self, entity_id: &EntityId, position: Vec3) -> bool {
        self.active
            .get_mut(entity_id)
            .map(|r| r.update(position))
            .unwrap_or(false)
    }

    pub fn finish<H>(
        &mut self,
        entity_id: &EntityId,
        final_position: Vec3,
        now_ms: f64,
        ids: &mut dyn IdGenerator,
        host: &mut H,
    ) -> Option<MovementPath>
    where
        H: RecorderHost + ?Sized,
    {
        let mut recorder = self.active.remove(entity_id)?;
        recorder.finish(final_position, now_ms, ids, host)
    }

    pub fn abort(&mut self, entity_id: &EntityId) -> bool {
        self.active
            .remove(entity_id)
            .map(|mut r| r.abort())
            .unwrap_or(false)
    }

    #[inline]
    pub fn is_recording(&self, entity_id: &EntityId) -> bool {
        self.active.contains_key(entity_id)
    }

    pub fn active_entities(&self) -> impl Iterator<Item = &EntityId> {
        self.active.keys()
    }
}
