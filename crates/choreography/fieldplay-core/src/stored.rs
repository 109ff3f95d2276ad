use serde::{Deserialize, Serialize};

use crate::data::{EntityType, Keyframe, MovementPath, MIN_KEYFRAMES};
use crate::error::ChoreoError;
use crate::event::{AnimationEvent, AnimationPhase, PlayerPathConfig};
use crate::ids::{EntityId, EventId, PathId, PhaseId};
use crate::value::Vec3;
use crate::Result;

/// Paths and events loaded together, as a host would hand them over.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredChoreography {
    pub paths: Vec<MovementPath>,
    pub events: Vec<AnimationEvent>,
}

/// Public API: parse a choreography JSON document
/// (`{ "paths": [...], "events": [...] }`) into core values.
///
/// Notes:
/// - Keyframe timestamps are seconds; event durations, offsets and phase
///   starts are milliseconds. Units are kept as-is.
/// - Keyframes and phases are re-sorted and each path's `duration` is
///   recomputed from its last keyframe; a stored `duration` is ignored.
/// - Positions accept either `{x,y,z}` objects or `[x,y,z]` arrays.
/// - Paths with fewer than two keyframes are rejected, as are negative or
///   non-finite times. Dangling `pathId` references are allowed.
pub fn parse_stored_choreography_json(s: &str) -> Result<StoredChoreography> {
    let doc: StoredDoc = serde_json::from_str(s)?;

    let mut paths = Vec::with_capacity(doc.paths.len());
    for sp in doc.paths {
        if sp.keyframes.len() < MIN_KEYFRAMES {
            return Err(ChoreoError::InvalidPath {
                provided: sp.keyframes.len(),
                required: MIN_KEYFRAMES,
            });
        }
        let mut keyframes = Vec::with_capacity(sp.keyframes.len());
        for k in sp.keyframes {
            let position = k.position.to_vec3();
            let timestamp = match as_time(k.timestamp) {
                Some(t) if position.is_finite() => t,
                _ => {
                    return Err(ChoreoError::invariant(format!(
                        "path '{}' has an invalid keyframe at t={}",
                        sp.id, k.timestamp
                    )))
                }
            };
            keyframes.push(Keyframe::new(timestamp, position));
        }
        keyframes.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        let duration = keyframes.last().map(|k| k.timestamp).unwrap_or(0.0);
        paths.push(MovementPath {
            id: PathId(sp.id),
            entity_id: EntityId(sp.entity_id),
            entity_type: sp.entity_type,
            keyframes,
            duration,
        });
    }

    let mut events = Vec::with_capacity(doc.events.len());
    for se in doc.events {
        let duration = as_time(se.duration).ok_or_else(|| {
            ChoreoError::invariant(format!(
                "event '{}' has invalid duration {}",
                se.id, se.duration
            ))
        })?;
        let mut player_paths: Vec<PlayerPathConfig> = Vec::with_capacity(se.player_paths.len());
        for pp in se.player_paths {
            let start_time_offset = as_time(pp.start_time_offset).ok_or_else(|| {
                ChoreoError::invariant(format!(
                    "event '{}' player '{}' has invalid start offset {}",
                    se.id, pp.player_id, pp.start_time_offset
                ))
            })?;
            let cfg = PlayerPathConfig {
                player_id: EntityId(pp.player_id),
                path_id: PathId(pp.path_id),
                start_time_offset,
            };
            // Later entries for the same player win, as with add_player_path.
            match player_paths.iter_mut().find(|c| c.player_id == cfg.player_id) {
                Some(existing) => *existing = cfg,
                None => player_paths.push(cfg),
            }
        }
        let mut phases = Vec::with_capacity(se.phases.len());
        for ph in se.phases {
            let start_time = as_time(ph.start_time).ok_or_else(|| {
                ChoreoError::invariant(format!(
                    "event '{}' phase '{}' has invalid start time {}",
                    se.id, ph.id, ph.start_time
                ))
            })?;
            phases.push(AnimationPhase {
                id: PhaseId(ph.id),
                name: ph.name,
                description: ph.description,
                start_time,
            });
        }
        phases.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        events.push(AnimationEvent {
            id: EventId(se.id),
            name: se.name,
            description: se.description,
            duration,
            player_paths,
            phases,
            created_at: se.created_at,
        });
    }

    Ok(StoredChoreography { paths, events })
}

/// Narrow a stored time to `f32`, rejecting values that are negative or
/// not finite after the cast (e.g. `1e39` overflows to infinity).
#[inline]
fn as_time(t: f64) -> Option<f32> {
    let t = t as f32;
    (t.is_finite() && t >= 0.0).then_some(t)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredDoc {
    #[serde(default)]
    pub paths: Vec<SdPath>,
    #[serde(default)]
    pub events: Vec<SdEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SdPath {
    pub id: String,
    pub entity_id: String,
    pub entity_type: EntityType,
    pub keyframes: Vec<SdKeyframe>,
}

#[derive(Debug, Deserialize)]
struct SdKeyframe {
    pub timestamp: f64, // seconds
    pub position: RawPosition,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPosition {
    Object { x: f64, y: f64, z: f64 },
    Array([f64; 3]),
}

impl RawPosition {
    fn to_vec3(&self) -> Vec3 {
        match *self {
            RawPosition::Object { x, y, z } => Vec3::new(x as f32, y as f32, z as f32),
            RawPosition::Array([x, y, z]) => Vec3::new(x as f32, y as f32, z as f32),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SdEvent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration: f64, // milliseconds
    #[serde(default)]
    pub player_paths: Vec<SdPlayerPath>,
    #[serde(default)]
    pub phases: Vec<SdPhase>,
    #[serde(default)]
    pub created_at: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SdPlayerPath {
    pub player_id: String,
    pub path_id: String,
    #[serde(default)]
    pub start_time_offset: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SdPhase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: f64,
}
