//! Velocity estimates for paths by finite differences over progress.

use crate::config::{Config, VELOCITY_PROGRESS_DELTA};
use crate::data::MovementPath;
use crate::sampling::position_at_progress;
use crate::value::Vec3;

/// Compute `(current - previous) / dt`, or `None` when `dt <= 0`.
#[inline]
fn difference_quotient(current: Vec3, previous: Vec3, dt: f32) -> Option<Vec3> {
    if dt <= 0.0 || !dt.is_finite() {
        return None;
    }
    Some((current - previous) * dt.recip())
}

/// Velocity (field units per second) at progress `p`.
///
/// Forward difference over [`VELOCITY_PROGRESS_DELTA`]; near the end, where the
/// forward sample would run past progress 1, a backward difference is used. A
/// zero-duration path has no time delta and reports the zero vector.
#[inline]
pub fn velocity_at_progress(path: &MovementPath, p: f32) -> Vec3 {
    velocity_at_progress_with_delta(path, p, VELOCITY_PROGRESS_DELTA)
}

/// [`velocity_at_progress`] stepping by the host's `velocity_delta`.
#[inline]
pub fn velocity_at_progress_with(path: &MovementPath, p: f32, cfg: &Config) -> Vec3 {
    velocity_at_progress_with_delta(path, p, cfg.velocity_delta)
}

/// [`velocity_at_progress`] with an explicit progress step.
pub fn velocity_at_progress_with_delta(path: &MovementPath, p: f32, delta: f32) -> Vec3 {
    if delta <= 0.0 {
        return Vec3::ZERO;
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let (p0, p1) = if p + delta > 1.0 {
        ((p - delta).max(0.0), p)
    } else {
        (p, p + delta)
    };
    let dt = (p1 - p0) * path.duration;
    let a = position_at_progress(path, p0);
    let b = position_at_progress(path, p1);
    difference_quotient(b, a, dt).unwrap_or(Vec3::ZERO)
}
