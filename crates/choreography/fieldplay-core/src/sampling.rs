//! Path sampling: time/progress to position.
//!
//! Model:
//! - Keyframes are sorted by path-local timestamp (seconds).
//! - A sample blends exactly two bracketing keyframes, axis by axis, linearly.
//! - Easing remaps progress before the lookup; it never bends the segment.
//!
//! Every function here is total: empty paths sample to the origin, zero-width
//! brackets hold the left keyframe, out-of-range times clamp.

use crate::data::{Keyframe, MovementPath};
use crate::value::Vec3;

/// Find the bracket `(start, end, factor)` for path-local time `t`.
/// Edge cases:
/// - `t <= first.timestamp` collapses to `(0, 0, 0)`.
/// - No keyframe strictly after `t` collapses to `(last, last, 0)`.
/// - A zero-width bracket yields factor 0.
pub fn find_segment(keyframes: &[Keyframe], t: f32) -> (usize, usize, f32) {
    let n = keyframes.len();
    if n == 0 || t <= keyframes[0].timestamp {
        return (0, 0, 0.0);
    }
    let end = match keyframes.iter().position(|k| k.timestamp > t) {
        Some(i) => i,
        None => return (n - 1, n - 1, 0.0),
    };
    let start = end.saturating_sub(1);
    let t0 = keyframes[start].timestamp;
    let t1 = keyframes[end].timestamp;
    let width = t1 - t0;
    let factor = if width > 0.0 {
        ((t - t0) / width).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (start, end, factor)
}

/// Position at path-local time `t` (seconds), clamped to `[0, duration]`.
pub fn position_at_time(path: &MovementPath, t: f32) -> Vec3 {
    let keyframes = &path.keyframes;
    match keyframes.len() {
        0 => Vec3::ZERO,
        1 => keyframes[0].position,
        _ => {
            let t = if t.is_nan() {
                0.0
            } else {
                t.clamp(0.0, path.duration.max(0.0))
            };
            let (i0, i1, factor) = find_segment(keyframes, t);
            if i0 == i1 || factor == 0.0 {
                return keyframes[i0].position;
            }
            keyframes[i0].position.lerp(keyframes[i1].position, factor)
        }
    }
}

/// Position on a shared timeline where the path starts at `start_offset`.
/// Both times are seconds. Before the offset the entity waits at its first
/// keyframe; after `start_offset + duration` it rests at its last.
pub fn position_at_time_with_offset(path: &MovementPath, global_time: f32, start_offset: f32) -> Vec3 {
    let (first, last) = match (path.keyframes.first(), path.keyframes.last()) {
        (Some(f), Some(l)) => (f.position, l.position),
        _ => return Vec3::ZERO,
    };
    if global_time < start_offset {
        return first;
    }
    if global_time > start_offset + path.duration {
        return last;
    }
    position_at_time(path, global_time - start_offset)
}

/// Position at normalized progress `p` (clamped to [0,1]).
#[inline]
pub fn position_at_progress(path: &MovementPath, p: f32) -> Vec3 {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    position_at_time(path, p * path.duration)
}

/// Position at progress `p` after remapping it through `easing`.
///
/// Any `Fn(f32) -> f32` works; [`crate::interp::Easing::as_fn`] adapts the
/// named curves, and [`crate::interp::functions::ease_in_out_quad`] is the
/// playback default.
pub fn position_at_progress_with_easing<F>(path: &MovementPath, p: f32, easing: F) -> Vec3
where
    F: Fn(f32) -> f32,
{
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    position_at_progress(path, easing(p))
}

/// `n` evenly spaced samples over progress `i / (n - 1)`. `n < 2` yields one
/// sample at progress 0. For path previews; playback uses time lookups.
pub fn sample_positions(path: &MovementPath, n: usize) -> Vec<Vec3> {
    if n < 2 {
        return vec![position_at_progress(path, 0.0)];
    }
    let last = (n - 1) as f32;
    (0..n)
        .map(|i| position_at_progress(path, i as f32 / last))
        .collect()
}

/// Polyline length through the keyframe positions (straight segments).
pub fn path_length(path: &MovementPath) -> f32 {
    path.keyframes
        .windows(2)
        .map(|w| w[0].position.distance(w[1].position))
        .sum()
}
