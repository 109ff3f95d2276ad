//! Phase boundary queries for playback schedulers.
//!
//! All functions take phases in any order and answer as if they were sorted by
//! start time (ties keep their stored order). Indices refer to that sorted
//! order, i.e. to [`crate::event::AnimationEvent::sorted_phases`].
//!
//! The scheduler owns acknowledgement: it remembers up to which boundary it
//! has already paused and passes that in. Nothing here holds state.

use crate::event::AnimationPhase;

fn sorted_starts(phases: &[AnimationPhase]) -> Vec<f32> {
    let mut starts: Vec<f32> = phases.iter().map(|p| p.start_time).collect();
    starts.sort_by(f32::total_cmp);
    starts
}

/// Index of the phase the clock is in: the last phase starting at or before
/// `global_ms`. `None` before the first phase or when there are none.
pub fn active_phase_index(phases: &[AnimationPhase], global_ms: f32) -> Option<usize> {
    sorted_starts(phases)
        .iter()
        .rposition(|&start| start <= global_ms)
}

/// The most recent pausing boundary reached by `global_ms` that lies after
/// `acknowledged_through_ms`. The zero-time prologue never pauses.
pub fn pending_phase_boundary(
    phases: &[AnimationPhase],
    global_ms: f32,
    acknowledged_through_ms: f32,
) -> Option<usize> {
    sorted_starts(phases)
        .iter()
        .rposition(|&start| start > 0.0 && start <= global_ms && start > acknowledged_through_ms)
}

/// The next pausing boundary strictly after `global_ms`, where playback
/// should halt until resumed.
pub fn next_phase_boundary(phases: &[AnimationPhase], global_ms: f32) -> Option<usize> {
    sorted_starts(phases)
        .iter()
        .position(|&start| start > 0.0 && start > global_ms)
}

/// `(start, end)` ms of the phase at sorted `index`: it runs until the next
/// phase begins, the last one until `event_end_ms`.
pub fn phase_window(phases: &[AnimationPhase], index: usize, event_end_ms: f32) -> Option<(f32, f32)> {
    let starts = sorted_starts(phases);
    let start = *starts.get(index)?;
    let end = starts
        .get(index + 1)
        .copied()
        .unwrap_or(event_end_ms)
        .max(start);
    Some((start, end))
}
