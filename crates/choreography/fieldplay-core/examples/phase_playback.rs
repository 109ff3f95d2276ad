use fieldplay_core::{
    create_event, create_path, next_phase_boundary, pending_phase_boundary, sample_event,
    AnimationPhase, EntityId, EntityType, PathLibrary, PlayerPathConfig, SequentialIds, Vec3,
};

fn main() -> anyhow::Result<()> {
    let mut ids = SequentialIds::new();

    let run = create_path(
        &mut ids,
        EntityId::from("p9"),
        EntityType::Player,
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(20.0, 0.0, 5.0),
        3.0,
    );
    let pass = create_path(
        &mut ids,
        EntityId::from("ball"),
        EntityType::Ball,
        Vec3::new(-10.0, 0.0, 0.0),
        Vec3::new(20.0, 0.0, 5.0),
        1.5,
    );

    let event = create_event(&mut ids, "Through ball", 2000.0, 0.0)
        .add_player_path(PlayerPathConfig::new("p9", run.id.clone(), 0.0))
        .add_player_path(PlayerPathConfig::new("ball", pass.id.clone(), 1500.0))
        .add_phase(AnimationPhase::new("setup", "Setup", 0.0))
        .add_phase(AnimationPhase::new("pass", "Pass", 1500.0).with_description("Ball is played"));

    let paths: PathLibrary = [run, pass].into_iter().collect();
    let end_ms = event.resolve_end_time(&paths);
    println!("'{}' runs for {end_ms} ms", event.name);

    // 10 Hz scheduler; pauses once at each boundary it crosses.
    let phases = event.sorted_phases();
    let mut acknowledged_ms = f32::NEG_INFINITY;
    let mut now_ms = 0.0_f32;
    while now_ms <= end_ms {
        if let Some(idx) = pending_phase_boundary(&phases, now_ms, acknowledged_ms) {
            let phase = &phases[idx];
            println!("-- paused at '{}' ({} ms); resuming", phase.name, phase.start_time);
            acknowledged_ms = phase.start_time;
        }
        let poses = sample_event(&event, &paths, now_ms, |_| None);
        println!("t={now_ms:>6.0} {}", serde_json::to_string(&poses)?);
        if let Some(next) = next_phase_boundary(&phases, now_ms) {
            log::trace!("next boundary at {} ms", phases[next].start_time);
        }
        now_ms += 100.0;
    }
    Ok(())
}
