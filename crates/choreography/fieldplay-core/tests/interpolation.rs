use fieldplay_core::interp::functions::ease_in_out_quad;
use fieldplay_core::{
    create_path_from_waypoints, path_length, position_at_progress,
    position_at_progress_with_easing, position_at_time, position_at_time_with_offset,
    sample_positions, velocity_at_progress, velocity_at_progress_with,
    velocity_at_progress_with_delta, Config, Easing,
    EntityId, EntityType, Keyframe, MovementPath, SequentialIds, Vec3,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn approx_vec(a: Vec3, b: Vec3, eps: f32) {
    assert!(a.approx_eq(b, eps), "left={a:?} right={b:?} eps={eps}");
}

fn mk_path(keys: &[(f32, [f32; 3])]) -> MovementPath {
    let mut ids = SequentialIds::new();
    create_path_from_waypoints(
        &mut ids,
        EntityId::from("ball"),
        EntityType::Ball,
        keys.iter()
            .map(|(t, p)| Keyframe::new(*t, Vec3::from(*p)))
            .collect(),
    )
    .expect("valid path")
}

fn straight_ten() -> MovementPath {
    mk_path(&[(0.0, [0.0, 0.0, 0.0]), (10.0, [10.0, 0.0, 0.0])])
}

#[test]
fn midpoint_of_straight_path() {
    let p = straight_ten();
    assert_eq!(position_at_time(&p, 5.0), Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(
        position_at_progress_with_easing(&p, 0.5, ease_in_out_quad),
        Vec3::new(5.0, 0.0, 0.0)
    );
}

#[test]
fn endpoints_are_exact() {
    let p = mk_path(&[
        (0.0, [0.1, 0.2, 0.3]),
        (0.7, [3.3, 0.0, -1.1]),
        (2.9, [-7.7, 1.0, 9.9]),
    ]);
    assert_eq!(position_at_time(&p, 0.0), Vec3::new(0.1, 0.2, 0.3));
    assert_eq!(position_at_time(&p, 2.9), Vec3::new(-7.7, 1.0, 9.9));
    assert_eq!(position_at_progress(&p, 0.0), Vec3::new(0.1, 0.2, 0.3));
    assert_eq!(position_at_progress(&p, 1.0), Vec3::new(-7.7, 1.0, 9.9));
}

#[test]
fn time_is_clamped_to_path_range() {
    let p = straight_ten();
    assert_eq!(position_at_time(&p, -4.0), Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(position_at_time(&p, 40.0), Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(position_at_progress(&p, 1.5), Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn samples_lie_on_bracketing_segment() {
    let p = mk_path(&[
        (0.0, [0.0, 0.0, 0.0]),
        (2.0, [4.0, 0.0, 0.0]),
        (6.0, [4.0, 0.0, 8.0]),
    ]);
    // second segment: x fixed at 4, z grows 2 per second
    for i in 0..=40 {
        let t = 2.0 + i as f32 * 0.1;
        let pos = position_at_time(&p, t);
        approx(pos.x, 4.0, 1e-5);
        approx(pos.z, (t - 2.0) * 2.0, 1e-4);
    }
}

#[test]
fn degenerate_paths_never_panic() {
    let empty = MovementPath {
        id: "e".into(),
        entity_id: "ball".into(),
        entity_type: EntityType::Ball,
        keyframes: vec![],
        duration: 0.0,
    };
    assert_eq!(position_at_time(&empty, 3.0), Vec3::ZERO);
    assert_eq!(position_at_time_with_offset(&empty, 3.0, 1.0), Vec3::ZERO);
    assert_eq!(velocity_at_progress(&empty, 0.5), Vec3::ZERO);

    let single = MovementPath {
        keyframes: vec![Keyframe::new(0.0, Vec3::new(2.0, 0.0, 2.0))],
        ..empty.clone()
    };
    assert_eq!(position_at_time(&single, 3.0), Vec3::new(2.0, 0.0, 2.0));
    assert_eq!(sample_positions(&single, 4).len(), 4);
}

#[test]
fn duplicate_timestamps_hold_position() {
    let p = mk_path(&[
        (0.0, [0.0, 0.0, 0.0]),
        (1.0, [1.0, 0.0, 0.0]),
        (1.0, [5.0, 0.0, 0.0]),
        (2.0, [6.0, 0.0, 0.0]),
    ]);
    assert_eq!(position_at_time(&p, 1.0), Vec3::new(5.0, 0.0, 0.0));
    approx_vec(position_at_time(&p, 1.5), Vec3::new(5.5, 0.0, 0.0), 1e-5);
}

#[test]
fn offset_sampling_waits_then_rests() {
    let p = straight_ten();
    assert_eq!(position_at_time_with_offset(&p, 0.0, 3.0), Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(position_at_time_with_offset(&p, 8.0, 3.0), Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(position_at_time_with_offset(&p, 13.0, 3.0), Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(position_at_time_with_offset(&p, 99.0, 3.0), Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn easing_remaps_progress_not_geometry() {
    let p = straight_ten();
    let q = position_at_progress_with_easing(&p, 0.25, Easing::EaseInOutQuad.as_fn());
    approx(q.x, 1.25, 1e-5);
    let lin = position_at_progress_with_easing(&p, 0.25, Easing::Linear.as_fn());
    approx(lin.x, 2.5, 1e-5);
    let default_curve = position_at_progress_with_easing(&p, 0.25, Easing::default().as_fn());
    assert_eq!(default_curve, q);
}

#[test]
fn sample_positions_spacing() {
    let p = straight_ten();
    let s = sample_positions(&p, 5);
    let xs: Vec<f32> = s.iter().map(|v| v.x).collect();
    assert_eq!(xs, vec![0.0, 2.5, 5.0, 7.5, 10.0]);

    assert_eq!(sample_positions(&p, 1), vec![Vec3::ZERO]);
    assert_eq!(sample_positions(&p, 0), vec![Vec3::ZERO]);
}

#[test]
fn path_length_sums_straight_segments() {
    let p = mk_path(&[
        (0.0, [0.0, 0.0, 0.0]),
        (1.0, [3.0, 0.0, 4.0]),
        (2.0, [3.0, 0.0, 10.0]),
    ]);
    approx(path_length(&p), 11.0, 1e-5);
}

#[test]
fn velocity_on_constant_speed_path() {
    let p = straight_ten();
    let v = velocity_at_progress(&p, 0.3);
    approx_vec(v, Vec3::new(1.0, 0.0, 0.0), 1e-3);

    // at the very end a backward difference is used
    let v_end = velocity_at_progress(&p, 1.0);
    approx_vec(v_end, Vec3::new(1.0, 0.0, 0.0), 1e-3);
}

#[test]
fn velocity_zero_for_zero_duration() {
    let p = mk_path(&[(0.0, [0.0, 0.0, 0.0]), (0.0, [5.0, 0.0, 0.0])]);
    assert_eq!(velocity_at_progress(&p, 0.5), Vec3::ZERO);
}

#[test]
fn velocity_delta_from_config() {
    let p = straight_ten();
    let v = velocity_at_progress_with(&p, 0.5, &Config::default());
    approx_vec(v, velocity_at_progress(&p, 0.5), 1e-6);

    let no_step = Config {
        velocity_delta: 0.0,
        ..Config::default()
    };
    assert_eq!(velocity_at_progress_with(&p, 0.5, &no_step), Vec3::ZERO);
    assert_eq!(velocity_at_progress_with_delta(&p, 0.5, 0.0), Vec3::ZERO);
}
