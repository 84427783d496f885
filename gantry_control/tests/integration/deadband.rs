//! Dead-band and proportional law through the full tick.

use super::common::{fast_control, recording_loop};
use gantry_common::motion::axis::AxisGroup;
use gantry_common::motion::config::GroupGains;
use std::time::Duration;

const DT: Duration = Duration::from_millis(10);

#[test]
fn error_inside_band_commands_zero() {
    let (mut cl, bench, targets) = recording_loop(&fast_control());
    cl.stabilize().unwrap();

    // 0.3 rad of target ahead of a stationary carriage.
    let lead = *targets.lead_screw();
    targets.set_target(AxisGroup::X, lead.radians_to_mm(0.3)).unwrap();

    let report = cl.tick(DT).unwrap();
    let x1 = report.output(1).unwrap();
    assert!((x1.error - 0.3).abs() < 1e-12);
    assert_eq!(x1.velocity, 0.0);

    let commands = bench.lock().commands.clone();
    assert!(commands.iter().rev().take(3).all(|&(_, v)| v == 0.0));
}

#[test]
fn error_outside_band_is_proportional() {
    let (mut cl, _bench, targets) = recording_loop(&fast_control());
    cl.stabilize().unwrap();

    let lead = *targets.lead_screw();
    targets.set_target(AxisGroup::X, lead.radians_to_mm(1.0)).unwrap();

    let report = cl.tick(DT).unwrap();
    for channel in [1, 2] {
        let o = report.output(channel).unwrap();
        assert!((o.velocity - 5.0).abs() < 1e-9, "channel {channel}: {}", o.velocity);
    }
    assert_eq!(report.output(3).unwrap().velocity, 0.0);
}

#[test]
fn error_at_threshold_is_outside_band() {
    let mut control = fast_control();
    control.y = GroupGains {
        kp: 10.0,
        deadband: 0.25,
    };
    let (mut cl, bench, _targets) = recording_loop(&control);
    cl.stabilize().unwrap();

    // Carriage 0.25 rad behind target: position -0.25 relative to reference.
    bench.lock().positions.insert(3, -0.25);
    let report = cl.tick(DT).unwrap();
    let y = report.output(3).unwrap();
    assert_eq!(y.error, 0.25);
    assert_eq!(y.velocity, 2.5);
}

#[test]
fn both_primary_motors_follow_one_target() {
    let (mut cl, bench, targets) = recording_loop(&fast_control());
    {
        let mut b = bench.lock();
        b.positions.insert(1, 4.0);
        b.positions.insert(2, -1.0);
    }
    cl.stabilize().unwrap();

    // Only X1 moved since the reference was taken.
    bench.lock().positions.insert(1, 5.0);
    targets.set_targets(0.0, 0.0).unwrap();

    let report = cl.tick(DT).unwrap();
    assert_eq!(report.output(1).unwrap().velocity, -5.0);
    assert_eq!(report.output(2).unwrap().velocity, 0.0);
}
