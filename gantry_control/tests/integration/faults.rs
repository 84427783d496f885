//! Driver faults while holding and during stabilization.

use super::common::{fast_control, recording_loop};
use gantry_common::motion::axis::AxisGroup;
use gantry_control::{CycleError, LoopState};
use std::time::Duration;

const DT: Duration = Duration::from_millis(10);

#[test]
fn failed_write_is_counted_not_returned() {
    let (mut cl, bench, targets) = recording_loop(&fast_control());
    cl.stabilize().unwrap();
    bench.lock().fail_write = Some(2);
    targets.set_target(AxisGroup::X, 10.0).unwrap();

    for _ in 0..3 {
        let report = cl.tick(DT).unwrap();
        assert!(report.output(1).unwrap().written);
        assert!(!report.output(2).unwrap().written);
    }
    assert_eq!(cl.faults().write_failures, 3);

    // Recovered channel is commanded again on the next tick.
    bench.lock().fail_write = None;
    let report = cl.tick(DT).unwrap();
    assert!(report.output(2).unwrap().written);
}

#[test]
fn failed_read_skips_axis_for_tick() {
    let (mut cl, bench, _targets) = recording_loop(&fast_control());
    cl.stabilize().unwrap();
    bench.lock().commands.clear();
    bench.lock().fail_read = Some(3);

    let report = cl.tick(DT).unwrap();
    assert!(report.output(3).is_none());
    assert_eq!(report.outputs.len(), 2);
    assert_eq!(cl.faults().read_failures, 1);
    assert!(bench.lock().commands.iter().all(|&(ch, _)| ch != 3));
}

#[test]
fn stabilization_failure_is_fatal() {
    let (mut cl, bench, _targets) = recording_loop(&fast_control());
    bench.lock().fail_read = Some(2);

    let err = cl.stabilize().unwrap_err();
    assert!(matches!(err, CycleError::Stabilization { .. }));
    assert!(err.to_string().contains("X2"));
    assert_eq!(cl.state(), LoopState::Stabilizing);
    assert!(cl.tick(DT).is_err());
}

#[test]
fn stabilization_zeroes_every_motor_and_resets_targets() {
    let (mut cl, bench, targets) = recording_loop(&fast_control());
    targets.set_targets(30.0, 40.0).unwrap();

    cl.stabilize().unwrap();

    let commands = bench.lock().commands.clone();
    assert_eq!(commands, vec![(1, 0.0), (2, 0.0), (3, 0.0)]);
    assert_eq!(targets.snapshot_mm(), (0.0, 0.0));
    assert_eq!(cl.state(), LoopState::Holding);
}
