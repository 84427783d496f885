//! Closed-loop convergence on the simulation driver.
//!
//! With the default Kp = 5 and a 50 ms motor time constant the loop is
//! critically damped; the carriage must end inside (or just past) the
//! dead-band without oscillating.

use super::common::{fast_control, store};
use gantry_common::hal::config::DriverConfig;
use gantry_common::motion::target::TargetStore;
use gantry_control::{ControlLoop, FaultCounters};
use gantry_hal::{DriverRegistry, bring_up, register_all_drivers};
use std::sync::Arc;
use std::time::Duration;

const DT: Duration = Duration::from_millis(10);

fn simulated_loop() -> (ControlLoop, Arc<TargetStore>) {
    let config = DriverConfig::default();
    let mut registry = DriverRegistry::new();
    register_all_drivers(&mut registry);
    let mut driver = registry.create_driver(&config.name).unwrap();
    bring_up(driver.as_mut(), &config).unwrap();

    let targets = store();
    let mut cl =
        ControlLoop::new(driver, &config, &fast_control(), Arc::clone(&targets)).unwrap();
    cl.stabilize().unwrap();
    (cl, targets)
}

#[test]
fn step_to_target_converges() {
    let (mut cl, targets) = simulated_loop();
    targets.set_targets(50.0, 25.0).unwrap();

    for _ in 0..1000 {
        cl.tick(DT).unwrap();
    }
    let report = cl.tick(DT).unwrap();

    let snap = targets.snapshot();
    for o in &report.outputs {
        let tolerance = cl.law(o.group).deadband + 0.2;
        assert!(
            (o.position - snap.get(o.group)).abs() < tolerance,
            "channel {} at {} rad, target {}",
            o.channel,
            o.position,
            snap.get(o.group)
        );
        assert_eq!(o.velocity, 0.0);
    }
}

#[test]
fn retarget_mid_motion_follows_latest_value() {
    let (mut cl, targets) = simulated_loop();
    targets.set_targets(80.0, 0.0).unwrap();
    for _ in 0..30 {
        cl.tick(DT).unwrap();
    }
    targets.set_targets(-10.0, 5.0).unwrap();

    let mut last = None;
    for _ in 0..1500 {
        last = Some(cl.tick(DT).unwrap());
    }

    let lead = *targets.lead_screw();
    let report = last.unwrap();
    for o in &report.outputs {
        let position_mm = lead.radians_to_mm(o.position);
        let target_mm = lead.radians_to_mm(o.target);
        assert!(
            (position_mm - target_mm).abs() < 1.0,
            "channel {} at {position_mm} mm, target {target_mm} mm",
            o.channel
        );
    }
    assert_eq!(cl.faults(), FaultCounters::default());
}
