//! Position-hold cycle: poll → read → compare → command → sleep.
//!
//! ## RT Setup Sequence
//! 1. `mlockall(MCL_CURRENT | MCL_FUTURE)` - lock all pages.
//! 2. Prefault stack pages.
//! 3. `sched_setaffinity` - pin to the configured CPU core.
//! 4. `sched_setscheduler(SCHED_FIFO, prio)` - RT priority.
//!
//! All four are no-ops without the `rt` feature.
//!
//! ## Cycle Loop
//! Absolute deadlines (`wake += period`) for drift-free pacing. An overrun is
//! counted and logged, and the schedule restarts from "now" instead of
//! bursting to catch up.
//!
//! ## Zero Reference
//! Every physical axis remembers the angle it had at the end of the settle
//! interval. Targets are relative to that angle:
//! `error = target(group) - (position - reference)`.

use gantry_common::consts::MAX_AXES;
use gantry_common::hal::config::DriverConfig;
use gantry_common::hal::driver::MotorDriver;
use gantry_common::motion::axis::AxisGroup;
use gantry_common::motion::config::ControlConfig;
use gantry_common::motion::target::TargetStore;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::control::law::AxisLaw;
use crate::error::CycleError;
use crate::state::{LoopEvent, LoopState};

/// Stack size of the control thread (room for the 1 MB prefault).
const CONTROL_STACK_SIZE: usize = 4 * 1024 * 1024;

/// Name of the control thread.
const CONTROL_THREAD_NAME: &str = "gantry-control";

/// First 10 occurrences, then every 1000th.
#[inline]
fn should_log(count: u64) -> bool {
    count <= 10 || count % 1000 == 0
}

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-cycle timing statistics.
#[derive(Debug, Clone)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Last cycle duration [ns].
    pub last_cycle_ns: i64,
    /// Minimum cycle duration [ns].
    pub min_cycle_ns: i64,
    /// Maximum cycle duration [ns].
    pub max_cycle_ns: i64,
    /// Running sum for average computation.
    pub sum_cycle_ns: i64,
    /// Number of missed deadlines.
    pub overruns: u64,
    /// Maximum wake-up latency [ns] (time between expected and actual wake).
    pub max_latency_ns: i64,
}

impl CycleStats {
    /// Create a new zeroed stats instance.
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: i64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
            max_latency_ns: 0,
        }
    }

    /// Record a cycle duration. O(1), no allocation.
    #[inline]
    pub fn record(&mut self, duration_ns: i64, latency_ns: i64) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns = self.sum_cycle_ns.saturating_add(duration_ns);
        self.max_latency_ns = self.max_latency_ns.max(latency_ns);
    }

    /// Average cycle time [ns] (returns 0 if no cycles).
    #[inline]
    pub fn avg_cycle_ns(&self) -> i64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_ns / self.cycle_count as i64
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Driver faults seen while holding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultCounters {
    /// Failed `poll()` calls.
    pub poll_failures: u64,
    /// Failed position reads (axis skipped for that tick).
    pub read_failures: u64,
    /// Failed velocity writes (not retried).
    pub write_failures: u64,
}

// ─── RT Setup ───────────────────────────────────────────────────────

/// Lock all current and future memory pages (prevent page faults in RT loop).
#[cfg(feature = "rt")]
fn rt_mlockall() -> Result<(), CycleError> {
    use nix::sys::mman::{MlockallFlags, mlockall};
    mlockall(MlockallFlags::MCL_CURRENT | MlockallFlags::MCL_FUTURE)
        .map_err(|e| CycleError::RtSetup(format!("mlockall failed: {e}")))?;
    Ok(())
}

#[cfg(not(feature = "rt"))]
fn rt_mlockall() -> Result<(), CycleError> {
    Ok(())
}

/// Touch 1 MB of stack so the pages exist before the first tick.
fn prefault_stack() {
    let mut buf = [0u8; 1024 * 1024];
    for byte in buf.iter_mut() {
        unsafe { core::ptr::write_volatile(byte, 0xFF) };
    }
    core::hint::black_box(&buf);
}

/// Pin the current thread to a specific CPU core.
#[cfg(feature = "rt")]
fn rt_set_affinity(cpu: usize) -> Result<(), CycleError> {
    use nix::sched::{CpuSet, sched_setaffinity};
    use nix::unistd::Pid;

    let mut cpuset = CpuSet::new();
    cpuset
        .set(cpu)
        .map_err(|e| CycleError::RtSetup(format!("CpuSet::set({cpu}) failed: {e}")))?;
    sched_setaffinity(Pid::from_raw(0), &cpuset)
        .map_err(|e| CycleError::RtSetup(format!("sched_setaffinity failed: {e}")))?;
    Ok(())
}

#[cfg(not(feature = "rt"))]
fn rt_set_affinity(_cpu: usize) -> Result<(), CycleError> {
    Ok(())
}

/// Set SCHED_FIFO with the given RT priority.
#[cfg(feature = "rt")]
fn rt_set_scheduler(priority: i32) -> Result<(), CycleError> {
    let param = libc::sched_param {
        sched_priority: priority,
    };
    let ret = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) };
    if ret != 0 {
        let err = std::io::Error::last_os_error();
        return Err(CycleError::RtSetup(format!(
            "sched_setscheduler(SCHED_FIFO, {priority}) failed: {err}"
        )));
    }
    Ok(())
}

#[cfg(not(feature = "rt"))]
fn rt_set_scheduler(_priority: i32) -> Result<(), CycleError> {
    Ok(())
}

/// Perform the RT setup sequence on the calling thread.
///
/// Without the `rt` feature only the stack prefault runs.
pub fn rt_setup(cpu_core: usize, rt_priority: i32) -> Result<(), CycleError> {
    rt_mlockall()?;
    prefault_stack();
    rt_set_affinity(cpu_core)?;
    rt_set_scheduler(rt_priority)?;
    Ok(())
}

// ─── Control Loop ───────────────────────────────────────────────────

/// One physical motor bound to a logical group.
#[derive(Debug, Clone)]
struct AxisBinding {
    name: String,
    channel: u8,
    group: AxisGroup,
    /// Angle captured at the end of stabilization [rad].
    reference: f64,
}

/// Result of one axis for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOutput {
    /// Index into the configured axis list.
    pub index: usize,
    /// Driver channel.
    pub channel: u8,
    /// Group the axis follows.
    pub group: AxisGroup,
    /// Position relative to the zero reference [rad].
    pub position: f64,
    /// Group target [rad].
    pub target: f64,
    /// Raw position error before the dead-band [rad].
    pub error: f64,
    /// Commanded velocity [rad/s].
    pub velocity: f64,
    /// Whether the driver accepted the velocity command.
    pub written: bool,
}

/// Everything one tick computed. Axes whose position read failed are absent.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u64,
    /// Per-axis results in configuration order.
    pub outputs: heapless::Vec<AxisOutput, MAX_AXES>,
}

impl TickReport {
    /// Output for a driver channel, if it was computed this tick.
    pub fn output(&self, channel: u8) -> Option<&AxisOutput> {
        self.outputs.iter().find(|o| o.channel == channel)
    }
}

/// The position-hold loop.
///
/// Owns the motor driver. Reads targets from the shared store each tick and
/// never writes them, except for the reset at the end of stabilization.
pub struct ControlLoop {
    driver: Box<dyn MotorDriver>,
    axes: heapless::Vec<AxisBinding, MAX_AXES>,
    x_law: AxisLaw,
    y_law: AxisLaw,
    targets: Arc<TargetStore>,
    state: LoopState,
    cycle_time: Duration,
    settle_time: Duration,
    status_interval: u64,
    cpu_core: usize,
    rt_priority: i32,
    tick_count: u64,
    stats: CycleStats,
    faults: FaultCounters,
}

impl ControlLoop {
    /// Create a loop over the axes of `driver_config`.
    ///
    /// `driver` must already be brought up (configured and connected).
    ///
    /// # Errors
    /// `CycleError::Config` if the control section is invalid or the axis
    /// list is empty or longer than `MAX_AXES`.
    pub fn new(
        driver: Box<dyn MotorDriver>,
        driver_config: &DriverConfig,
        control: &ControlConfig,
        targets: Arc<TargetStore>,
    ) -> Result<Self, CycleError> {
        control.validate()?;

        if driver_config.axes.is_empty() {
            return Err(CycleError::Config("no axes configured".to_string()));
        }

        let mut axes = heapless::Vec::new();
        for axis in &driver_config.axes {
            let binding = AxisBinding {
                name: axis.name.clone(),
                channel: axis.channel,
                group: axis.group,
                reference: 0.0,
            };
            if axes.push(binding).is_err() {
                return Err(CycleError::Config(format!(
                    "too many axes: {} (max {MAX_AXES})",
                    driver_config.axes.len()
                )));
            }
        }

        Ok(Self {
            driver,
            axes,
            x_law: control.gains(AxisGroup::X).into(),
            y_law: control.gains(AxisGroup::Y).into(),
            targets,
            state: LoopState::Uninitialized,
            cycle_time: control.cycle_time(),
            settle_time: control.settle_time(),
            status_interval: control.status_interval,
            cpu_core: control.cpu_core,
            rt_priority: control.rt_priority,
            tick_count: 0,
            stats: CycleStats::new(),
            faults: FaultCounters::default(),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Timing statistics of the paced loop.
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Driver faults seen while holding.
    pub fn faults(&self) -> FaultCounters {
        self.faults
    }

    /// Zero reference of a channel [rad].
    pub fn reference(&self, channel: u8) -> Option<f64> {
        self.axes
            .iter()
            .find(|a| a.channel == channel)
            .map(|a| a.reference)
    }

    /// Shared target store.
    pub fn targets(&self) -> &Arc<TargetStore> {
        &self.targets
    }

    /// Law applied to a group.
    pub fn law(&self, group: AxisGroup) -> AxisLaw {
        match group {
            AxisGroup::X => self.x_law,
            AxisGroup::Y => self.y_law,
        }
    }

    fn transition(&mut self, event: LoopEvent, operation: &'static str) -> Result<(), CycleError> {
        match self.state.handle_event(event) {
            Some(next) => {
                debug!(from = ?self.state, to = ?next, "Control loop state change");
                self.state = next;
                Ok(())
            }
            None => Err(CycleError::InvalidState {
                operation,
                state: self.state,
            }),
        }
    }

    fn require_holding(&self, operation: &'static str) -> Result<(), CycleError> {
        if self.state.is_holding() {
            Ok(())
        } else {
            Err(CycleError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    /// Zero every motor, wait the settle interval and capture the reference.
    ///
    /// On success targets are reset so the stage holds where it settled.
    ///
    /// # Errors
    /// Any driver failure is fatal: `CycleError::Stabilization`.
    pub fn stabilize(&mut self) -> Result<(), CycleError> {
        self.transition(LoopEvent::BeginStabilize, "stabilize")?;
        info!(
            "Stabilizing {} axes for {} ms",
            self.axes.len(),
            self.settle_time.as_millis()
        );

        for axis in &self.axes {
            self.driver
                .set_velocity(axis.channel, 0.0)
                .map_err(|source| CycleError::Stabilization {
                    stage: format!("zero velocity {}", axis.name),
                    source,
                })?;
        }

        thread::sleep(self.settle_time);
        self.driver
            .poll(self.settle_time)
            .map_err(|source| CycleError::Stabilization {
                stage: "driver poll".to_string(),
                source,
            })?;

        for axis in self.axes.iter_mut() {
            axis.reference =
                self.driver
                    .position(axis.channel)
                    .map_err(|source| CycleError::Stabilization {
                        stage: format!("read reference {}", axis.name),
                        source,
                    })?;
            info!(
                "  Axis {} reference {:.4} rad",
                axis.name, axis.reference
            );
        }

        self.targets.reset();
        self.transition(LoopEvent::ReferenceCaptured, "stabilize")?;
        info!("Zero reference captured, holding position");
        Ok(())
    }

    /// Run one control step with `dt` elapsed since the previous one.
    ///
    /// Driver faults are logged and counted, never returned.
    ///
    /// # Errors
    /// `CycleError::InvalidState` unless holding.
    pub fn tick(&mut self, dt: Duration) -> Result<TickReport, CycleError> {
        self.require_holding("tick")?;

        if let Err(e) = self.driver.poll(dt) {
            self.faults.poll_failures += 1;
            if should_log(self.faults.poll_failures) {
                warn!(
                    "Driver poll failed: {} (total: {})",
                    e, self.faults.poll_failures
                );
            }
        }

        let targets = self.targets.snapshot();
        let mut outputs = heapless::Vec::new();

        for (index, axis) in self.axes.iter().enumerate() {
            let position = match self.driver.position(axis.channel) {
                Ok(p) => p - axis.reference,
                Err(e) => {
                    self.faults.read_failures += 1;
                    if should_log(self.faults.read_failures) {
                        warn!(
                            "Position read failed on {}: {} (total: {})",
                            axis.name, e, self.faults.read_failures
                        );
                    }
                    continue;
                }
            };

            let target = targets.get(axis.group);
            let error = target - position;
            let law = match axis.group {
                AxisGroup::X => self.x_law,
                AxisGroup::Y => self.y_law,
            };
            let velocity = law.velocity(error);

            let written = match self.driver.set_velocity(axis.channel, velocity) {
                Ok(()) => true,
                Err(e) => {
                    self.faults.write_failures += 1;
                    if should_log(self.faults.write_failures) {
                        warn!(
                            "Velocity write failed on {}: {} (total: {})",
                            axis.name, e, self.faults.write_failures
                        );
                    }
                    false
                }
            };

            // Capacity equals the axis list capacity.
            let _ = outputs.push(AxisOutput {
                index,
                channel: axis.channel,
                group: axis.group,
                position,
                target,
                error,
                velocity,
                written,
            });
        }

        self.tick_count += 1;
        if self.tick_count % self.status_interval == 0 {
            self.log_status(&outputs);
        }

        Ok(TickReport {
            tick: self.tick_count,
            outputs,
        })
    }

    fn log_status(&self, outputs: &[AxisOutput]) {
        let lead = self.targets.lead_screw();
        for o in outputs {
            debug!(
                tick = self.tick_count,
                axis = %self.axes[o.index].name,
                position_mm = lead.radians_to_mm(o.position),
                target_mm = lead.radians_to_mm(o.target),
                error = o.error,
                velocity = o.velocity,
                "Status"
            );
        }
    }

    fn record_overrun(&mut self, duration_ns: i64) {
        self.stats.overruns += 1;
        if should_log(self.stats.overruns) {
            warn!(
                "Cycle overrun: {} ns > {} ns budget (total: {})",
                duration_ns,
                self.cycle_time.as_nanos(),
                self.stats.overruns
            );
        }
    }

    /// Enter the paced loop. Returns only on error.
    pub fn run(&mut self) -> Result<(), CycleError> {
        self.require_holding("run")?;

        #[cfg(feature = "rt")]
        {
            self.run_rt_loop()
        }

        #[cfg(not(feature = "rt"))]
        {
            self.run_sim_loop()
        }
    }

    /// Move the loop onto its own named thread, after RT setup there.
    ///
    /// # Errors
    /// `InvalidState` unless holding, `Spawn` if the OS refuses the thread.
    pub fn spawn(mut self) -> Result<JoinHandle<Result<(), CycleError>>, CycleError> {
        self.require_holding("spawn")?;
        let (cpu_core, rt_priority) = (self.cpu_core, self.rt_priority);

        thread::Builder::new()
            .name(CONTROL_THREAD_NAME.to_string())
            .stack_size(CONTROL_STACK_SIZE)
            .spawn(move || {
                rt_setup(cpu_core, rt_priority)?;
                info!(
                    "Control loop running at {} ms",
                    self.cycle_time.as_millis()
                );
                self.run()
            })
            .map_err(|e| CycleError::Spawn(e.to_string()))
    }

    /// Loop paced by `clock_nanosleep(TIMER_ABSTIME)`.
    #[cfg(feature = "rt")]
    fn run_rt_loop(&mut self) -> Result<(), CycleError> {
        use nix::time::{ClockId, ClockNanosleepFlags, clock_gettime, clock_nanosleep};

        let clock = ClockId::CLOCK_MONOTONIC;
        let now = || {
            clock_gettime(clock).map_err(|e| CycleError::RtSetup(format!("clock_gettime: {e}")))
        };
        let period_ns = self.cycle_time.as_nanos() as i64;

        let mut wake = now()?;
        let mut last_start = None;

        loop {
            let cycle_start = now()?;
            let latency_ns = timespec_diff_ns(&cycle_start, &wake).max(0);
            let dt = match last_start {
                Some(prev) => Duration::from_nanos(timespec_diff_ns(&cycle_start, &prev).max(0) as u64),
                None => self.cycle_time,
            };
            last_start = Some(cycle_start);

            self.tick(dt)?;

            let cycle_end = now()?;
            let duration_ns = timespec_diff_ns(&cycle_end, &cycle_start);
            self.stats.record(duration_ns, latency_ns);

            wake = timespec_add_ns(wake, period_ns);
            if timespec_diff_ns(&cycle_end, &wake) >= 0 {
                self.record_overrun(duration_ns);
                wake = cycle_end;
            } else {
                let _ = clock_nanosleep(clock, ClockNanosleepFlags::TIMER_ABSTIME, &wake);
            }
        }
    }

    /// Loop paced by `std::thread::sleep` against absolute deadlines.
    #[cfg(not(feature = "rt"))]
    fn run_sim_loop(&mut self) -> Result<(), CycleError> {
        use std::time::Instant;

        let period = self.cycle_time;
        let mut wake = Instant::now();
        let mut last_start: Option<Instant> = None;

        loop {
            let cycle_start = Instant::now();
            let latency_ns = cycle_start.saturating_duration_since(wake).as_nanos() as i64;
            let dt = last_start.map_or(period, |prev| cycle_start.duration_since(prev));
            last_start = Some(cycle_start);

            self.tick(dt)?;

            let duration_ns = cycle_start.elapsed().as_nanos() as i64;
            self.stats.record(duration_ns, latency_ns);

            wake += period;
            let now = Instant::now();
            match wake.checked_duration_since(now) {
                Some(remaining) => thread::sleep(remaining),
                None => {
                    self.record_overrun(duration_ns);
                    wake = now;
                }
            }
        }
    }
}

// ─── Time Helpers ───────────────────────────────────────────────────

/// Add nanoseconds to a TimeSpec.
#[cfg(feature = "rt")]
fn timespec_add_ns(ts: nix::sys::time::TimeSpec, ns: i64) -> nix::sys::time::TimeSpec {
    use nix::sys::time::TimeSpec;
    let mut secs = ts.tv_sec();
    let mut nanos = ts.tv_nsec() + ns;
    while nanos >= 1_000_000_000 {
        secs += 1;
        nanos -= 1_000_000_000;
    }
    while nanos < 0 {
        secs -= 1;
        nanos += 1_000_000_000;
    }
    TimeSpec::new(secs, nanos)
}

/// Compute the difference (a - b) in nanoseconds.
#[cfg(feature = "rt")]
fn timespec_diff_ns(a: &nix::sys::time::TimeSpec, b: &nix::sys::time::TimeSpec) -> i64 {
    (a.tv_sec() - b.tv_sec()) * 1_000_000_000 + (a.tv_nsec() - b.tv_nsec())
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_common::hal::config::VelocityGains;
    use gantry_common::hal::driver::HalError;
    use gantry_common::motion::units::LeadScrew;

    /// Driver with fixed positions that records the last command per channel.
    struct StaticDriver {
        positions: [f64; 4],
        commands: [f64; 4],
    }

    impl MotorDriver for StaticDriver {
        fn name(&self) -> &'static str {
            "static"
        }
        fn version(&self) -> &'static str {
            "0"
        }
        fn configure(&mut self, _config: &DriverConfig) -> Result<(), HalError> {
            Ok(())
        }
        fn connect(&mut self) -> Result<(), HalError> {
            Ok(())
        }
        fn set_velocity_gains(&mut self, _channel: u8, _gains: &VelocityGains) -> Result<(), HalError> {
            Ok(())
        }
        fn position(&self, channel: u8) -> Result<f64, HalError> {
            self.positions
                .get(channel as usize)
                .copied()
                .ok_or(HalError::InvalidChannel(channel))
        }
        fn set_velocity(&mut self, channel: u8, velocity: f64) -> Result<(), HalError> {
            let slot = self
                .commands
                .get_mut(channel as usize)
                .ok_or(HalError::InvalidChannel(channel))?;
            *slot = velocity;
            Ok(())
        }
    }

    fn control() -> ControlConfig {
        ControlConfig {
            settle_time_ms: 0,
            ..Default::default()
        }
    }

    fn make_loop(positions: [f64; 4]) -> ControlLoop {
        let driver = Box::new(StaticDriver {
            positions,
            commands: [0.0; 4],
        });
        let targets = Arc::new(TargetStore::new(LeadScrew::new(8.0).unwrap()));
        ControlLoop::new(driver, &DriverConfig::default(), &control(), targets).unwrap()
    }

    #[test]
    fn cycle_stats_basic() {
        let mut stats = CycleStats::new();
        assert_eq!(stats.cycle_count, 0);
        assert_eq!(stats.avg_cycle_ns(), 0);

        stats.record(500_000, 1_000);
        assert_eq!(stats.cycle_count, 1);
        assert_eq!(stats.last_cycle_ns, 500_000);
        assert_eq!(stats.min_cycle_ns, 500_000);
        assert_eq!(stats.max_cycle_ns, 500_000);
        assert_eq!(stats.max_latency_ns, 1_000);

        stats.record(600_000, 500);
        assert_eq!(stats.cycle_count, 2);
        assert_eq!(stats.min_cycle_ns, 500_000);
        assert_eq!(stats.max_cycle_ns, 600_000);
        assert_eq!(stats.max_latency_ns, 1_000);
        assert_eq!(stats.avg_cycle_ns(), 550_000);
    }

    #[test]
    fn rate_limit_pattern() {
        assert!(should_log(1));
        assert!(should_log(10));
        assert!(!should_log(11));
        assert!(!should_log(999));
        assert!(should_log(1000));
        assert!(should_log(2000));
    }

    #[test]
    fn rt_setup_no_rt_feature_is_noop() {
        #[cfg(not(feature = "rt"))]
        {
            assert!(rt_setup(0, 80).is_ok());
        }
    }

    #[test]
    fn tick_before_stabilize_rejected() {
        let mut cl = make_loop([0.0; 4]);
        assert!(matches!(
            cl.tick(Duration::from_millis(10)),
            Err(CycleError::InvalidState {
                operation: "tick",
                state: LoopState::Uninitialized
            })
        ));
    }

    #[test]
    fn stabilize_twice_rejected() {
        let mut cl = make_loop([0.0; 4]);
        cl.stabilize().unwrap();
        assert!(matches!(
            cl.stabilize(),
            Err(CycleError::InvalidState { .. })
        ));
    }

    #[test]
    fn reference_makes_startup_motionless() {
        let mut cl = make_loop([0.0, 3.0, -2.0, 7.5]);
        cl.stabilize().unwrap();
        assert_eq!(cl.reference(1), Some(3.0));
        assert_eq!(cl.reference(3), Some(7.5));

        let report = cl.tick(Duration::from_millis(10)).unwrap();
        assert_eq!(report.tick, 1);
        assert_eq!(report.outputs.len(), 3);
        for o in &report.outputs {
            assert_eq!(o.position, 0.0);
            assert_eq!(o.error, 0.0);
            assert_eq!(o.velocity, 0.0);
            assert!(o.written);
        }
    }

    #[test]
    fn too_many_axes_rejected() {
        let mut config = DriverConfig::default();
        config.axes = (0..=MAX_AXES as u8)
            .map(|ch| {
                let mut a = config.axes[0].clone();
                a.channel = ch;
                a.name = format!("m{ch}");
                a
            })
            .collect();
        let driver = Box::new(StaticDriver {
            positions: [0.0; 4],
            commands: [0.0; 4],
        });
        let targets = Arc::new(TargetStore::new(LeadScrew::new(8.0).unwrap()));
        assert!(matches!(
            ControlLoop::new(driver, &config, &control(), targets),
            Err(CycleError::Config(_))
        ));
    }
}
