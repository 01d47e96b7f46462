use bevy::prelude::*;

use crate::components::analog_clock::{AnalogClock, LoopStatus};
use crate::events::{ClockStopped, ClockTicked};
use crate::resources::wall_clock::WallClockSource;
use crate::utils::time_input::format_time_of_day;

/// System that prepares newly attached clocks.
///
/// Captures the fixed step length once and powers on clocks configured to
/// start on attach. Runs in PreUpdate so the first fixed step of the frame
/// already sees the powered clock.
pub fn attach_clock_system(
    fixed_time: Res<Time<Fixed>>,
    mut query: Query<(Entity, &mut AnalogClock), Added<AnalogClock>>,
) {
    for (entity, mut clock) in &mut query {
        clock.set_fixed_step(fixed_time.timestep());
        if clock.start_on_enable() {
            clock.set_power(true);
        }
        info!(
            "Clock {:?} attached at {} (power: {})",
            entity,
            format_time_of_day(clock.current_time()),
            clock.power()
        );
    }
}

/// System that logs clocks whose entity or component went away.
/// Their tick loop is dropped with the component.
pub fn detach_clock_system(mut removed: RemovedComponents<AnalogClock>) {
    for entity in removed.read() {
        info!("Clock {:?} detached", entity);
    }
}

/// System that wakes clocks waiting on the fixed-step heartbeat.
pub fn clock_fixed_step_system(
    wall_clock: Res<WallClockSource>,
    mut query: Query<(Entity, &mut AnalogClock)>,
    mut ticked: EventWriter<ClockTicked>,
    mut stopped: EventWriter<ClockStopped>,
) {
    for (entity, mut clock) in &mut query {
        let status = clock.poll_fixed_step(wall_clock.get());
        report_status(entity, &clock, status, &mut ticked, &mut stopped);
    }
}

/// System that feeds real (unscaled) frame time to clocks waiting on a delay.
pub fn clock_realtime_system(
    real_time: Res<Time<Real>>,
    wall_clock: Res<WallClockSource>,
    mut query: Query<(Entity, &mut AnalogClock)>,
    mut ticked: EventWriter<ClockTicked>,
    mut stopped: EventWriter<ClockStopped>,
) {
    let delta = real_time.delta();
    for (entity, mut clock) in &mut query {
        let status = clock.poll_realtime(delta, wall_clock.get());
        report_status(entity, &clock, status, &mut ticked, &mut stopped);
    }
}

fn report_status(
    entity: Entity,
    clock: &AnalogClock,
    status: LoopStatus,
    ticked: &mut EventWriter<ClockTicked>,
    stopped: &mut EventWriter<ClockStopped>,
) {
    match status {
        LoopStatus::Ticked => {
            ticked.send(ClockTicked {
                clock: entity,
                current_time: clock.current_time(),
            });
        }
        LoopStatus::Stopped => {
            info!("Clock {:?} stopped", entity);
            stopped.send(ClockStopped { clock: entity });
        }
        LoopStatus::Idle | LoopStatus::Waiting => {}
    }
}
