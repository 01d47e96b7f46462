use bevy::prelude::*;

use crate::events::{ClockStopped, ClockTicked};
use crate::resources::wall_clock::WallClockSource;
use crate::systems::clock_hands::show_clock_hands_system;
use crate::systems::clock_tick::{
    attach_clock_system, clock_fixed_step_system, clock_realtime_system, detach_clock_system,
};

/// Plugin that runs every `AnalogClock` in the world.
///
/// - Smooth clocks tick on `FixedUpdate`.
/// - Stepped clocks tick on `Update` after their real-time delay.
/// - Hands are turned every frame after the tick.
pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WallClockSource>()
            .add_event::<ClockTicked>()
            .add_event::<ClockStopped>()
            .add_systems(PreUpdate, attach_clock_system)
            .add_systems(FixedUpdate, clock_fixed_step_system)
            .add_systems(
                Update,
                (
                    clock_realtime_system,
                    show_clock_hands_system.after(clock_realtime_system),
                    detach_clock_system,
                ),
            );
    }
}
