use bevy::prelude::*;
use chrono::TimeDelta;

/// Event emitted each time a clock's tick loop advances its time.
#[derive(Event, Debug)]
pub struct ClockTicked {
    /// The clock entity that ticked.
    pub clock: Entity,
    /// The clock's time after the tick.
    pub current_time: TimeDelta,
}

/// Event emitted when a clock's tick loop ends after its power was switched off.
#[derive(Event, Debug)]
pub struct ClockStopped {
    pub clock: Entity,
}
