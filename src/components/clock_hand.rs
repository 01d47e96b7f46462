use bevy::prelude::*;

/// Marks a child of an `AnalogClock` entity as one of its hands.
/// The hand's Z rotation is driven by the clock; X and Y are left alone.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockHand {
    Second,
    Minute,
    Hour,
}

impl ClockHand {
    pub const ALL: [ClockHand; 3] = [ClockHand::Hour, ClockHand::Minute, ClockHand::Second];

    /// Hand length relative to the dial radius.
    pub fn length_ratio(self) -> f32 {
        match self {
            ClockHand::Second => 0.9,
            ClockHand::Minute => 0.8,
            ClockHand::Hour => 0.55,
        }
    }

    /// Hand width in world units.
    pub fn width(self) -> f32 {
        match self {
            ClockHand::Second => 2.0,
            ClockHand::Minute => 6.0,
            ClockHand::Hour => 10.0,
        }
    }
}
