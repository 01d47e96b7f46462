use bevy::prelude::*;
use chrono::{Local, NaiveTime, TimeDelta};

/// Source of the host's current local time-of-day.
///
/// Clocks with `use_system_time` read this once per tick.
pub trait WallClock: Send + Sync + 'static {
    /// Time elapsed since local midnight.
    fn time_of_day(&self) -> TimeDelta;
}

/// Reads the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn time_of_day(&self) -> TimeDelta {
        Local::now().time().signed_duration_since(NaiveTime::MIN)
    }
}

/// Always reports the same time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWallClock(pub TimeDelta);

impl WallClock for FixedWallClock {
    fn time_of_day(&self) -> TimeDelta {
        self.0
    }
}

/// The wall clock used by the tick systems.
/// Defaults to [`SystemWallClock`]; insert a different one before adding
/// `ClockPlugin` to override it.
#[derive(Resource)]
pub struct WallClockSource(Box<dyn WallClock>);

impl WallClockSource {
    pub fn new(clock: impl WallClock) -> Self {
        Self(Box::new(clock))
    }

    pub fn get(&self) -> &dyn WallClock {
        self.0.as_ref()
    }
}

impl Default for WallClockSource {
    fn default() -> Self {
        Self::new(SystemWallClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_wall_clock_is_within_one_day() {
        let now = SystemWallClock.time_of_day();
        assert!(now >= TimeDelta::zero());
        // Leap seconds can push chrono's nanosecond field past one second.
        assert!(now < TimeDelta::days(1) + TimeDelta::seconds(1));
    }

    #[test]
    fn test_source_serves_injected_clock() {
        let source = WallClockSource::new(FixedWallClock(TimeDelta::hours(9)));
        assert_eq!(source.get().time_of_day(), TimeDelta::hours(9));
    }
}
