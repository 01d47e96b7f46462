//! Analog clock simulation.
//!
//! `AnalogClock` keeps a time-of-day value, advances it from a tick loop and
//! derives the angles of its three hands. The loop is plain state inside the
//! component; the systems in `systems::clock_tick` wake it either on every
//! `FixedUpdate` step or after a real-time delay.

use std::time::Duration;

use bevy::prelude::*;
use chrono::TimeDelta;

use crate::components::clock_hand::ClockHand;
use crate::resources::wall_clock::WallClock;

pub const FREQUENCY_MAX: f32 = 60.0;
pub const FREQUENCY_MIN: f32 = 0.1;

/// Fixed step assumed until the clock is attached to an app (Bevy's 64 Hz default).
pub const DEFAULT_FIXED_STEP: Duration = Duration::from_micros(15_625);

/// Degrees per second (and per minute) on the dial.
/// Negative so hands turn clockwise with Bevy's counter-clockwise Z rotation.
pub const DEGREES_PER_MINUTE_MARK: f32 = -6.0;
/// Degrees per hour on the dial.
pub const DEGREES_PER_HOUR: f32 = -30.0;

/// What the tick loop is waiting for before its next tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Wait {
    /// The next fixed simulation step.
    FixedStep,
    /// A real-time delay of `duration`, `elapsed` of which has passed.
    Realtime { elapsed: Duration, duration: Duration },
}

/// The clock's running advancement loop.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLoop {
    wait: Wait,
    ticks: u64,
}

impl TickLoop {
    fn new(wait: Wait) -> Self {
        Self { wait, ticks: 0 }
    }

    pub fn wait(&self) -> &Wait {
        &self.wait
    }

    /// Ticks performed since the loop started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Outcome of polling the tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// No loop is running.
    Idle,
    /// The loop is still waiting.
    Waiting,
    /// The loop woke up and advanced the time.
    Ticked,
    /// The loop woke up, found the power off and ended.
    Stopped,
}

/// Angles of the three hands in degrees. 0 points at 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub second: f32,
    pub minute: f32,
    pub hour: f32,
}

/// A clock face's simulated time.
#[derive(Component, Debug, Clone)]
pub struct AnalogClock {
    current_time: TimeDelta,
    seconds_per_tick: TimeDelta,
    tick_frequency: f32,
    power: bool,
    /// Mirror the host's local time instead of advancing. Makes
    /// `seconds_per_tick` and `tick_frequency` inert.
    use_system_time: bool,
    smooth_second_hand: bool,
    smooth_minute_hand: bool,
    smooth_hour_hand: bool,
    /// Switch the power on when the clock is attached.
    start_on_enable: bool,
    fixed_step: Duration,
    tick_loop: Option<TickLoop>,
}

impl Default for AnalogClock {
    fn default() -> Self {
        Self {
            current_time: TimeDelta::zero(),
            seconds_per_tick: TimeDelta::seconds(1),
            tick_frequency: 1.0,
            power: false,
            use_system_time: false,
            smooth_second_hand: false,
            smooth_minute_hand: false,
            smooth_hour_hand: false,
            start_on_enable: false,
            fixed_step: DEFAULT_FIXED_STEP,
            tick_loop: None,
        }
    }
}

impl AnalogClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_time(&self) -> TimeDelta {
        self.current_time
    }

    /// Sets the simulated time. A negative value is moved into the previous
    /// day by adding 24 hours; values below -24h are not supported.
    pub fn set_current_time(&mut self, time: TimeDelta) {
        self.current_time = if time < TimeDelta::zero() {
            time + TimeDelta::days(1)
        } else {
            time
        };
    }

    /// Simulated seconds added per tick.
    pub fn seconds_per_tick(&self) -> i32 {
        self.seconds_per_tick.num_seconds() as i32
    }

    pub fn set_seconds_per_tick(&mut self, seconds: i32) {
        self.seconds_per_tick = TimeDelta::seconds(i64::from(seconds));
    }

    /// Ticks per real-time second.
    pub fn tick_frequency(&self) -> f32 {
        self.tick_frequency
    }

    pub fn set_tick_frequency(&mut self, frequency: f32) {
        self.tick_frequency = if frequency.is_nan() {
            FREQUENCY_MIN
        } else {
            frequency.clamp(FREQUENCY_MIN, FREQUENCY_MAX)
        };
    }

    pub fn power(&self) -> bool {
        self.power
    }

    /// Starts or stops the clock.
    ///
    /// Switching on starts the tick loop. Switching off ends the loop the
    /// next time it wakes; switching back on before that keeps the same
    /// loop, so a clock never runs two loops.
    pub fn set_power(&mut self, power: bool) {
        let was_on = self.power;
        self.power = power;
        if !was_on && power && self.tick_loop.is_none() {
            self.tick_loop = Some(TickLoop::new(self.next_wait()));
        }
    }

    pub fn use_system_time(&self) -> bool {
        self.use_system_time
    }

    pub fn set_use_system_time(&mut self, use_system_time: bool) {
        self.use_system_time = use_system_time;
    }

    pub fn smooth_second_hand(&self) -> bool {
        self.smooth_second_hand
    }

    pub fn set_smooth_second_hand(&mut self, smooth: bool) {
        self.smooth_second_hand = smooth;
    }

    pub fn smooth_minute_hand(&self) -> bool {
        self.smooth_minute_hand
    }

    pub fn set_smooth_minute_hand(&mut self, smooth: bool) {
        self.smooth_minute_hand = smooth;
    }

    pub fn smooth_hour_hand(&self) -> bool {
        self.smooth_hour_hand
    }

    pub fn set_smooth_hour_hand(&mut self, smooth: bool) {
        self.smooth_hour_hand = smooth;
    }

    pub fn start_on_enable(&self) -> bool {
        self.start_on_enable
    }

    pub fn set_start_on_enable(&mut self, start: bool) {
        self.start_on_enable = start;
    }

    /// Length of one fixed simulation step, used to size smooth ticks.
    pub fn fixed_step(&self) -> Duration {
        self.fixed_step
    }

    pub fn set_fixed_step(&mut self, step: Duration) {
        self.fixed_step = step;
    }

    pub fn tick_loop(&self) -> Option<&TickLoop> {
        self.tick_loop.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.tick_loop.is_some()
    }

    /// Wakes a loop that is waiting for a fixed step.
    pub fn poll_fixed_step(&mut self, wall_clock: &dyn WallClock) -> LoopStatus {
        let due = match &self.tick_loop {
            None => return LoopStatus::Idle,
            Some(tick_loop) => tick_loop.wait == Wait::FixedStep,
        };

        if due {
            self.wake(wall_clock)
        } else {
            LoopStatus::Waiting
        }
    }

    /// Feeds `delta` of real time to a loop waiting on a delay and wakes it
    /// once the delay has passed. Wakes at most once per call.
    pub fn poll_realtime(&mut self, delta: Duration, wall_clock: &dyn WallClock) -> LoopStatus {
        let due = match self.tick_loop.as_mut() {
            None => return LoopStatus::Idle,
            Some(TickLoop { wait: Wait::FixedStep, .. }) => false,
            Some(TickLoop {
                wait: Wait::Realtime { elapsed, duration },
                ..
            }) => {
                *elapsed += delta;
                *elapsed >= *duration
            }
        };

        if due {
            self.wake(wall_clock)
        } else {
            LoopStatus::Waiting
        }
    }

    fn wake(&mut self, wall_clock: &dyn WallClock) -> LoopStatus {
        if !self.power {
            self.tick_loop = None;
            return LoopStatus::Stopped;
        }

        self.tick(wall_clock);
        let wait = self.next_wait();
        if let Some(tick_loop) = self.tick_loop.as_mut() {
            tick_loop.ticks += 1;
            tick_loop.wait = wait;
        }
        LoopStatus::Ticked
    }

    /// The wait policy is picked when each wait begins.
    fn next_wait(&self) -> Wait {
        if self.smooth_second_hand {
            Wait::FixedStep
        } else {
            Wait::Realtime {
                elapsed: Duration::ZERO,
                duration: Duration::from_secs_f64(1.0 / f64::from(self.tick_frequency)),
            }
        }
    }

    /// Advances the time by one tick. A step that would overflow the stored
    /// duration is skipped with a warning.
    pub fn tick(&mut self, wall_clock: &dyn WallClock) {
        let next = if self.use_system_time {
            Some(wall_clock.time_of_day())
        } else if self.smooth_second_hand {
            self.current_time.checked_add(&self.smooth_step())
        } else {
            self.current_time.checked_add(&self.seconds_per_tick)
        };

        match next {
            Some(time) => self.set_current_time(time),
            None => warn!(
                "Clock time {:?} cannot advance further; tick skipped",
                self.current_time
            ),
        }
    }

    /// One fixed step of time, dilated by the frequency and scaled by the
    /// seconds per tick.
    fn smooth_step(&self) -> TimeDelta {
        let nanos = self.fixed_step.as_nanos() as f64
            * f64::from(self.tick_frequency)
            * f64::from(self.seconds_per_tick());
        TimeDelta::nanoseconds(nanos as i64)
    }

    /// Second within the minute.
    pub fn seconds(&self) -> u32 {
        self.current_time.num_seconds().rem_euclid(60) as u32
    }

    /// Minute within the hour.
    pub fn minutes(&self) -> u32 {
        self.current_time.num_minutes().rem_euclid(60) as u32
    }

    /// Hour within the day.
    pub fn hours(&self) -> u32 {
        self.current_time.num_hours().rem_euclid(24) as u32
    }

    /// Millisecond within the second.
    pub fn milliseconds(&self) -> u32 {
        self.current_time.num_milliseconds().rem_euclid(1000) as u32
    }

    /// Hour on a 12-hour dial, advanced by whole minutes.
    pub fn hours12(&self) -> f32 {
        (self.hours() % 12) as f32 + self.minutes() as f32 / 60.0
    }

    pub fn detailed_seconds(&self) -> f32 {
        self.seconds() as f32 + self.milliseconds() as f32 / 1000.0
    }

    pub fn detailed_minutes(&self) -> f32 {
        self.minutes() as f32 + self.seconds() as f32 / 60.0
    }

    pub fn detailed_hours12(&self) -> f32 {
        self.hours12() + self.seconds() as f32 / 3600.0
    }

    pub fn second_hand_angle(&self) -> f32 {
        let seconds = if self.smooth_second_hand {
            self.detailed_seconds()
        } else {
            self.seconds() as f32
        };
        seconds * DEGREES_PER_MINUTE_MARK
    }

    pub fn minute_hand_angle(&self) -> f32 {
        let minutes = if self.smooth_minute_hand {
            self.detailed_minutes()
        } else {
            self.minutes() as f32
        };
        minutes * DEGREES_PER_MINUTE_MARK
    }

    pub fn hour_hand_angle(&self) -> f32 {
        let hours = if self.smooth_hour_hand {
            self.detailed_hours12()
        } else {
            self.hours12()
        };
        hours * DEGREES_PER_HOUR
    }

    pub fn hand_angle(&self, hand: ClockHand) -> f32 {
        match hand {
            ClockHand::Second => self.second_hand_angle(),
            ClockHand::Minute => self.minute_hand_angle(),
            ClockHand::Hour => self.hour_hand_angle(),
        }
    }

    pub fn hand_angles(&self) -> HandAngles {
        HandAngles {
            second: self.second_hand_angle(),
            minute: self.minute_hand_angle(),
            hour: self.hour_hand_angle(),
        }
    }
}
