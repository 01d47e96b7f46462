use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::utils::HashMap;
use bevy_egui::{egui, EguiContexts};

use crate::components::analog_clock::{AnalogClock, FREQUENCY_MAX, FREQUENCY_MIN};
use crate::utils::time_input::{format_time_of_day, parse_time_input};

/// Seconds-per-tick slider reaches this far in both directions.
pub const SECONDS_PER_TICK_RANGE: i32 = 1000;

/// Control panel for every clock in the world.
pub struct ClockControlPlugin;

impl Plugin for ClockControlPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        }

        app.add_systems(Update, clock_control_panel);
    }
}

/// Frequency for a position on the logarithmic slider.
pub fn slider_to_frequency(position: f32) -> f32 {
    2_f32.powf(position)
}

/// Slider position showing `frequency`.
pub fn frequency_to_slider(frequency: f32) -> f32 {
    frequency.log2()
}

/// Sets the clock's time from operator text. Unparsable text is discarded
/// with a warning and the clock keeps its time.
pub fn apply_time_input(clock: &mut AnalogClock, text: &str) -> bool {
    match parse_time_input(text) {
        Ok(time) => {
            clock.set_current_time(time);
            info!("Clock set to {}", format_time_of_day(clock.current_time()));
            true
        }
        Err(err) => {
            warn!("{err}");
            false
        }
    }
}

fn clock_control_panel(
    mut contexts: EguiContexts,
    mut clocks: Query<(Entity, &mut AnalogClock)>,
    diagnostics: Res<DiagnosticsStore>,
    mut time_inputs: Local<HashMap<Entity, String>>,
) {
    let ctx = contexts.ctx_mut();

    for (entity, mut clock) in &mut clocks {
        egui::Window::new(format!("Clock {entity:?}"))
            .id(egui::Id::new(entity))
            .show(ctx, |ui| {
                ui.heading(format_time_of_day(clock.current_time()));

                if let Some(fps) = diagnostics
                    .get(&FrameTimeDiagnosticsPlugin::FPS)
                    .and_then(|diag| diag.smoothed())
                {
                    ui.label(format!("FPS: {:.1}", fps));
                }

                ui.separator();

                let mut power = clock.power();
                if ui.checkbox(&mut power, "Power").changed() {
                    clock.set_power(power);
                    info!("Clock {:?} power {}", entity, if power { "on" } else { "off" });
                }

                let mut use_system_time = clock.use_system_time();
                if ui.checkbox(&mut use_system_time, "Use system time").changed() {
                    clock.set_use_system_time(use_system_time);
                }

                let mut smooth = clock.smooth_second_hand();
                if ui.checkbox(&mut smooth, "Smooth second hand").changed() {
                    clock.set_smooth_second_hand(smooth);
                }
                let mut smooth = clock.smooth_minute_hand();
                if ui.checkbox(&mut smooth, "Smooth minute hand").changed() {
                    clock.set_smooth_minute_hand(smooth);
                }
                let mut smooth = clock.smooth_hour_hand();
                if ui.checkbox(&mut smooth, "Smooth hour hand").changed() {
                    clock.set_smooth_hour_hand(smooth);
                }

                ui.separator();

                let mut position = frequency_to_slider(clock.tick_frequency());
                let range = frequency_to_slider(FREQUENCY_MIN)..=frequency_to_slider(FREQUENCY_MAX);
                let slider = egui::Slider::new(&mut position, range).show_value(false);
                if ui.add(slider).changed() {
                    clock.set_tick_frequency(slider_to_frequency(position));
                }
                ui.label(format!("Tick frequency: {:.2} Hz", clock.tick_frequency()));

                let mut seconds_per_tick = clock.seconds_per_tick();
                let slider = egui::Slider::new(
                    &mut seconds_per_tick,
                    -SECONDS_PER_TICK_RANGE..=SECONDS_PER_TICK_RANGE,
                )
                .text("Seconds per tick");
                if ui.add(slider).changed() {
                    clock.set_seconds_per_tick(seconds_per_tick);
                }

                ui.separator();

                let input = time_inputs.entry(entity).or_default();
                ui.label("Set time (hh:mm[:ss])");
                let response = ui.text_edit_singleline(input);
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    apply_time_input(&mut clock, input);
                }
            });
    }

    time_inputs.retain(|entity, _| clocks.contains(*entity));
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn test_slider_maps_to_power_of_two() {
        for (position, frequency) in [(0.0, 1.0), (3.0, 8.0), (-1.0, 0.5)] {
            assert!((slider_to_frequency(position) - frequency).abs() < 1e-5);
        }
    }

    #[test]
    fn test_slider_round_trip() {
        for frequency in [FREQUENCY_MIN, 1.0, 7.5, FREQUENCY_MAX] {
            let back = slider_to_frequency(frequency_to_slider(frequency));
            assert!((back - frequency).abs() < 1e-3 * frequency);
        }
    }

    #[test]
    fn test_slider_range_stays_within_clamp() {
        let mut clock = AnalogClock::new();
        clock.set_tick_frequency(slider_to_frequency(frequency_to_slider(FREQUENCY_MAX) + 1.0));
        assert_eq!(clock.tick_frequency(), FREQUENCY_MAX);
    }

    #[test]
    fn test_valid_time_input_sets_time() {
        let mut clock = AnalogClock::new();
        assert!(apply_time_input(&mut clock, "21:07:30"));
        assert_eq!(
            clock.current_time(),
            TimeDelta::hours(21) + TimeDelta::minutes(7) + TimeDelta::seconds(30)
        );
    }

    #[test]
    fn test_negative_time_input_wraps() {
        let mut clock = AnalogClock::new();
        assert!(apply_time_input(&mut clock, "-00:00:01"));
        assert_eq!(format_time_of_day(clock.current_time()), "23:59:59");
    }

    #[test]
    fn test_invalid_time_input_keeps_time() {
        let mut clock = AnalogClock::new();
        clock.set_current_time(TimeDelta::hours(4));
        assert!(!apply_time_input(&mut clock, "4 o'clock"));
        assert_eq!(clock.current_time(), TimeDelta::hours(4));
    }
}
