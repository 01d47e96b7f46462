use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use analog_clock::plugins::clock::ClockPlugin;
use analog_clock::plugins::clock_control::ClockControlPlugin;
use analog_clock::plugins::clock_face::ClockFacePlugin;
use analog_clock::resources::{CliArgs, ClockConfig};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins).add_plugins(EguiPlugin);

    // Parsed after DefaultPlugins so CLI and config warnings reach the log.
    let cli = CliArgs::parse();
    app.insert_resource(ClockConfig::resolve(&cli))
        .add_plugins(ClockPlugin)
        .add_plugins(ClockFacePlugin)
        .add_plugins(ClockControlPlugin)
        .run();
}
