//! Demo scene: a camera and one clock face built from the startup config.

use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::components::clock_hand::ClockHand;
use crate::resources::clock_config::ClockConfig;

/// Dial radius in world units.
pub const DIAL_RADIUS: f32 = 220.0;

pub struct ClockFacePlugin;

impl Plugin for ClockFacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClockConfig>()
            .add_systems(Startup, (spawn_camera, spawn_clock_face));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Transform::from_xyz(0.0, 0.0, 100.0)));
}

fn spawn_clock_face(
    mut commands: Commands,
    config: Res<ClockConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let dial = meshes.add(Circle::new(DIAL_RADIUS));
    let dial_color = materials.add(Color::srgb(0.93, 0.9, 0.82));

    commands
        .spawn((
            Name::new("Analog Clock"),
            config.build_clock(),
            Mesh2d(dial),
            MeshMaterial2d(dial_color),
            Transform::default(),
        ))
        .with_children(|parent| {
            // Hour marks, 12 o'clock first.
            for mark in 0..12 {
                let angle = -(mark as f32) * TAU / 12.0;
                let length = if mark % 3 == 0 { 28.0 } else { 14.0 };
                parent.spawn((
                    Sprite {
                        color: Color::srgb(0.2, 0.18, 0.15),
                        custom_size: Some(Vec2::new(4.0, length)),
                        anchor: Anchor::TopCenter,
                        ..default()
                    },
                    Transform::from_rotation(Quat::from_rotation_z(angle))
                        .mul_transform(Transform::from_xyz(0.0, DIAL_RADIUS - 6.0, 1.0)),
                ));
            }

            for (depth, hand) in ClockHand::ALL.into_iter().enumerate() {
                let color = match hand {
                    ClockHand::Second => Color::srgb(0.75, 0.1, 0.1),
                    ClockHand::Minute | ClockHand::Hour => Color::srgb(0.1, 0.1, 0.12),
                };
                parent.spawn((
                    hand,
                    Sprite {
                        color,
                        custom_size: Some(Vec2::new(hand.width(), DIAL_RADIUS * hand.length_ratio())),
                        anchor: Anchor::BottomCenter,
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 2.0 + depth as f32),
                ));
            }
        });
}
