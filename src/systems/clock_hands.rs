use bevy::prelude::*;

use crate::components::analog_clock::AnalogClock;
use crate::components::clock_hand::ClockHand;

/// System that turns each hand to its clock's current angle.
///
/// Hands are children of the clock entity. Only the Z rotation is replaced.
pub fn show_clock_hands_system(
    clocks: Query<&AnalogClock>,
    mut hands: Query<(&Parent, &ClockHand, &mut Transform)>,
) {
    for (parent, hand, mut transform) in &mut hands {
        let Ok(clock) = clocks.get(parent.get()) else {
            continue;
        };

        let angle = clock.hand_angle(*hand).to_radians();
        let (x, y, _) = transform.rotation.to_euler(EulerRot::XYZ);
        transform.rotation = Quat::from_euler(EulerRot::XYZ, x, y, angle);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn hand_app(time: TimeDelta) -> (App, Entity, [Entity; 3]) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, show_clock_hands_system);

        let mut clock = AnalogClock::new();
        clock.set_current_time(time);

        let mut hands = Vec::new();
        let clock_entity = app
            .world_mut()
            .spawn(clock)
            .with_children(|parent| {
                for hand in ClockHand::ALL {
                    hands.push(parent.spawn((hand, Transform::default())).id());
                }
            })
            .id();

        (app, clock_entity, [hands[0], hands[1], hands[2]])
    }

    fn z_rotation(app: &App, entity: Entity) -> Quat {
        app.world().get::<Transform>(entity).unwrap().rotation
    }

    fn assert_rotation(actual: Quat, degrees: f32) {
        let expected = Quat::from_rotation_z(degrees.to_radians());
        assert!(
            actual.angle_between(expected) < 5e-3,
            "expected {degrees} degrees, got {actual:?}"
        );
    }

    #[test]
    fn test_hands_point_at_half_past_three() {
        let time = TimeDelta::hours(3) + TimeDelta::minutes(30);
        let (mut app, _, [hour, minute, second]) = hand_app(time);

        app.update();

        assert_rotation(z_rotation(&app, hour), -105.0);
        assert_rotation(z_rotation(&app, minute), -180.0);
        assert_rotation(z_rotation(&app, second), 0.0);
    }

    #[test]
    fn test_hands_follow_time_changes() {
        let (mut app, clock, [_, minute, _]) = hand_app(TimeDelta::zero());
        app.update();

        app.world_mut()
            .get_mut::<AnalogClock>(clock)
            .unwrap()
            .set_current_time(TimeDelta::minutes(15));
        app.update();

        assert_rotation(z_rotation(&app, minute), -90.0);
    }

    #[test]
    fn test_hand_keeps_x_and_y_rotation() {
        let (mut app, _, [hour, _, _]) = hand_app(TimeDelta::hours(3));
        let tilt = Quat::from_euler(EulerRot::XYZ, 0.3, -0.2, 0.0);
        app.world_mut().get_mut::<Transform>(hour).unwrap().rotation = tilt;

        app.update();

        let (x, y, z) = z_rotation(&app, hour).to_euler(EulerRot::XYZ);
        assert!((x - 0.3).abs() < 1e-4);
        assert!((y + 0.2).abs() < 1e-4);
        assert!((z - (-90.0_f32).to_radians()).abs() < 1e-4);
    }
}
