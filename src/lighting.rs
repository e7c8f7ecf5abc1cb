//! The spotlight that follows the car once it arrives

use bevy::prelude::*;

use crate::world::{WorldContext, LIGHT};

/// Where the spotlight hangs
pub const SPOTLIGHT_POSITION: Vec3 = Vec3::new(-40.0, 60.0, -10.0);

/// Plugin spawning the spotlight at startup
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_spotlight);
    }
}

/// White shadow-casting spotlight with a 0.6 rad cone
pub fn spotlight() -> SpotLight {
    SpotLight {
        color: Color::WHITE,
        // roughly 75 units away from the scene, so it needs to be bright
        intensity: 20_000_000.0,
        range: 200.0,
        shadows_enabled: true,
        outer_angle: 0.6,
        inner_angle: 0.45,
        ..default()
    }
}

fn spawn_spotlight(mut commands: Commands, mut context: ResMut<WorldContext>) {
    let entity = commands
        .spawn((
            spotlight(),
            Transform::from_translation(SPOTLIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
            Name::new("Spotlight"),
        ))
        .id();

    context.append(entity);
    context.add_object(LIGHT, entity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spotlight_is_registered_with_shadows() {
        let mut app = App::new();
        app.init_resource::<WorldContext>().add_plugins(LightingPlugin);
        app.update();

        let context = app.world().resource::<WorldContext>();
        let light = context.object(LIGHT).expect("light should be registered");
        assert_eq!(context.graph(), &[light]);

        let spot = app.world().get::<SpotLight>(light).unwrap();
        assert!(spot.shadows_enabled);
        assert_eq!(spot.outer_angle, 0.6);

        let transform = app.world().get::<Transform>(light).unwrap();
        assert_eq!(transform.translation, SPOTLIGHT_POSITION);
        let towards_origin = (Vec3::ZERO - SPOTLIGHT_POSITION).normalize();
        assert!(transform.forward().dot(towards_origin) > 0.999);
    }
}
