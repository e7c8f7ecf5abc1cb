//! Per-frame camera and spotlight tracking
//!
//! Bevy renders the scene every frame on its own. This plugin only keeps the
//! camera and the spotlight pointed at the car, once there is a car.

use bevy::prelude::*;

use crate::car::CarControls;
use crate::world::{MainCamera, WorldContext, CAR, LIGHT};

pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, track_car.after(CarControls));
    }
}

/// Aim the camera and the spotlight at the car's current position
fn track_car(
    context: Res<WorldContext>,
    cameras: Query<Entity, With<MainCamera>>,
    mut transforms: Query<&mut Transform>,
) {
    let Some(car) = context.object(CAR) else {
        return;
    };
    let Ok(target) = transforms.get(car).map(|transform| transform.translation) else {
        return;
    };

    for camera in cameras.iter() {
        if let Ok(mut transform) = transforms.get_mut(camera) {
            transform.look_at(target, Vec3::Y);
        }
    }

    if let Some(light) = context.object(LIGHT) {
        if let Ok(mut transform) = transforms.get_mut(light) {
            transform.look_at(target, Vec3::Y);
        }
    }
}
