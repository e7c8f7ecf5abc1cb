//! Arrow key controls for the car
//!
//! The car has no physics. Every keydown, auto-repeats included, moves it one
//! unit along the ground, with no bounds and no collision against the road or
//! ground.

use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;

use crate::world::{ScenePhase, WorldContext, CAR};

/// Plugin for the car controls
pub struct CarPlugin;

impl Plugin for CarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CarKeys>()
            .add_systems(Update, nudge_car.in_set(CarControls));
    }
}

/// System set containing the car controls, so tracking can run after them
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CarControls;

/// Keys that nudge the car
#[derive(Resource, Debug, Clone)]
pub struct CarKeys {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
}

impl Default for CarKeys {
    fn default() -> Self {
        Self {
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
        }
    }
}

impl CarKeys {
    /// How far one press of `key` moves the car, if it is one of ours
    ///
    /// The camera looks down -Z from behind the car, so "right" on screen is -X.
    pub fn nudge(&self, key: KeyCode) -> Option<Vec3> {
        if key == self.up {
            Some(Vec3::Z)
        } else if key == self.down {
            Some(Vec3::NEG_Z)
        } else if key == self.right {
            Some(Vec3::NEG_X)
        } else if key == self.left {
            Some(Vec3::X)
        } else {
            None
        }
    }
}

/// Move the car once for every keydown received this frame
///
/// Keydowns that arrive before the car is ready are consumed and dropped, so
/// they are not replayed once it shows up.
fn nudge_car(
    mut key_events: MessageReader<KeyboardInput>,
    keys: Res<CarKeys>,
    phase: Res<State<ScenePhase>>,
    context: Res<WorldContext>,
    mut transforms: Query<&mut Transform>,
) {
    let ready = *phase.get() == ScenePhase::CarReady;
    let car = context.object(CAR).filter(|_| ready);
    let Some(mut transform) = car.and_then(|car| transforms.get_mut(car).ok()) else {
        key_events.clear();
        return;
    };

    for event in key_events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        if let Some(delta) = keys.nudge(event.key_code) {
            transform.translation += delta;
        }
    }
}
