//! Roadscene - a car on a road, lit by a spotlight
//!
//! This demo:
//! 1. Lays out a ground plane and a spotlight
//! 2. Loads a car, a road and an office building from glTF files
//! 3. Lets the arrow keys nudge the car while the camera keeps it in view

use bevy::prelude::*;

mod car;
mod ground_plane;
mod lighting;
mod model_loader;
mod tracking;
mod world;

use car::CarPlugin;
use ground_plane::GroundPlanePlugin;
use lighting::LightingPlugin;
use model_loader::ModelLoaderPlugin;
use tracking::TrackingPlugin;
use world::{WorldPlugin, WINDOW_SIZE};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Roadscene".into(),
                resolution: WINDOW_SIZE.into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(WorldPlugin)
        .add_plugins((
            GroundPlanePlugin,
            LightingPlugin,
            ModelLoaderPlugin,
            CarPlugin,
            TrackingPlugin,
        ))
        .run();
}
