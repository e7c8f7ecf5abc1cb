//! The world context shared by every part of the scene
//!
//! Assets arrive asynchronously and in no particular order, so everything that
//! needs to find a scene element later goes through the [`WorldContext`]
//! registry instead of holding on to entities directly.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Registry key of the car model
pub const CAR: &str = "car";
/// Registry key of the road model
pub const ROAD: &str = "road";
/// Registry key of the office building model
pub const BUILDING: &str = "building";
/// Registry key of the spotlight
pub const LIGHT: &str = "light";
/// Registry key of the ground plane
pub const GROUND: &str = "ground";

/// Window size used when the scene starts, also the aspect fallback when no window exists
pub const WINDOW_SIZE: (u32, u32) = (1280, 720);

/// Plugin creating the world context, the camera and the renderer settings
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldContext>()
            .init_resource::<CameraSettings>()
            .insert_resource(ClearColor(Color::WHITE))
            .init_state::<ScenePhase>()
            .add_systems(Startup, spawn_camera);
    }
}

/// Whether the car has arrived yet. There is no way back to `Loading`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum ScenePhase {
    #[default]
    Loading,
    CarReady,
}

/// Marker for the one camera the scene is rendered through
#[derive(Component)]
pub struct MainCamera;

/// Projection parameters of the main camera
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraSettings {
    /// Build the perspective projection for a viewport with the given aspect ratio
    pub fn projection(&self, aspect_ratio: f32) -> PerspectiveProjection {
        PerspectiveProjection {
            fov: self.fov_degrees.to_radians(),
            aspect_ratio,
            near: self.near,
            far: self.far,
            ..default()
        }
    }
}

/// Scene graph and named-object registry
///
/// The graph is append-only and keeps insertion order. Registry keys are
/// unique and the last write wins. Looking up a key that was never added
/// yields `None`, which callers treat as "not ready yet".
#[derive(Resource, Debug, Default)]
pub struct WorldContext {
    graph: Vec<Entity>,
    objects: HashMap<String, Entity>,
}

impl WorldContext {
    /// Append a visual element to the scene graph
    pub fn append(&mut self, entity: Entity) {
        self.graph.push(entity);
    }

    /// Register `entity` under `key`, returning whatever was registered there before
    pub fn add_object(&mut self, key: impl Into<String>, entity: Entity) -> Option<Entity> {
        self.objects.insert(key.into(), entity)
    }

    /// Look up a registered object
    pub fn object(&self, key: &str) -> Option<Entity> {
        self.objects.get(key).copied()
    }

    /// Elements in the order they were added to the scene
    pub fn graph(&self) -> &[Entity] {
        &self.graph
    }

    /// Number of registered objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Spawn the main camera at the origin
fn spawn_camera(
    mut commands: Commands,
    settings: Res<CameraSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let aspect_ratio = match windows.single() {
        Ok(window) if window.height() > 0.0 => window.width() / window.height(),
        _ => WINDOW_SIZE.0 as f32 / WINDOW_SIZE.1 as f32,
    };

    // The swapchain is sRGB, which is the 2.2 gamma curve. With tonemapping off
    // that is the only transform applied to the output.
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(settings.projection(aspect_ratio)),
        Tonemapping::None,
        Transform::default(),
        MainCamera,
        Name::new("Main Camera"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((StatesPlugin, WorldPlugin));
        app
    }

    #[test]
    fn create_configures_camera_and_starts_empty() {
        let mut app = test_app();
        app.update();

        let world = app.world_mut();
        let mut cameras = world.query_filtered::<&Projection, With<MainCamera>>();
        let Projection::Perspective(projection) = cameras.single(world).unwrap() else {
            panic!("main camera should use a perspective projection");
        };
        assert!((projection.fov - 45.0_f32.to_radians()).abs() < 1e-6);
        assert!((projection.near - 0.1).abs() < 1e-6);
        assert!((projection.far - 1000.0).abs() < 1e-3);
        assert!((projection.aspect_ratio - 1280.0 / 720.0).abs() < 1e-6);

        let context = app.world().resource::<WorldContext>();
        assert!(context.is_empty());
        assert!(context.graph().is_empty());
        assert_eq!(app.world().resource::<ClearColor>().0, Color::WHITE);
        assert_eq!(
            *app.world().resource::<State<ScenePhase>>().get(),
            ScenePhase::Loading
        );
    }

    #[test]
    fn add_object_overwrites_existing_key() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();

        let mut context = WorldContext::default();
        assert_eq!(context.add_object(CAR, first), None);
        assert_eq!(context.add_object(CAR, second), Some(first));

        assert_eq!(context.len(), 1);
        assert_eq!(context.object(CAR), Some(second));
    }

    #[test]
    fn missing_key_is_not_ready() {
        let context = WorldContext::default();
        assert_eq!(context.object(CAR), None);
        assert_eq!(context.object("anything"), None);
    }

    #[test]
    fn graph_keeps_insertion_order() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut context = WorldContext::default();
        context.append(b);
        context.append(a);
        assert_eq!(context.graph(), &[b, a]);
    }
}
