//! glTF model loading for the car, the road and the office building
//!
//! Every model is requested at startup as a load task: an entity holding a
//! [`ModelLoad`] component. Each frame the task is polled and, once the asset
//! server reports a final state, resolved into an explicit
//! `Result<(), ModelLoadError>`. Despawning a task before it resolves cancels it.

use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

use crate::world::{MainCamera, ScenePhase, WorldContext, BUILDING, CAR, ROAD};

/// Plugin requesting and resolving the model loads
pub struct ModelLoaderPlugin;

impl Plugin for ModelLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, request_models)
            .add_systems(Update, poll_model_loads);
    }
}

/// The models that make up the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelAsset {
    Car,
    Road,
    Building,
}

impl ModelAsset {
    pub const ALL: [ModelAsset; 3] = [ModelAsset::Car, ModelAsset::Road, ModelAsset::Building];

    /// Path relative to the asset root
    pub fn path(self) -> &'static str {
        match self {
            ModelAsset::Car => "models/car/scene.gltf",
            ModelAsset::Road => "models/road_straight/scene.gltf",
            ModelAsset::Building => "models/modern_office/scene.gltf",
        }
    }

    /// Registry key the loaded model is stored under
    pub fn key(self) -> &'static str {
        match self {
            ModelAsset::Car => CAR,
            ModelAsset::Road => ROAD,
            ModelAsset::Building => BUILDING,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelAsset::Car => "Car",
            ModelAsset::Road => "Road",
            ModelAsset::Building => "Building",
        }
    }

    /// Move the freshly loaded model into place
    pub fn place(self, transform: &mut Transform) {
        match self {
            ModelAsset::Car => {
                transform.translation.x -= 1.25;
                transform.translation.y = 0.0;
                transform.translation.z = 0.0;
            }
            ModelAsset::Road => {
                transform.scale.x = 0.2;
                transform.scale.y = 0.2;
            }
            ModelAsset::Building => {
                transform.translation.y = 0.0;
            }
        }
    }

    /// Camera height and distance this model sets when it arrives
    pub fn camera_mount(self) -> Option<CameraMount> {
        match self {
            ModelAsset::Car => Some(CameraMount { y: 4.0, z: 15.0 }),
            ModelAsset::Road => Some(CameraMount { y: 2.0, z: 15.0 }),
            ModelAsset::Building => None,
        }
    }
}

/// Camera Y/Z position applied on load completion
///
/// Car and road both set one. Loads finish in no fixed order and the mount of
/// whichever finishes last stays in effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMount {
    pub y: f32,
    pub z: f32,
}

impl CameraMount {
    pub fn apply(self, camera: &mut Transform) {
        camera.translation.y = self.y;
        camera.translation.z = self.z;
    }
}

/// A model load that has not resolved yet
#[derive(Component, Debug)]
pub struct ModelLoad {
    pub model: ModelAsset,
    pub handle: Handle<Scene>,
}

/// Why a model failed to load
#[derive(Debug, thiserror::Error)]
#[error("failed to load {path}: {reason}")]
pub struct ModelLoadError {
    pub path: &'static str,
    pub reason: String,
}

/// Request every model of the scene
fn request_models(mut commands: Commands, asset_server: Res<AssetServer>) {
    for model in ModelAsset::ALL {
        let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(model.path()));
        commands.spawn((
            ModelLoad { model, handle },
            Transform::default(),
            Name::new(model.label()),
        ));
        info!("Loading {} from: {}", model.label(), model.path());
    }
}

/// Map the asset server's view of a load onto an outcome, `None` while it is still in flight
pub fn load_outcome(model: ModelAsset, state: Option<LoadState>) -> Option<Result<(), ModelLoadError>> {
    match state {
        Some(LoadState::Loaded) => Some(Ok(())),
        Some(LoadState::Failed(err)) => Some(Err(ModelLoadError {
            path: model.path(),
            reason: err.to_string(),
        })),
        _ => None,
    }
}

/// Check whether any pending model has finished loading
fn poll_model_loads(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    loads: Query<(Entity, &ModelLoad)>,
) {
    for (task, load) in loads.iter() {
        let state = asset_server.get_load_state(load.handle.id());
        if let Some(outcome) = load_outcome(load.model, state) {
            commands.queue(move |world: &mut World| resolve_model_load(world, task, outcome));
        }
    }
}

/// Finish a load task
///
/// On success the task entity becomes the model's scene root and joins the
/// scene graph and registry. On failure the error is logged and the task is
/// dropped, leaving the scene as it was.
pub fn resolve_model_load(world: &mut World, task: Entity, outcome: Result<(), ModelLoadError>) {
    let Ok(mut entity) = world.get_entity_mut(task) else {
        return;
    };
    let Some(load) = entity.take::<ModelLoad>() else {
        return;
    };

    if let Err(err) = outcome {
        error!("{err}");
        entity.despawn();
        return;
    }

    let model = load.model;
    let mut transform = entity.get::<Transform>().copied().unwrap_or_default();
    model.place(&mut transform);
    entity.insert((SceneRoot(load.handle), transform));

    let mut context = world.resource_mut::<WorldContext>();
    context.append(task);
    context.add_object(model.key(), task);
    info!("{} initialized", model.label());
    debug!(
        "{} objects registered, {} in the scene graph",
        context.len(),
        context.graph().len()
    );

    if let Some(mount) = model.camera_mount() {
        let mut cameras = world.query_filtered::<&mut Transform, With<MainCamera>>();
        if let Ok(mut camera) = cameras.single_mut(world) {
            mount.apply(&mut camera);
            debug!("{} moved the camera to {:?}", model.label(), camera.translation);
        }
    }

    if model == ModelAsset::Car {
        if let Some(mut next) = world.get_resource_mut::<NextState<ScenePhase>>() {
            next.set(ScenePhase::CarReady);
        }
    }
}
