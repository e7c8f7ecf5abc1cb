//! The grey ground plane the road and car sit on

use bevy::prelude::*;

use crate::world::{WorldContext, GROUND};

/// Plugin spawning the ground plane at startup
pub struct GroundPlanePlugin;

impl Plugin for GroundPlanePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ground);
    }
}

/// Dimensions and placement of the ground
#[derive(Debug, Clone, Copy)]
pub struct GroundPlane {
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
    pub subdivisions: u32,
    pub color: Color,
    /// Centre of the plane
    pub origin: Vec3,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            width: 60.0,
            depth: 20.0,
            subdivisions: 5,
            color: Color::srgb_u8(0x66, 0x66, 0x66),
            origin: Vec3::new(15.0, 0.0, 0.0),
        }
    }
}

impl GroundPlane {
    pub fn mesh(&self) -> Mesh {
        Plane3d::default()
            .mesh()
            .size(self.width, self.depth)
            .subdivisions(self.subdivisions)
            .build()
    }

    /// Visible from both sides, like a sheet of paper
    pub fn material(&self) -> StandardMaterial {
        StandardMaterial {
            base_color: self.color,
            perceptual_roughness: 0.9,
            double_sided: true,
            cull_mode: None,
            ..default()
        }
    }
}

fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut context: ResMut<WorldContext>,
) {
    let ground = GroundPlane::default();

    let entity = commands
        .spawn((
            Mesh3d(meshes.add(ground.mesh())),
            MeshMaterial3d(materials.add(ground.material())),
            Transform::from_translation(ground.origin),
            Name::new("Ground"),
        ))
        .id();

    context.append(entity);
    context.add_object(GROUND, entity);
    debug!("Ground plane spawned at {:?}", ground.origin);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_is_registered_and_offset() {
        let mut app = App::new();
        app.init_resource::<WorldContext>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_plugins(GroundPlanePlugin);
        app.update();

        let context = app.world().resource::<WorldContext>();
        let ground = context.object(GROUND).expect("ground should be registered");
        assert_eq!(context.graph(), &[ground]);

        let transform = app.world().get::<Transform>(ground).unwrap();
        assert_eq!(transform.translation, Vec3::new(15.0, 0.0, 0.0));
        assert!(app.world().get::<Mesh3d>(ground).is_some());
    }

    #[test]
    fn material_is_double_sided() {
        let material = GroundPlane::default().material();
        assert!(material.double_sided);
        assert!(material.cull_mode.is_none());
    }
}
