//! Vertical ray queries against a designated surface.
use glam::Vec3;

use crate::scene::{ContainerId, FaceId, ObjectId, Scene};

/// A successful surface query: world-space hit point and the hit face.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    pub point: Vec3,
    pub face: FaceId,
}

/// Casts straight-down rays and reports hits only on the designated surface.
///
/// The query is evaluated against the whole scene: if anything other than
/// the surface is the nearest intersection, that counts as a miss. Instances
/// generated into the excluded container are skipped entirely so they never
/// shadow the surface for later queries in the same run.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceQuery<'a> {
    scene: &'a Scene,
    surface: ObjectId,
    exclude: Option<ContainerId>,
}

impl<'a> SurfaceQuery<'a> {
    pub fn new(scene: &'a Scene, surface: ObjectId) -> Self {
        Self {
            scene,
            surface,
            exclude: None,
        }
    }

    /// Skips members of this container during ray intersection.
    pub fn with_excluded_container(mut self, container: ContainerId) -> Self {
        self.exclude = Some(container);
        self
    }

    /// Casts from `(x, y, z_start)` straight down. Misses are reported
    /// upward; the caller decides whether to resample.
    pub fn query(&self, x: f32, y: f32, z_start: f32) -> Option<SurfaceHit> {
        let hit = self
            .scene
            .cast_ray(Vec3::new(x, y, z_start), Vec3::NEG_Z, self.exclude)?;
        (hit.object == self.surface).then_some(SurfaceHit {
            point: hit.point,
            face: hit.face,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Mesh, Object, Transform};

    #[test]
    fn hit_on_surface_reports_point_and_face() {
        let mut scene = Scene::new();
        let terrain = scene.add_object(Object::new("Plane").with_mesh(Mesh::grid(5.0, 2)));

        let query = SurfaceQuery::new(&scene, terrain);
        let hit = query.query(2.0, 2.0, 1000.0).expect("hit");
        assert!((hit.point - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-3);
        assert_eq!(hit.face, 3);
    }

    #[test]
    fn off_surface_is_a_miss() {
        let mut scene = Scene::new();
        let terrain = scene.add_object(Object::new("Plane").with_mesh(Mesh::plane(5.0)));

        let query = SurfaceQuery::new(&scene, terrain);
        assert!(query.query(7.0, 0.0, 1000.0).is_none());
    }

    #[test]
    fn other_object_in_front_counts_as_miss() {
        let mut scene = Scene::new();
        let terrain = scene.add_object(Object::new("Plane").with_mesh(Mesh::plane(5.0)));
        let _rock = scene.add_object(
            Object::new("rock")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 2.0)))
                .with_mesh(Mesh::plane(1.0)),
        );

        let query = SurfaceQuery::new(&scene, terrain);
        assert!(query.query(0.0, 0.0, 1000.0).is_none());
        assert!(query.query(3.0, 3.0, 1000.0).is_some());
    }

    #[test]
    fn excluded_container_does_not_shadow_surface() {
        let mut scene = Scene::new();
        let terrain = scene.add_object(Object::new("Plane").with_mesh(Mesh::plane(5.0)));
        let target = scene.get_or_create_container("Generated");
        let instance = scene.add_object(
            Object::new("tree")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 1.0)))
                .with_mesh(Mesh::plane(5.0)),
        );
        scene.link_to_container(target, instance);

        let blocked = SurfaceQuery::new(&scene, terrain);
        assert!(blocked.query(0.0, 0.0, 1000.0).is_none());

        let query = SurfaceQuery::new(&scene, terrain).with_excluded_container(target);
        let hit = query.query(0.0, 0.0, 1000.0).expect("hit");
        assert!(hit.point.z.abs() < 1e-4);
    }
}
