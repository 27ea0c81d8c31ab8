//! In-memory scene model: objects, hierarchies, containers, and ray casting.
//!
//! This is the concrete stand-in for the host scene graph: it provides name
//! lookup, a full-scene ray intersection service, and named clearable
//! containers that receive generated instances. Objects are keyed by
//! creation-ordered ids, so lookup and ray iteration are deterministic.
use std::collections::BTreeMap;
use std::sync::Arc;

use glam::{Affine3A, Quat, Vec3};

pub mod mesh;

pub use mesh::{Face, FaceId, Mesh, VertexId};

/// Handle to an object in a [`Scene`]. Ordered by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u32);

/// Handle to a named container in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(usize);

/// Translation, yaw about +Z (degrees), and per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub yaw_degrees: f32,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        yaw_degrees: 0.0,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_yaw_degrees(mut self, yaw_degrees: f32) -> Self {
        self.yaw_degrees = yaw_degrees;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_z(self.yaw_degrees.to_radians()),
            self.translation,
        )
    }
}

/// A scene object: named, transformed relative to its parent, optionally
/// carrying shared mesh data.
#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    pub transform: Transform,
    mesh: Option<Arc<Mesh>>,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
    container: Option<ContainerId>,
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            parent: None,
            children: Vec::new(),
            container: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(Arc::new(mesh));
        self
    }

    pub(crate) fn with_shared_mesh(mut self, mesh: Option<Arc<Mesh>>) -> Self {
        self.mesh = mesh;
        self
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_deref()
    }

    pub(crate) fn shared_mesh(&self) -> Option<Arc<Mesh>> {
        self.mesh.clone()
    }

    /// Mutable access to the mesh, cloning if it is shared with other objects.
    pub fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.mesh.as_mut().map(Arc::make_mut)
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }
}

#[derive(Debug, Default)]
struct Container {
    name: String,
    members: Vec<ObjectId>,
}

/// Result of a full-scene ray cast.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub object: ObjectId,
    pub face: FaceId,
    pub point: Vec3,
    /// Ray parameter of the hit (`point = origin + distance * direction`).
    pub distance: f32,
}

/// The scene: object storage plus named generation containers.
#[derive(Debug, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, Object>,
    containers: Vec<Container>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Adds a root-level object and returns its handle.
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        let id = self.allocate_id();
        self.objects.insert(id, object);
        id
    }

    /// Adds an object as a child of `parent`; its transform stays relative
    /// to the parent.
    pub fn add_child(&mut self, parent: ObjectId, mut object: Object) -> ObjectId {
        object.parent = Some(parent);
        let id = self.allocate_id();
        self.objects.insert(id, object);
        if let Some(parent_obj) = self.objects.get_mut(&parent) {
            parent_obj.children.push(id);
        }
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Finds the oldest object with the given name. Instances created later
    /// can never shadow the object they were copied from.
    pub fn find_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, obj)| obj.name == name)
            .map(|(&id, _)| id)
    }

    /// World transform of an object, composed through its parents.
    pub fn world_transform(&self, id: ObjectId) -> Affine3A {
        let Some(obj) = self.objects.get(&id) else {
            return Affine3A::IDENTITY;
        };
        let local = obj.transform.to_affine();
        match obj.parent {
            Some(parent) => self.world_transform(parent) * local,
            None => local,
        }
    }

    /// Removes an object and its entire subtree from the scene and from any
    /// containers holding them.
    pub fn remove_subtree(&mut self, id: ObjectId) {
        let Some(obj) = self.objects.remove(&id) else {
            return;
        };
        if let Some(parent) = obj.parent {
            if let Some(parent_obj) = self.objects.get_mut(&parent) {
                parent_obj.children.retain(|&child| child != id);
            }
        }
        if let Some(ContainerId(index)) = obj.container {
            self.containers[index].members.retain(|&member| member != id);
        }
        for child in obj.children {
            self.remove_subtree(child);
        }
    }

    /// Returns the container with this name, creating it if needed.
    /// Repeated calls with the same name return the same handle.
    pub fn get_or_create_container(&mut self, name: &str) -> ContainerId {
        if let Some(id) = self.find_container(name) {
            return id;
        }
        self.containers.push(Container {
            name: name.to_owned(),
            members: Vec::new(),
        });
        ContainerId(self.containers.len() - 1)
    }

    pub fn find_container(&self, name: &str) -> Option<ContainerId> {
        self.containers
            .iter()
            .position(|container| container.name == name)
            .map(ContainerId)
    }

    pub fn container_name(&self, id: ContainerId) -> &str {
        &self.containers[id.0].name
    }

    /// Every object linked to the container, including children of instance
    /// roots.
    pub fn container_members(&self, id: ContainerId) -> &[ObjectId] {
        &self.containers[id.0].members
    }

    /// Instance roots in the container (members without a parent).
    pub fn container_roots(&self, id: ContainerId) -> Vec<ObjectId> {
        self.containers[id.0]
            .members
            .iter()
            .copied()
            .filter(|&member| {
                self.objects
                    .get(&member)
                    .is_some_and(|obj| obj.parent.is_none())
            })
            .collect()
    }

    /// Removes and destroys every member of the container. The container
    /// itself stays registered under its name.
    pub fn clear_container(&mut self, id: ContainerId) {
        let members = std::mem::take(&mut self.containers[id.0].members);
        for member in members {
            // Subtree removal already dropped children of earlier members.
            self.remove_subtree(member);
        }
    }

    /// Links an object into a container, transferring ownership from any
    /// previous container.
    pub fn link_to_container(&mut self, container: ContainerId, object: ObjectId) {
        let Some(obj) = self.objects.get_mut(&object) else {
            return;
        };
        if let Some(ContainerId(previous)) = obj.container.replace(container) {
            self.containers[previous]
                .members
                .retain(|&member| member != object);
        }
        self.containers[container.0].members.push(object);
    }

    /// Nearest ray intersection over all mesh objects in the scene.
    ///
    /// Members of `exclude` are skipped entirely, so freshly generated
    /// instances never occlude the surface for later casts in the same run.
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        exclude: Option<ContainerId>,
    ) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for (&id, obj) in &self.objects {
            if obj.mesh().is_none() {
                continue;
            }
            if exclude.is_some() && obj.container == exclude {
                continue;
            }
            let inverse = self.world_transform(id).inverse();
            let local_origin = inverse.transform_point3(origin);
            let local_direction = inverse.transform_vector3(direction);
            // The ray parameter is preserved under the affine map, so hits
            // from different objects compare directly.
            if let Some((t, face)) = obj
                .mesh()
                .and_then(|mesh| mesh.raycast(local_origin, local_direction))
            {
                if nearest.is_none_or(|hit| t < hit.distance) {
                    nearest = Some(RayHit {
                        object: id,
                        face,
                        point: origin + t * direction,
                        distance: t,
                    });
                }
            }
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_terrain(scene: &mut Scene, half_extent: f32) -> ObjectId {
        scene.add_object(Object::new("Plane").with_mesh(Mesh::plane(half_extent)))
    }

    #[test]
    fn name_lookup_returns_oldest_object() {
        let mut scene = Scene::new();
        let first = scene.add_object(Object::new("tree"));
        let _copy = scene.add_object(Object::new("tree"));
        assert_eq!(scene.find_object_by_name("tree"), Some(first));
        assert_eq!(scene.find_object_by_name("missing"), None);
    }

    #[test]
    fn container_creation_is_idempotent() {
        let mut scene = Scene::new();
        let a = scene.get_or_create_container("Generated_Trees");
        let b = scene.get_or_create_container("Generated_Trees");
        assert_eq!(a, b);
        assert_eq!(scene.container_name(a), "Generated_Trees");
    }

    #[test]
    fn clear_container_destroys_whole_hierarchies() {
        let mut scene = Scene::new();
        let target = scene.get_or_create_container("Generated");
        let root = scene.add_object(Object::new("instance"));
        let child = scene.add_child(root, Object::new("leaf"));
        scene.link_to_container(target, root);
        scene.link_to_container(target, child);
        assert_eq!(scene.container_members(target).len(), 2);

        scene.clear_container(target);
        assert!(scene.container_members(target).is_empty());
        assert!(scene.object(root).is_none());
        assert!(scene.object(child).is_none());
    }

    #[test]
    fn relinking_moves_ownership_between_containers() {
        let mut scene = Scene::new();
        let a = scene.get_or_create_container("A");
        let b = scene.get_or_create_container("B");
        let obj = scene.add_object(Object::new("x"));
        scene.link_to_container(a, obj);
        scene.link_to_container(b, obj);
        assert!(scene.container_members(a).is_empty());
        assert_eq!(scene.container_members(b), &[obj]);
        assert_eq!(scene.object(obj).unwrap().container(), Some(b));
    }

    #[test]
    fn world_transform_composes_through_parents() {
        let mut scene = Scene::new();
        let root = scene.add_object(
            Object::new("root")
                .with_transform(Transform::from_translation(Vec3::new(10.0, 0.0, 0.0))),
        );
        let child = scene.add_child(
            root,
            Object::new("child")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 2.0, 0.0))),
        );
        let world = scene.world_transform(child);
        let p = world.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(10.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn cast_ray_hits_nearest_object() {
        let mut scene = Scene::new();
        let terrain = flat_terrain(&mut scene, 10.0);
        let roof = scene.add_object(
            Object::new("roof")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)))
                .with_mesh(Mesh::plane(2.0)),
        );

        let hit = scene
            .cast_ray(Vec3::new(0.0, 0.0, 100.0), Vec3::NEG_Z, None)
            .expect("hit");
        assert_eq!(hit.object, roof);

        let hit = scene
            .cast_ray(Vec3::new(5.0, 5.0, 100.0), Vec3::NEG_Z, None)
            .expect("hit");
        assert_eq!(hit.object, terrain);
    }

    #[test]
    fn cast_ray_skips_excluded_container() {
        let mut scene = Scene::new();
        let terrain = flat_terrain(&mut scene, 10.0);
        let target = scene.get_or_create_container("Generated");
        let shadow = scene.add_object(
            Object::new("shadow")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)))
                .with_mesh(Mesh::plane(10.0)),
        );
        scene.link_to_container(target, shadow);

        let hit = scene
            .cast_ray(Vec3::new(0.0, 0.0, 100.0), Vec3::NEG_Z, Some(target))
            .expect("hit");
        assert_eq!(hit.object, terrain);
        assert!(hit.point.z.abs() < 1e-4);
    }

    #[test]
    fn cast_ray_respects_object_transforms() {
        let mut scene = Scene::new();
        let terrain = scene.add_object(
            Object::new("Plane")
                .with_transform(
                    Transform::from_translation(Vec3::new(0.0, 0.0, 3.0)).with_uniform_scale(0.5),
                )
                .with_mesh(Mesh::plane(10.0)),
        );

        // Scaled to half extent 5; x = 6 misses, x = 4 hits at z = 3.
        assert!(scene
            .cast_ray(Vec3::new(6.0, 0.0, 100.0), Vec3::NEG_Z, None)
            .is_none());
        let hit = scene
            .cast_ray(Vec3::new(4.0, 0.0, 100.0), Vec3::NEG_Z, None)
            .expect("hit");
        assert_eq!(hit.object, terrain);
        assert!((hit.point.z - 3.0).abs() < 1e-4);
    }
}
