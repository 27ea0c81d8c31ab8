//! Template replication: snapshot a rooted hierarchy, then instantiate
//! copies of it at accepted placements.
//!
//! Replication is a pure data transform (capture the template as a tree of
//! names, relative transforms, and shared meshes) followed by one linking
//! side effect (building the copy in the scene and handing every copied
//! object to the target container).
use std::sync::Arc;

use glam::Vec3;

use crate::scatter::runner::Placement;
use crate::scene::{ContainerId, Mesh, Object, ObjectId, Scene, Transform};

/// A detached copy of a template hierarchy.
///
/// Child transforms are relative to their parent, exactly as stored in the
/// scene; meshes are shared, not duplicated.
#[derive(Debug, Clone)]
pub struct TemplateSnapshot {
    pub name: String,
    pub transform: Transform,
    mesh: Option<Arc<Mesh>>,
    pub children: Vec<TemplateSnapshot>,
}

impl TemplateSnapshot {
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_deref()
    }
}

/// Captures the template rooted at `root` as pure data.
pub fn snapshot_template(scene: &Scene, root: ObjectId) -> TemplateSnapshot {
    let object = scene.object(root).expect("template object exists");
    TemplateSnapshot {
        name: object.name.clone(),
        transform: object.transform,
        mesh: object.shared_mesh(),
        children: object
            .children()
            .iter()
            .map(|&child| snapshot_template(scene, child))
            .collect(),
    }
}

/// Builds one instance of the snapshot in the scene.
///
/// The placement's position, yaw, and uniform scale replace the transform of
/// the root only; children keep their stored relative transforms and inherit
/// the root's transform compositionally. Every copied object is linked into
/// `target`.
pub fn instantiate_snapshot(
    scene: &mut Scene,
    snapshot: &TemplateSnapshot,
    placement: &Placement,
    target: ContainerId,
) -> ObjectId {
    let root_transform = Transform {
        translation: placement.position,
        yaw_degrees: placement.yaw_degrees,
        scale: Vec3::splat(placement.scale),
    };
    let root = scene.add_object(
        Object::new(snapshot.name.clone())
            .with_transform(root_transform)
            .with_shared_mesh(snapshot.mesh.clone()),
    );
    scene.link_to_container(target, root);
    for child in &snapshot.children {
        instantiate_child(scene, child, root, target);
    }
    root
}

fn instantiate_child(
    scene: &mut Scene,
    snapshot: &TemplateSnapshot,
    parent: ObjectId,
    target: ContainerId,
) {
    let id = scene.add_child(
        parent,
        Object::new(snapshot.name.clone())
            .with_transform(snapshot.transform)
            .with_shared_mesh(snapshot.mesh.clone()),
    );
    scene.link_to_container(target, id);
    for child in &snapshot.children {
        instantiate_child(scene, child, id, target);
    }
}

/// Snapshot-and-instantiate in one step.
pub fn replicate(
    scene: &mut Scene,
    template: ObjectId,
    placement: &Placement,
    target: ContainerId,
) -> ObjectId {
    let snapshot = snapshot_template(scene, template);
    instantiate_snapshot(scene, &snapshot, placement, target)
}
