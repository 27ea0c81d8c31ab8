use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use surface_scatter::prelude::*;
use surface_scatter_examples::{init_tracing, render_placements_to_png, RenderConfig};

/// Scatters trees and bushes onto a flat terrain, each profile into its own
/// container, and renders the combined result top-down.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut scene = Scene::new();
    scene.add_object(Object::new("Plane").with_mesh(Mesh::grid(8.0, 8)));

    // Multi-part tree: trunk and crown scatter as one rigid unit.
    let tree = scene.add_object(Object::new("tree"));
    scene.add_child(
        tree,
        Object::new("trunk").with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 0.5))),
    );
    scene.add_child(
        tree,
        Object::new("crown").with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 2.0))),
    );
    scene.add_object(Object::new("Bush"));

    let trees = PlacementRequest::new("Plane", "tree", "Generated_Trees")
        .with_count(40)
        .with_area(6.0)
        .without_weight_filter()
        .with_min_distance(1.5);
    let bushes = PlacementRequest::new("Plane", "Bush", "Generated_Bushes")
        .with_count(20)
        .with_area(6.0)
        .with_scale_range(0.4, 0.8)
        .without_weight_filter()
        .with_min_distance(1.0);

    let mut rng = StdRng::seed_from_u64(2026);
    let mut runner = ScatterRunner::new(&mut scene);
    let tree_result = runner.run(&trees, &mut rng)?;
    let bush_result = runner.run(&bushes, &mut rng)?;

    let config = RenderConfig::new((800, 800), 8.0);
    let mut placements = tree_result.placements.clone();
    placements.extend(bush_result.placements.iter().copied());
    render_placements_to_png(&placements, &config, "scatter-trees-basic.png")?;

    Ok(())
}
