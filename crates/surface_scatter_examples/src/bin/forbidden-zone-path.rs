use rand::rngs::StdRng;
use rand::SeedableRng;
use surface_scatter::prelude::*;
use surface_scatter_examples::{init_tracing, render_placements_to_png, RenderConfig};

/// Paints a path across the terrain as a weight field and scatters trees
/// that avoid it, once with mean aggregation and once with max.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut scene = Scene::new();
    let mut mesh = Mesh::grid(8.0, 16);
    // Vertical path of width 3 through the middle.
    let weights: Vec<f32> = mesh
        .vertices()
        .iter()
        .map(|v| if v.x.abs() < 1.5 { 1.0 } else { 0.0 })
        .collect();
    mesh.set_field("NoTrees", weights)?;
    scene.add_object(Object::new("Plane").with_mesh(mesh));
    scene.add_object(Object::new("tree"));

    let request = PlacementRequest::new("Plane", "tree", "Generated_Trees")
        .with_count(120)
        .with_area(7.0)
        .with_weight_filter("NoTrees", 0.5)
        .with_min_distance(0.8);

    let mut rng = StdRng::seed_from_u64(7);
    let mean = run_request(
        &mut scene,
        &request,
        &UniformSquareSampling,
        &mut rng,
        None,
    )?;

    let mut rng = StdRng::seed_from_u64(7);
    let strict = run_request(
        &mut scene,
        &request.clone().with_aggregate(FieldAggregate::Max),
        &UniformSquareSampling,
        &mut rng,
        None,
    )?;

    let config = RenderConfig::new((800, 800), 8.0).with_dot([220, 180, 90], 4.0);
    render_placements_to_png(&mean.placements, &config, "forbidden-zone-path-mean.png")?;
    render_placements_to_png(&strict.placements, &config, "forbidden-zone-path-max.png")?;

    println!(
        "mean: {}/{} placed ({} attempts); max: {}/{} placed ({} attempts)",
        mean.accepted(),
        request.count,
        mean.attempts,
        strict.accepted(),
        request.count,
        strict.attempts
    );

    Ok(())
}
