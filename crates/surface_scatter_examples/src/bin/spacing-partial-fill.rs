use rand::rngs::StdRng;
use rand::SeedableRng;
use surface_scatter::prelude::*;
use surface_scatter_examples::init_tracing;

/// Requests more instances than the spacing constraint allows and breaks the
/// rejections down by reason, using an event sink.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut scene = Scene::new();
    scene.add_object(Object::new("Plane").with_mesh(Mesh::plane(8.0)));
    scene.add_object(Object::new("tree"));

    // A 12x12 area cannot hold 200 placements 2.0 apart.
    let request = PlacementRequest::new("Plane", "tree", "Generated_Trees")
        .with_count(200)
        .with_area(6.0)
        .without_weight_filter()
        .with_min_distance(2.0);

    let mut misses = 0usize;
    let mut too_close = 0usize;
    let mut sink = FnSink::new(|event| {
        if let ScatterEvent::CandidateRejected { reason, .. } = event {
            match reason {
                RejectReason::SurfaceMiss => misses += 1,
                RejectReason::TooClose => too_close += 1,
                RejectReason::ForbiddenZone { .. } => {}
            }
        }
    });

    let mut rng = StdRng::seed_from_u64(99);
    let result = run_request(
        &mut scene,
        &request,
        &UniformSquareSampling,
        &mut rng,
        Some(&mut sink),
    )?;
    drop(sink);

    println!(
        "placed {}/{} in {} attempts (budget {}); rejected: {} too close, {} surface misses",
        result.accepted(),
        request.count,
        result.attempts,
        request.max_attempts(),
        too_close,
        misses
    );

    Ok(())
}
