//! Rejection-sampling runner: resolves candidates onto the surface, filters
//! them, and materializes accepted placements into the target container.
use glam::{Vec2, Vec3};
use rand::RngCore;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::field::face_weight;
use crate::sampling::{rand01, CandidateSampling, UniformSquareSampling};
use crate::scatter::events::{EventSink, RejectReason, ScatterEvent, ScatterEventKind};
use crate::scatter::replicate::{instantiate_snapshot, snapshot_template};
use crate::scatter::request::PlacementRequest;
use crate::scatter::spacing::SpacingIndex;
use crate::scene::Scene;
use crate::surface::SurfaceQuery;

/// An accepted sample: world position, yaw, and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// World-space position on the surface.
    pub position: Vec3,
    /// Yaw about +Z in `[0, 360)` degrees.
    pub yaw_degrees: f32,
    /// Uniform scale in `[min_scale, max_scale)`, applied to all axes.
    pub scale: f32,
}

/// Result of a scatter run.
///
/// Fewer placements than requested is a partial success, not an error; the
/// attempts count tells the caller how much of the budget was spent.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementResult {
    /// Accepted placements, in acceptance order.
    pub placements: Vec<Placement>,
    /// Total candidate draws made, including rejected ones.
    pub attempts: usize,
}

impl PlacementResult {
    /// Number of accepted placements.
    pub fn accepted(&self) -> usize {
        self.placements.len()
    }
}

/// Convenience wrapper binding a scene to a candidate sampling strategy.
pub struct ScatterRunner<'a> {
    pub scene: &'a mut Scene,
    sampling: Box<dyn CandidateSampling>,
}

impl<'a> ScatterRunner<'a> {
    pub fn new(scene: &'a mut Scene) -> Self {
        Self {
            scene,
            sampling: Box::new(UniformSquareSampling),
        }
    }

    pub fn with_sampling<S: CandidateSampling + 'static>(mut self, sampling: S) -> Self {
        self.sampling = Box::new(sampling);
        self
    }

    pub fn run(
        &mut self,
        request: &PlacementRequest,
        rng: &mut impl RngCore,
    ) -> Result<PlacementResult> {
        run_request(self.scene, request, self.sampling.as_ref(), rng, None)
    }

    pub fn run_with_events(
        &mut self,
        request: &PlacementRequest,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<PlacementResult> {
        run_request(self.scene, request, self.sampling.as_ref(), rng, Some(sink))
    }
}

/// Executes one scatter run.
///
/// Validation happens before any mutation: if the configuration is bad or a
/// named object is missing, the target container is left untouched. On
/// success the container holds exactly this run's instances.
pub fn run_request<R: RngCore>(
    scene: &mut Scene,
    request: &PlacementRequest,
    sampling: &dyn CandidateSampling,
    rng: &mut R,
    sink: Option<&mut dyn EventSink>,
) -> Result<PlacementResult> {
    if let Some(s) = sink {
        run_request_internal(scene, request, sampling, rng, s)
    } else {
        run_request_internal(scene, request, sampling, rng, &mut ())
    }
}

fn run_request_internal<R: RngCore>(
    scene: &mut Scene,
    request: &PlacementRequest,
    sampling: &dyn CandidateSampling,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<PlacementResult> {
    request.validate()?;

    let surface = scene
        .find_object_by_name(&request.surface)
        .ok_or_else(|| Error::SurfaceNotFound {
            name: request.surface.clone(),
        })?;
    let surface_mesh = scene
        .object(surface)
        .and_then(|obj| obj.shared_mesh())
        .filter(|mesh| mesh.is_valid())
        .ok_or_else(|| Error::NotASurface {
            name: request.surface.clone(),
        })?;
    let template = scene
        .find_object_by_name(&request.template)
        .ok_or_else(|| Error::TemplateNotFound {
            name: request.template.clone(),
        })?;

    // Validation is done; from here the run owns the target container.
    let target = scene.get_or_create_container(&request.target);
    scene.clear_container(target);

    let snapshot = snapshot_template(scene, template);
    let max_attempts = request.max_attempts();

    info!(
        "Scattering up to {} instances of '{}' onto '{}' into '{}'.",
        request.count, request.template, request.surface, request.target
    );
    if sink.wants(ScatterEventKind::RunStarted) {
        sink.send(ScatterEvent::RunStarted {
            request: request.clone(),
            max_attempts,
        });
    }

    let mut spacing = SpacingIndex::new(request.min_distance);
    let mut placements: Vec<Placement> = Vec::new();
    let mut attempts = 0usize;

    while placements.len() < request.count && attempts < max_attempts {
        attempts += 1;

        let candidate = Vec2::from(sampling.next(request.area, rng));

        let hit = SurfaceQuery::new(scene, surface)
            .with_excluded_container(target)
            .query(candidate.x, candidate.y, request.z_start);
        let Some(hit) = hit else {
            reject(sink, attempts, candidate, RejectReason::SurfaceMiss);
            continue;
        };

        if request.use_weight_filter {
            let weight = face_weight(
                &surface_mesh,
                &request.field_name,
                hit.face,
                request.aggregate,
            );
            if weight > request.path_threshold {
                reject(
                    sink,
                    attempts,
                    candidate,
                    RejectReason::ForbiddenZone { weight },
                );
                continue;
            }
        }

        if !spacing.is_clear(hit.point) {
            reject(sink, attempts, candidate, RejectReason::TooClose);
            continue;
        }
        spacing.insert(hit.point);

        let placement = Placement {
            position: hit.point,
            yaw_degrees: rand01(rng) * 360.0,
            scale: request.min_scale + rand01(rng) * (request.max_scale - request.min_scale),
        };
        instantiate_snapshot(scene, &snapshot, &placement, target);

        if sink.wants(ScatterEventKind::PlacementMade) {
            sink.send(ScatterEvent::PlacementMade {
                attempt: attempts,
                placement,
            });
        }
        placements.push(placement);
    }

    if placements.len() < request.count {
        warn!(
            "Attempt budget exhausted: placed {}/{} after {} attempts.",
            placements.len(),
            request.count,
            attempts
        );
    } else {
        info!(
            "Placed {}/{} after {} attempts.",
            placements.len(),
            request.count,
            attempts
        );
    }

    let result = PlacementResult {
        placements,
        attempts,
    };
    if sink.wants(ScatterEventKind::RunFinished) {
        sink.send(ScatterEvent::RunFinished {
            result: result.clone(),
        });
    }
    Ok(result)
}

fn reject(sink: &mut dyn EventSink, attempt: usize, candidate: Vec2, reason: RejectReason) {
    if sink.wants(ScatterEventKind::CandidateRejected) {
        sink.send(ScatterEvent::CandidateRejected {
            attempt,
            candidate,
            reason,
        });
    }
}
