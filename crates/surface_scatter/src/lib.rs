#![forbid(unsafe_code)]
//! surface_scatter: terrain-aware object scattering via rejection sampling.
//!
//! Modules:
//! - scene: in-memory objects, hierarchies, containers, and ray casting
//! - surface: vertical ray queries against a designated surface
//! - field: weight-field evaluation over mesh faces (mean or max)
//! - sampling: candidate generation for the rejection loop
//! - scatter: request configuration, spacing, replication, events, runner
//!
//! A run draws candidate points over a square area, projects them onto the
//! surface, filters them by forbidden-zone weight and minimum spacing, and
//! replicates a template hierarchy at each accepted placement into a named,
//! clearable container. Runs are deterministic for a given random seed.
pub mod error;
pub mod field;
pub mod sampling;
pub mod scatter;
pub mod scene;
pub mod surface;

/// Convenient re-exports for common types. Import with `use surface_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::{face_weight, FieldAggregate};
    pub use crate::sampling::{CandidateSampling, UniformSquareSampling};
    pub use crate::scatter::events::{
        EventSink, FnSink, RejectReason, ScatterEvent, ScatterEventKind, VecSink,
    };
    pub use crate::scatter::replicate::{
        instantiate_snapshot, replicate, snapshot_template, TemplateSnapshot,
    };
    pub use crate::scatter::request::PlacementRequest;
    pub use crate::scatter::runner::{run_request, Placement, PlacementResult, ScatterRunner};
    pub use crate::scatter::spacing::SpacingIndex;
    pub use crate::scatter::DEFAULT_ATTEMPTS_MULTIPLIER;
    pub use crate::scene::{
        ContainerId, Face, FaceId, Mesh, Object, ObjectId, RayHit, Scene, Transform, VertexId,
    };
    pub use crate::surface::{SurfaceHit, SurfaceQuery};
}
