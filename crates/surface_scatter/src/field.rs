//! Weight-field evaluation over mesh faces.
//!
//! A weight field is a named per-vertex scalar map on a [`Mesh`]. The weight
//! of a face is the aggregate of its vertex values, used by the sampler to
//! decide how "forbidden" a hit location is.
use crate::scene::{FaceId, Mesh};

/// How a face's vertex weights are combined into a single value.
///
/// `Mean` smooths sampling noise near field boundaries; `Max` gives hard
/// exclusion as soon as any vertex of the face is marked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldAggregate {
    #[default]
    Mean,
    Max,
}

/// Aggregated weight of `field_name` over the vertices of `face`, in `[0, 1]`.
///
/// A missing field, or a face id out of range, evaluates to `0.0` so that
/// filtering against an absent field is a no-op rather than a failure.
pub fn face_weight(mesh: &Mesh, field_name: &str, face: FaceId, aggregate: FieldAggregate) -> f32 {
    let Some(values) = mesh.field(field_name) else {
        return 0.0;
    };
    let Some(face) = mesh.faces().get(face) else {
        return 0.0;
    };
    if face.vertices.is_empty() {
        return 0.0;
    }

    let vertex_weights = face
        .vertices
        .iter()
        .map(|&v| values.get(v).copied().unwrap_or(0.0));

    let weight = match aggregate {
        FieldAggregate::Mean => {
            vertex_weights.sum::<f32>() / face.vertices.len() as f32
        }
        FieldAggregate::Max => vertex_weights.fold(0.0, f32::max),
    };

    weight.clamp(0.0, 1.0)
}
