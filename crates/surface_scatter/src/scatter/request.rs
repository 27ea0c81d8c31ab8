//! Immutable configuration for one scatter run.
use crate::error::{Error, Result};
use crate::field::FieldAggregate;
use crate::scatter::DEFAULT_ATTEMPTS_MULTIPLIER;

/// Configuration for scattering instances of a template across a surface.
///
/// Scene-independent fields are validated by [`PlacementRequest::validate`];
/// the runner resolves and checks the named scene objects before any
/// mutation.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementRequest {
    /// Name of the surface object to scatter onto.
    pub surface: String,
    /// Name of the template object to replicate.
    pub template: String,
    /// Name of the container receiving the generated instances.
    pub target: String,
    /// Desired number of instances.
    pub count: usize,
    /// Half-extent of the square sampling area around the origin.
    pub area: f32,
    /// Height the vertical rays are cast from.
    pub z_start: f32,
    /// Lower bound of the uniform scale range.
    pub min_scale: f32,
    /// Upper bound of the uniform scale range.
    pub max_scale: f32,
    /// Whether candidates are filtered against a weight field.
    pub use_weight_filter: bool,
    /// Name of the forbidden-zone weight field on the surface.
    pub field_name: String,
    /// Candidates whose face weight exceeds this are rejected.
    pub path_threshold: f32,
    /// Minimum distance between accepted placements; 0 disables the check.
    pub min_distance: f32,
    /// How face vertex weights are aggregated.
    pub aggregate: FieldAggregate,
    /// Attempt budget is `count * attempts_multiplier`.
    pub attempts_multiplier: usize,
}

impl PlacementRequest {
    /// Creates a request with the default tree-scatter tuning.
    pub fn new(
        surface: impl Into<String>,
        template: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            surface: surface.into(),
            template: template.into(),
            target: target.into(),
            count: 40,
            area: 6.0,
            z_start: 1000.0,
            min_scale: 0.7,
            max_scale: 1.2,
            use_weight_filter: true,
            field_name: "NoTrees".to_owned(),
            path_threshold: 0.5,
            min_distance: 1.5,
            aggregate: FieldAggregate::default(),
            attempts_multiplier: DEFAULT_ATTEMPTS_MULTIPLIER,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_area(mut self, area: f32) -> Self {
        self.area = area;
        self
    }

    pub fn with_z_start(mut self, z_start: f32) -> Self {
        self.z_start = z_start;
        self
    }

    pub fn with_scale_range(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Enables weight filtering against the named field with the given
    /// rejection threshold.
    pub fn with_weight_filter(mut self, field_name: impl Into<String>, threshold: f32) -> Self {
        self.use_weight_filter = true;
        self.field_name = field_name.into();
        self.path_threshold = threshold;
        self
    }

    pub fn without_weight_filter(mut self) -> Self {
        self.use_weight_filter = false;
        self
    }

    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    pub fn with_aggregate(mut self, aggregate: FieldAggregate) -> Self {
        self.aggregate = aggregate;
        self
    }

    pub fn with_attempts_multiplier(mut self, attempts_multiplier: usize) -> Self {
        self.attempts_multiplier = attempts_multiplier;
        self
    }

    /// Total candidate-draw budget for the run.
    pub fn max_attempts(&self) -> usize {
        self.count.saturating_mul(self.attempts_multiplier)
    }

    /// Checks the scene-independent parts of the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.min_scale > self.max_scale {
            return Err(Error::InvalidScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(Error::InvalidConfig("area must be > 0".into()));
        }
        if !self.z_start.is_finite() {
            return Err(Error::InvalidConfig("z_start must be finite".into()));
        }
        if self.min_distance < 0.0 {
            return Err(Error::InvalidConfig("min_distance must be >= 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlacementRequest {
        PlacementRequest::new("Plane", "tree", "Generated_Trees")
    }

    #[test]
    fn defaults_match_tree_tuning() {
        let r = request();
        assert_eq!(r.count, 40);
        assert_eq!(r.area, 6.0);
        assert_eq!(r.z_start, 1000.0);
        assert_eq!((r.min_scale, r.max_scale), (0.7, 1.2));
        assert!(r.use_weight_filter);
        assert_eq!(r.field_name, "NoTrees");
        assert_eq!(r.path_threshold, 0.5);
        assert_eq!(r.min_distance, 1.5);
        assert_eq!(r.aggregate, FieldAggregate::Mean);
        assert_eq!(r.max_attempts(), 1600);
    }

    #[test]
    fn validate_rejects_inverted_scale_range() {
        let r = request().with_scale_range(1.5, 0.5);
        assert!(matches!(
            r.validate(),
            Err(Error::InvalidScaleRange { min, max }) if min == 1.5 && max == 0.5
        ));
    }

    #[test]
    fn validate_rejects_bad_area_and_distance() {
        assert!(request().with_area(0.0).validate().is_err());
        assert!(request().with_area(f32::NAN).validate().is_err());
        assert!(request().with_min_distance(-1.0).validate().is_err());
        assert!(request().validate().is_ok());
    }

    #[test]
    fn builders_compose() {
        let r = request()
            .with_count(10)
            .with_attempts_multiplier(5)
            .with_aggregate(FieldAggregate::Max)
            .without_weight_filter();
        assert_eq!(r.max_attempts(), 50);
        assert_eq!(r.aggregate, FieldAggregate::Max);
        assert!(!r.use_weight_filter);
    }
}
