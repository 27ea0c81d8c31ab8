//! Event types and sinks for observing scatter runs.
//!
//! Sinks receive [`ScatterEvent`]s while
//! [`crate::scatter::runner::run_request`] executes: run start/finish, every
//! rejected candidate with its reason, and every placement made.
use glam::Vec2;

use crate::scatter::request::PlacementRequest;
use crate::scatter::runner::{Placement, PlacementResult};

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// The vertical ray missed the surface (or hit something else first).
    SurfaceMiss,
    /// The forbidden-zone weight at the hit face exceeded the threshold.
    ForbiddenZone { weight: f32 },
    /// The candidate was closer than the minimum distance to an accepted
    /// placement.
    TooClose,
}

/// Events emitted during a scatter run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScatterEvent {
    /// Emitted once after validation, before the sampling loop.
    RunStarted {
        request: PlacementRequest,
        max_attempts: usize,
    },

    /// Emitted for every rejected candidate.
    CandidateRejected {
        /// 1-based attempt number within the run.
        attempt: usize,
        /// Candidate position in the sampling plane.
        candidate: Vec2,
        reason: RejectReason,
    },

    /// Emitted for every accepted placement.
    PlacementMade {
        /// 1-based attempt number within the run.
        attempt: usize,
        placement: Placement,
    },

    /// Emitted once when the run terminates.
    RunFinished { result: PlacementResult },
}

/// Discriminant of [`ScatterEvent`], used by sinks to opt out of events
/// they do not consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterEventKind {
    RunStarted,
    CandidateRejected,
    PlacementMade,
    RunFinished,
}

impl ScatterEvent {
    pub fn kind(&self) -> ScatterEventKind {
        match self {
            ScatterEvent::RunStarted { .. } => ScatterEventKind::RunStarted,
            ScatterEvent::CandidateRejected { .. } => ScatterEventKind::CandidateRejected,
            ScatterEvent::PlacementMade { .. } => ScatterEventKind::PlacementMade,
            ScatterEvent::RunFinished { .. } => ScatterEventKind::RunFinished,
        }
    }
}

/// A generic event sink that accepts [`ScatterEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ScatterEvent);

    /// Whether the sink wants events of this kind; the runner skips building
    /// events nobody consumes.
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        true
    }
}

/// No-op sink.
impl EventSink for () {
    fn send(&mut self, _event: ScatterEvent) {}

    fn wants(&self, _kind: ScatterEventKind) -> bool {
        false
    }
}

/// Collects every event into a vector.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<ScatterEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ScatterEvent] {
        &self.events
    }

    pub fn into_inner(self) -> Vec<ScatterEvent> {
        self.events
    }
}

impl EventSink for VecSink {
    fn send(&mut self, event: ScatterEvent) {
        self.events.push(event);
    }
}

/// Forwards every event to a closure.
pub struct FnSink<F: FnMut(ScatterEvent)> {
    f: F,
}

impl<F: FnMut(ScatterEvent)> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(ScatterEvent)> EventSink for FnSink<F> {
    fn send(&mut self, event: ScatterEvent) {
        (self.f)(event);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn sample_event() -> ScatterEvent {
        ScatterEvent::PlacementMade {
            attempt: 3,
            placement: Placement {
                position: Vec3::ZERO,
                yaw_degrees: 0.0,
                scale: 1.0,
            },
        }
    }

    #[test]
    fn unit_sink_wants_nothing() {
        let sink = ();
        assert!(!sink.wants(ScatterEventKind::PlacementMade));
        assert!(!sink.wants(ScatterEventKind::CandidateRejected));
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink = VecSink::new();
        assert!(sink.wants(ScatterEventKind::RunStarted));
        sink.send(sample_event());
        sink.send(ScatterEvent::CandidateRejected {
            attempt: 4,
            candidate: Vec2::ZERO,
            reason: RejectReason::TooClose,
        });
        let events = sink.into_inner();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), ScatterEventKind::PlacementMade);
        assert_eq!(events[1].kind(), ScatterEventKind::CandidateRejected);
    }

    #[test]
    fn fn_sink_forwards_to_closure() {
        let mut placements = 0;
        let mut sink = FnSink::new(|event| {
            if matches!(event, ScatterEvent::PlacementMade { .. }) {
                placements += 1;
            }
        });
        sink.send(sample_event());
        sink.send(sample_event());
        drop(sink);
        assert_eq!(placements, 2);
    }
}
