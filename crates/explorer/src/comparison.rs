use foundation::math::{LatLng, great_circle_km};
use layers::{LayerId, LineStyle, MarkerStyle};
use scene::OccurrenceId;
use serde::Serialize;
use tracing::debug;

use crate::ports::{ComparisonView, MapSurface};

/// One end of a distance measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPoint {
    pub label: String,
    pub position: LatLng,
    /// `None` for a free click on the map.
    pub occurrence: Option<OccurrenceId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonPhase {
    Idle,
    AwaitingFirstPoint,
    AwaitingSecondPoint {
        first: ComparisonPoint,
    },
    /// Result on screen until the scheduled reset fires or the user toggles.
    Measured {
        first: ComparisonPoint,
        second: ComparisonPoint,
        distance_km: f64,
    },
}

/// Timer the host must arm after a measurement. Firing it with a token that
/// is no longer current does nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledReset {
    pub token: u64,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonStep {
    First(ComparisonPoint),
    Measured {
        first: ComparisonPoint,
        second: ComparisonPoint,
        distance_km: f64,
        reset: ScheduledReset,
    },
}

impl ComparisonStep {
    pub fn view(&self) -> ComparisonView {
        match self {
            ComparisonStep::First(point) => ComparisonView::AwaitingSecondPoint {
                first: point.label.clone(),
            },
            ComparisonStep::Measured {
                first,
                second,
                distance_km,
                ..
            } => ComparisonView::Measured {
                from: first.label.clone(),
                to: second.label.clone(),
                distance_km: *distance_km,
            },
        }
    }
}

/// Two-click great-circle distance measurement.
///
/// `Idle -> AwaitingFirstPoint -> AwaitingSecondPoint -> Measured -> Idle`.
/// Every exit to `Idle` removes the highlights and the line.
#[derive(Debug)]
pub struct ComparisonSession {
    phase: ComparisonPhase,
    layers: Vec<LayerId>,
    generation: u64,
    reset_delay_ms: u32,
}

impl ComparisonSession {
    pub fn new(reset_delay_ms: u32) -> Self {
        Self {
            phase: ComparisonPhase::Idle,
            layers: Vec::new(),
            generation: 0,
            reset_delay_ms,
        }
    }

    pub fn phase(&self) -> &ComparisonPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != ComparisonPhase::Idle
    }

    /// Label for a click that did not hit a marker.
    pub fn free_point_label(&self) -> String {
        let n = match self.phase {
            ComparisonPhase::AwaitingSecondPoint { .. } => 2,
            _ => 1,
        };
        format!("Point {n}")
    }

    pub fn start<M: MapSurface>(&mut self, map: &mut M) {
        self.clear_layers(map);
        self.generation += 1;
        self.phase = ComparisonPhase::AwaitingFirstPoint;
    }

    pub fn cancel<M: MapSurface>(&mut self, map: &mut M) {
        self.clear_layers(map);
        self.generation += 1;
        self.phase = ComparisonPhase::Idle;
    }

    /// Records a point. Ignored unless a point is awaited.
    pub fn select<M: MapSurface>(
        &mut self,
        map: &mut M,
        point: ComparisonPoint,
    ) -> Option<ComparisonStep> {
        match std::mem::replace(&mut self.phase, ComparisonPhase::Idle) {
            ComparisonPhase::AwaitingFirstPoint => {
                self.highlight(map, point.position);
                self.phase = ComparisonPhase::AwaitingSecondPoint {
                    first: point.clone(),
                };
                Some(ComparisonStep::First(point))
            }
            ComparisonPhase::AwaitingSecondPoint { first } => {
                self.highlight(map, point.position);
                let distance_km = great_circle_km(first.position, point.position);
                let line = map.add_line(first.position, point.position, &LineStyle::distance());
                self.layers.push(line);
                debug!(distance_km, "comparison measured");

                self.phase = ComparisonPhase::Measured {
                    first: first.clone(),
                    second: point.clone(),
                    distance_km,
                };
                Some(ComparisonStep::Measured {
                    first,
                    second: point,
                    distance_km,
                    reset: ScheduledReset {
                        token: self.generation,
                        delay_ms: self.reset_delay_ms,
                    },
                })
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Closes a measured session if `token` is still current. Returns `true`
    /// when the session closed.
    pub fn expire<M: MapSurface>(&mut self, map: &mut M, token: u64) -> bool {
        let current = matches!(self.phase, ComparisonPhase::Measured { .. })
            && token == self.generation;
        if current {
            self.cancel(map);
        }
        current
    }

    fn highlight<M: MapSurface>(&mut self, map: &mut M, at: LatLng) {
        let id = map.add_highlight(at, &MarkerStyle::comparison_highlight());
        self.layers.push(id);
    }

    fn clear_layers<M: MapSurface>(&mut self, map: &mut M) {
        for id in self.layers.drain(..) {
            map.remove_layer(id);
        }
    }
}
