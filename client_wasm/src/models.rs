//! Visual proxies for the rider and props
//!
//! Every kind starts as placeholder geometry and is swapped to the loaded
//! model once the page reports a successful load. The simulation never
//! looks at these.

use std::str::FromStr;

/// Things the page draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Rider,
    Pickup,
    Obstacle,
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rider" | "bike" | "bicycle" => Ok(ModelKind::Rider),
            "pickup" => Ok(ModelKind::Pickup),
            "obstacle" => Ok(ModelKind::Obstacle),
            other => Err(format!("unknown model kind {other:?}")),
        }
    }
}

/// Fallback geometry with the same footprint as the real model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placeholder {
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32 },
}

impl Placeholder {
    pub fn for_kind(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Rider => Placeholder::Box {
                width: 1.0,
                height: 0.6,
                depth: 2.2,
            },
            ModelKind::Pickup => Placeholder::Cylinder {
                radius: 0.35,
                height: 0.4,
            },
            ModelKind::Obstacle => Placeholder::Box {
                width: 1.2,
                height: 0.6,
                depth: 1.2,
            },
        }
    }

    /// Flat `[w, h, d]` (box) or `[r, h]` (cylinder) for the page
    pub fn dims(&self) -> Vec<f32> {
        match *self {
            Placeholder::Box {
                width,
                height,
                depth,
            } => vec![width, height, depth],
            Placeholder::Cylinder { radius, height } => vec![radius, height],
        }
    }
}

/// Load progress for one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

/// Which visual each kind is currently using
#[derive(Debug, Clone)]
pub struct ModelSlots {
    slots: [(ModelKind, LoadState); 3],
}

impl ModelSlots {
    pub fn new() -> Self {
        Self {
            slots: [
                (ModelKind::Rider, LoadState::Pending),
                (ModelKind::Pickup, LoadState::Pending),
                (ModelKind::Obstacle, LoadState::Pending),
            ],
        }
    }

    pub fn state(&self, kind: ModelKind) -> LoadState {
        self.slots
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, state)| *state)
            .unwrap_or(LoadState::Pending)
    }

    /// Settle a pending slot. Returns false if it was already settled.
    fn settle(&mut self, kind: ModelKind, outcome: LoadState) -> bool {
        for (k, state) in self.slots.iter_mut() {
            if *k == kind && *state == LoadState::Pending {
                *state = outcome;
                return true;
            }
        }
        false
    }

    pub fn loaded(&mut self, kind: ModelKind) {
        if self.settle(kind, LoadState::Loaded) {
            tracing::debug!(?kind, "model loaded, swapping out placeholder");
        } else {
            tracing::debug!(?kind, "ignoring late load report");
        }
    }

    pub fn failed(&mut self, kind: ModelKind) {
        if self.settle(kind, LoadState::Failed) {
            tracing::warn!(?kind, "model failed to load, keeping placeholder");
        }
    }

    pub fn uses_model(&self, kind: ModelKind) -> bool {
        self.state(kind) == LoadState::Loaded
    }
}

impl Default for ModelSlots {
    fn default() -> Self {
        Self::new()
    }
}
