use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::ChartOptions;
use crate::core::{ChartKind, SeriesSet, TimeUnit};

/// Failure reported by a rendering engine for one call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Engine entry points, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineOperation {
    Construct,
    Mutate,
    Redraw,
    Destroy,
}

impl fmt::Display for EngineOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Construct => "construct",
            Self::Mutate => "mutate",
            Self::Redraw => "redraw",
            Self::Destroy => "destroy",
        })
    }
}

/// Redraw strategy requested after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedrawMode {
    /// Run the engine's configured transitions.
    #[default]
    Animated,
    /// Repaint the final state directly, without transitions.
    Immediate,
}

/// In-place change applied to a live chart.
///
/// `data` carries the label axis and all four series together so an engine
/// swaps them in one step and never exposes misaligned buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPatch {
    /// Present only when the chart kind changes.
    pub kind: Option<ChartKind>,
    pub time_unit: TimeUnit,
    pub data: SeriesSet,
}

/// Contract implemented by the drawing backend that owns chart objects.
///
/// The controller constructs one chart per mounted view and afterwards only
/// mutates and redraws it until the view goes away.
pub trait RenderingEngine {
    /// Drawing target a chart is bound to.
    type Surface;
    /// Opaque reference to a live chart.
    type Handle: Copy + Eq + fmt::Debug;

    fn construct(
        &mut self,
        surface: &Self::Surface,
        options: &ChartOptions,
    ) -> Result<Self::Handle, EngineError>;

    fn mutate(&mut self, handle: Self::Handle, patch: &ChartPatch) -> Result<(), EngineError>;

    fn redraw(&mut self, handle: Self::Handle, mode: RedrawMode) -> Result<(), EngineError>;

    fn destroy(&mut self, handle: Self::Handle) -> Result<(), EngineError>;
}
