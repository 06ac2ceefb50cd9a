use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::api::{ChartOptions, ChartState};

use super::{ChartPatch, EngineError, EngineOperation, RedrawMode, RenderingEngine};

/// Identifier of a drawing target, such as a canvas element id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(String);

impl SurfaceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HeadlessHandle(u64);

/// Per-operation call counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineCallStats {
    pub construct_calls: u64,
    pub mutate_calls: u64,
    pub redraw_calls: u64,
    pub destroy_calls: u64,
}

impl EngineCallStats {
    fn record(&mut self, operation: EngineOperation) {
        match operation {
            EngineOperation::Construct => self.construct_calls += 1,
            EngineOperation::Mutate => self.mutate_calls += 1,
            EngineOperation::Redraw => self.redraw_calls += 1,
            EngineOperation::Destroy => self.destroy_calls += 1,
        }
    }
}

#[derive(Debug)]
struct HeadlessChart {
    surface: SurfaceId,
    state: ChartState,
    redraws: u64,
    last_redraw_mode: Option<RedrawMode>,
}

/// In-memory engine used by tests and headless hosts.
///
/// It keeps a real [`ChartState`] per live chart, refuses a second live chart
/// on the same surface, and can be told to reject upcoming calls.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    charts: IndexMap<HeadlessHandle, HeadlessChart>,
    next_handle: u64,
    stats: EngineCallStats,
    pending_failures: IndexMap<EngineOperation, u32>,
}

impl HeadlessEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `times` calls of `operation` fail.
    pub fn fail_next(&mut self, operation: EngineOperation, times: u32) {
        *self.pending_failures.entry(operation).or_default() += times;
    }

    #[must_use]
    pub fn stats(&self) -> EngineCallStats {
        self.stats
    }

    #[must_use]
    pub fn live_charts(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn state(&self, handle: HeadlessHandle) -> Option<&ChartState> {
        self.charts.get(&handle).map(|chart| &chart.state)
    }

    /// State of the only live chart, if exactly one exists.
    #[must_use]
    pub fn single_state(&self) -> Option<&ChartState> {
        match self.charts.len() {
            1 => self.charts.values().next().map(|chart| &chart.state),
            _ => None,
        }
    }

    #[must_use]
    pub fn surface(&self, handle: HeadlessHandle) -> Option<&SurfaceId> {
        self.charts.get(&handle).map(|chart| &chart.surface)
    }

    #[must_use]
    pub fn redraw_count(&self, handle: HeadlessHandle) -> u64 {
        self.charts.get(&handle).map_or(0, |chart| chart.redraws)
    }

    #[must_use]
    pub fn last_redraw_mode(&self, handle: HeadlessHandle) -> Option<RedrawMode> {
        self.charts
            .get(&handle)
            .and_then(|chart| chart.last_redraw_mode)
    }

    fn begin(&mut self, operation: EngineOperation) -> Result<(), EngineError> {
        self.stats.record(operation);
        match self.pending_failures.get_mut(&operation) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(EngineError::new(format!("injected {operation} failure")))
            }
            _ => Ok(()),
        }
    }

    fn chart_mut(&mut self, handle: HeadlessHandle) -> Result<&mut HeadlessChart, EngineError> {
        self.charts
            .get_mut(&handle)
            .ok_or_else(|| EngineError::new(format!("unknown chart handle {}", handle.0)))
    }
}

impl RenderingEngine for HeadlessEngine {
    type Surface = SurfaceId;
    type Handle = HeadlessHandle;

    fn construct(
        &mut self,
        surface: &SurfaceId,
        options: &ChartOptions,
    ) -> Result<HeadlessHandle, EngineError> {
        self.begin(EngineOperation::Construct)?;
        if self.charts.values().any(|chart| &chart.surface == surface) {
            return Err(EngineError::new(format!(
                "surface `{}` already has a live chart",
                surface.as_str()
            )));
        }
        let handle = HeadlessHandle(self.next_handle);
        self.next_handle += 1;
        self.charts.insert(
            handle,
            HeadlessChart {
                surface: surface.clone(),
                state: ChartState::from_options(options),
                redraws: 0,
                last_redraw_mode: None,
            },
        );
        trace!(handle = handle.0, surface = surface.as_str(), "headless chart constructed");
        Ok(handle)
    }

    fn mutate(&mut self, handle: HeadlessHandle, patch: &ChartPatch) -> Result<(), EngineError> {
        self.begin(EngineOperation::Mutate)?;
        self.chart_mut(handle)?.state.apply(patch);
        Ok(())
    }

    fn redraw(&mut self, handle: HeadlessHandle, mode: RedrawMode) -> Result<(), EngineError> {
        self.begin(EngineOperation::Redraw)?;
        let chart = self.chart_mut(handle)?;
        chart.redraws += 1;
        chart.last_redraw_mode = Some(mode);
        Ok(())
    }

    fn destroy(&mut self, handle: HeadlessHandle) -> Result<(), EngineError> {
        self.begin(EngineOperation::Destroy)?;
        self.charts
            .shift_remove(&handle)
            .map(|_| ())
            .ok_or_else(|| EngineError::new(format!("unknown chart handle {}", handle.0)))
    }
}
