use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ChartKind, TimeUnit, resolve_time_unit};
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartPatch, EngineError, EngineOperation, RedrawMode, RenderingEngine};

use super::{ChartOptions, UpdatePayload};

/// Public view of the controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Unmounted,
    Mounted,
    Destroyed,
}

/// Why a lifecycle call left the chart untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    NotMounted,
    AlreadyMounted,
    Destroyed,
}

/// Result of one applied refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedUpdate {
    pub kind: ChartKind,
    pub kind_changed: bool,
    pub time_unit: TimeUnit,
    pub points: usize,
    pub data_format_recovered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOutcome {
    Applied(AppliedUpdate),
    Skipped(SkipReason),
}

impl UpdateOutcome {
    #[must_use]
    pub fn applied(self) -> Option<AppliedUpdate> {
        match self {
            Self::Applied(applied) => Some(applied),
            Self::Skipped(_) => None,
        }
    }
}

/// What the controller last got the engine to accept.
#[derive(Debug, Clone, Copy)]
struct MountedChart<H> {
    handle: H,
    kind: ChartKind,
    time_unit: TimeUnit,
    points: usize,
}

#[derive(Debug)]
enum Lifecycle<H> {
    Unmounted,
    Mounted(MountedChart<H>),
    Destroyed,
}

/// Keeps one engine chart in sync with the host's interval data.
///
/// The chart is constructed once on mount, mutated in place and redrawn
/// without transitions on every update, and destroyed once on unmount.
/// `Destroyed` is terminal.
pub struct OeeChartController<E: RenderingEngine> {
    engine: E,
    options: ChartOptions,
    lifecycle: Lifecycle<E::Handle>,
}

impl<E: RenderingEngine> OeeChartController<E> {
    pub fn new(engine: E, options: ChartOptions) -> ChartResult<Self> {
        options.validate()?;
        Ok(Self {
            engine,
            options,
            lifecycle: Lifecycle::Unmounted,
        })
    }

    #[must_use]
    pub fn with_default_options(engine: E) -> Self {
        Self {
            engine,
            options: ChartOptions::default(),
            lifecycle: Lifecycle::Unmounted,
        }
    }

    #[must_use]
    pub fn lifecycle_state(&self) -> LifecycleState {
        match self.lifecycle {
            Lifecycle::Unmounted => LifecycleState::Unmounted,
            Lifecycle::Mounted(_) => LifecycleState::Mounted,
            Lifecycle::Destroyed => LifecycleState::Destroyed,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[must_use]
    pub fn into_engine(self) -> E {
        self.engine
    }

    #[must_use]
    pub fn handle(&self) -> Option<E::Handle> {
        self.mounted_chart().map(|chart| chart.handle)
    }

    #[must_use]
    pub fn current_kind(&self) -> Option<ChartKind> {
        self.mounted_chart().map(|chart| chart.kind)
    }

    #[must_use]
    pub fn current_time_unit(&self) -> Option<TimeUnit> {
        self.mounted_chart().map(|chart| chart.time_unit)
    }

    fn mounted_chart(&self) -> Option<&MountedChart<E::Handle>> {
        match &self.lifecycle {
            Lifecycle::Mounted(chart) => Some(chart),
            Lifecycle::Unmounted | Lifecycle::Destroyed => None,
        }
    }

    /// Constructs the chart on `surface` and renders `payload` into it.
    ///
    /// A failed construction leaves the controller unmounted.
    pub fn mount(
        &mut self,
        surface: &E::Surface,
        payload: &UpdatePayload,
    ) -> ChartResult<UpdateOutcome> {
        match self.lifecycle {
            Lifecycle::Unmounted => {}
            Lifecycle::Mounted(_) => {
                warn!("mount received for an already mounted chart");
                return Ok(UpdateOutcome::Skipped(SkipReason::AlreadyMounted));
            }
            Lifecycle::Destroyed => {
                debug!("mount after destroy rejected");
                return Ok(UpdateOutcome::Skipped(SkipReason::Destroyed));
            }
        }

        let handle = self
            .engine
            .construct(surface, &self.options)
            .map_err(|source| {
                warn!(error = %source, "chart construction failed");
                ChartError::RenderingEngine {
                    operation: EngineOperation::Construct,
                    source,
                }
            })?;
        debug!(?handle, "chart constructed");
        self.lifecycle = Lifecycle::Mounted(MountedChart {
            handle,
            kind: self.options.kind,
            time_unit: self.options.x_axis.unit,
            points: 0,
        });
        self.update(payload)
    }

    /// Brings the live chart in line with `payload`.
    ///
    /// Calls before mount or after destroy are skipped. Undecodable intervals
    /// leave kind, unit and data untouched. Engine rejections are retried
    /// once and then returned; the chart keeps its previous content.
    pub fn update(&mut self, payload: &UpdatePayload) -> ChartResult<UpdateOutcome> {
        let chart = match &self.lifecycle {
            Lifecycle::Mounted(chart) => *chart,
            Lifecycle::Unmounted => {
                debug!(error = %ChartError::NotMounted, "update skipped");
                return Ok(UpdateOutcome::Skipped(SkipReason::NotMounted));
            }
            Lifecycle::Destroyed => {
                debug!("update after destroy rejected");
                return Ok(UpdateOutcome::Skipped(SkipReason::Destroyed));
            }
        };

        let resolved = payload.resolve();
        if resolved.data_format_recovered {
            debug!(points = chart.points, "undecodable intervals, chart left as is");
            return Ok(UpdateOutcome::Applied(AppliedUpdate {
                kind: chart.kind,
                kind_changed: false,
                time_unit: chart.time_unit,
                points: 0,
                data_format_recovered: true,
            }));
        }
        let kind = resolved.kind.unwrap_or(chart.kind);
        let time_unit = resolve_time_unit(&resolved.series, chart.time_unit);
        let points = resolved.series.len();
        let patch = ChartPatch {
            kind: (kind != chart.kind).then_some(kind),
            time_unit,
            data: resolved.series,
        };

        let handle = chart.handle;
        call_with_single_retry(EngineOperation::Mutate, || {
            self.engine.mutate(handle, &patch)
        })?;
        self.lifecycle = Lifecycle::Mounted(MountedChart {
            handle,
            kind,
            time_unit,
            points,
        });
        trace!(points, %kind, %time_unit, "chart mutated");

        call_with_single_retry(EngineOperation::Redraw, || {
            self.engine.redraw(handle, RedrawMode::Immediate)
        })?;

        Ok(UpdateOutcome::Applied(AppliedUpdate {
            kind,
            kind_changed: patch.kind.is_some(),
            time_unit,
            points,
            data_format_recovered: resolved.data_format_recovered,
        }))
    }

    /// Releases the chart. Returns `true` when a live chart was torn down.
    ///
    /// Safe to call in any state. Without a live chart this is a no-op.
    pub fn destroy(&mut self) -> bool {
        let Lifecycle::Mounted(chart) = self.lifecycle else {
            trace!(error = %ChartError::NotMounted, "destroy without a live chart");
            return false;
        };
        self.lifecycle = Lifecycle::Destroyed;
        if let Err(err) = self.engine.destroy(chart.handle) {
            warn!(error = %err, handle = ?chart.handle, "engine failed to destroy chart");
        }
        debug!(handle = ?chart.handle, "chart destroyed");
        true
    }
}

fn call_with_single_retry<T>(
    operation: EngineOperation,
    mut call: impl FnMut() -> Result<T, EngineError>,
) -> ChartResult<T> {
    match call() {
        Ok(value) => Ok(value),
        Err(first) => {
            debug!(%operation, error = %first, "engine call rejected, retrying once");
            call().map_err(|source| {
                warn!(%operation, error = %source, "engine call rejected after retry");
                ChartError::RenderingEngine { operation, source }
            })
        }
    }
}
