use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, SeriesKind, SeriesSet, TimeUnit};
use crate::interaction::{HoverSelection, resolve_hover};
use crate::render::ChartPatch;

use super::ChartOptions;

/// Long-lived state of one rendered chart.
///
/// Engines build it once from [`ChartOptions`] and then only apply patches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartState {
    kind: ChartKind,
    time_unit: TimeUnit,
    options: ChartOptions,
    data: SeriesSet,
}

impl ChartState {
    #[must_use]
    pub fn from_options(options: &ChartOptions) -> Self {
        Self {
            kind: options.kind,
            time_unit: options.x_axis.unit,
            options: options.clone(),
            data: SeriesSet::empty(),
        }
    }

    /// Applies `patch` in place. Labels and series are swapped as one value.
    pub fn apply(&mut self, patch: &ChartPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        self.time_unit = patch.time_unit;
        self.data = patch.data.clone();
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn data(&self) -> &SeriesSet {
        &self.data
    }

    #[must_use]
    pub fn labels(&self) -> &[DateTime<Utc>] {
        self.data.timestamps()
    }

    #[must_use]
    pub fn dataset(&self, series: SeriesKind) -> &[Option<f64>] {
        self.data.series(series)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Tick label text for every sample at the current unit.
    #[must_use]
    pub fn label_texts(&self) -> Vec<String> {
        self.labels()
            .iter()
            .map(|time| self.time_unit.format_label(*time))
            .collect()
    }

    /// Hover resolution under the chart's interaction options.
    #[must_use]
    pub fn hover_at(
        &self,
        pointer_time: DateTime<Utc>,
        pointer_value: Option<f64>,
    ) -> Option<HoverSelection> {
        resolve_hover(
            &self.data,
            self.options.interaction,
            pointer_time,
            pointer_value,
        )
    }

    /// Tooltip items for a pointer time under the tooltip options.
    #[must_use]
    pub fn tooltip_at(&self, pointer_time: DateTime<Utc>) -> Option<HoverSelection> {
        resolve_hover(&self.data, self.options.tooltip, pointer_time, None)
    }
}
