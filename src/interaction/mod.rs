use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{SeriesKind, SeriesSet, datetime_to_unix_seconds};

/// How a hover picks the items it highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Every series at the hovered index.
    #[default]
    Index,
    /// Only the series whose value is closest to the pointer.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionOptions {
    #[serde(default)]
    pub mode: InteractionMode,
    /// When `true`, the pointer must sit exactly on a sample time.
    #[serde(default)]
    pub intersect: bool,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Index,
            intersect: false,
        }
    }
}

/// One highlighted series value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverItem {
    pub series: SeriesKind,
    pub value: Option<f64>,
}

/// Items highlighted for a pointer position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverSelection {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<HoverItem>,
}

/// Resolves the hovered index for `pointer_time` and the items it highlights.
///
/// The nearest sample in time wins, ties go to the earlier index.
/// `pointer_value` only matters in `Nearest` mode.
#[must_use]
pub fn resolve_hover(
    data: &SeriesSet,
    options: InteractionOptions,
    pointer_time: DateTime<Utc>,
    pointer_value: Option<f64>,
) -> Option<HoverSelection> {
    let pointer_seconds = datetime_to_unix_seconds(pointer_time);
    let (index, distance) = data
        .timestamps()
        .iter()
        .enumerate()
        .map(|(idx, time)| (idx, (datetime_to_unix_seconds(*time) - pointer_seconds).abs()))
        .fold(None, |best: Option<(usize, f64)>, candidate| match best {
            Some(current) if current.1 <= candidate.1 => Some(current),
            _ => Some(candidate),
        })?;
    if options.intersect && distance > 0.0 {
        return None;
    }

    let all_items = SeriesKind::ALL.map(|series| HoverItem {
        series,
        value: data.series(series)[index],
    });
    let items = match options.mode {
        InteractionMode::Index => all_items.to_vec(),
        InteractionMode::Nearest => nearest_item(&all_items, pointer_value)
            .into_iter()
            .collect(),
    };

    Some(HoverSelection {
        index,
        timestamp: data.timestamps()[index],
        items,
    })
}

fn nearest_item(items: &[HoverItem; 4], pointer_value: Option<f64>) -> Option<HoverItem> {
    let Some(pointer_value) = pointer_value else {
        return items.iter().copied().find(|item| item.value.is_some());
    };
    items
        .iter()
        .copied()
        .filter_map(|item| item.value.map(|value| (item, (value - pointer_value).abs())))
        .fold(None, |best: Option<(HoverItem, f64)>, candidate| match best {
            Some(current) if current.1 <= candidate.1 => Some(current),
            _ => Some(candidate),
        })
        .map(|(item, _)| item)
}
