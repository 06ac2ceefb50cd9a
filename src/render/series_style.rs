use crate::core::SeriesKind;

use super::Color;

/// Fixed visual identity of one metric series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub series: SeriesKind,
    pub label: &'static str,
    pub border_color: Color,
    pub background_color: Color,
    pub border_width: f64,
    pub tension: f64,
    pub fill: bool,
}

const BORDER_WIDTH: f64 = 2.0;
const TENSION: f64 = 0.1;
const BACKGROUND_ALPHA: f64 = 0.1;

const fn style(series: SeriesKind, border_color: Color) -> SeriesStyle {
    SeriesStyle {
        series,
        label: series.label(),
        border_color,
        background_color: border_color.with_alpha(BACKGROUND_ALPHA),
        border_width: BORDER_WIDTH,
        tension: TENSION,
        fill: false,
    }
}

// Indexed by `SeriesKind::index`.
static SERIES_STYLES: [SeriesStyle; 4] = [
    style(SeriesKind::Oee, Color::from_rgb8(99, 102, 241, 1.0)),
    style(SeriesKind::Availability, Color::from_rgb8(16, 185, 129, 1.0)),
    style(SeriesKind::Performance, Color::from_rgb8(245, 158, 11, 1.0)),
    style(SeriesKind::Quality, Color::from_rgb8(14, 165, 233, 1.0)),
];

#[must_use]
pub fn series_style(series: SeriesKind) -> &'static SeriesStyle {
    &SERIES_STYLES[series.index()]
}

#[must_use]
pub fn series_styles() -> &'static [SeriesStyle; 4] {
    &SERIES_STYLES
}
