mod engine;
mod headless_engine;
mod primitives;
mod series_style;

pub use engine::{ChartPatch, EngineError, EngineOperation, RedrawMode, RenderingEngine};
pub use headless_engine::{EngineCallStats, HeadlessEngine, HeadlessHandle, SurfaceId};
pub use primitives::Color;
pub use series_style::{SeriesStyle, series_style, series_styles};
