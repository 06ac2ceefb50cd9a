mod chart_state;
mod controller;
mod hook;
mod json_contract;
mod options;
mod payload;

pub use chart_state::ChartState;
pub use controller::{AppliedUpdate, LifecycleState, OeeChartController, SkipReason, UpdateOutcome};
pub use hook::ViewHook;
pub use json_contract::{CHART_STATE_JSON_SCHEMA_V1, ChartStateJsonContractV1};
pub use options::{
    ChartOptions, DatasetOptions, LegendOptions, LegendPosition, PercentAxisOptions,
    TimeAxisOptions,
};
pub use payload::{CHART_TYPE_ATTRIBUTE, INTERVALS_ATTRIBUTE, ResolvedPayload, UpdatePayload};
