use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ChartState;

pub const CHART_STATE_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStateJsonContractV1 {
    pub schema_version: u32,
    pub state: ChartState,
}

impl ChartState {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartStateJsonContractV1 {
            schema_version: CHART_STATE_JSON_SCHEMA_V1,
            state: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart state contract v1: {e}"))
        })
    }

    /// Accepts either a bare state or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(state) = serde_json::from_str::<ChartState>(input) {
            return Ok(state);
        }
        let payload: ChartStateJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart state json payload: {e}"))
        })?;
        if payload.schema_version != CHART_STATE_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart state schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.state)
    }
}
