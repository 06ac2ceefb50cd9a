use thiserror::Error;

use crate::render::{EngineError, EngineOperation};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The interval payload could not be decoded into records.
    #[error("interval payload could not be decoded: {0}")]
    DataFormat(String),

    #[error("no chart is mounted for this view")]
    NotMounted,

    #[error("rendering engine rejected `{operation}`")]
    RenderingEngine {
        operation: EngineOperation,
        #[source]
        source: EngineError,
    },
}
