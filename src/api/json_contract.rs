use serde::{Deserialize, Serialize};

use crate::error::{ViewerError, ViewerResult};
use crate::render::Renderer;

use super::{ViewerEngine, ViewerEngineConfig, ViewerSnapshot};

pub const VIEWER_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;
pub const VIEWER_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ViewerSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerEngineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ViewerEngineConfig,
}

impl ViewerSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ViewerResult<String> {
        let payload = ViewerSnapshotJsonContractV1 {
            schema_version: VIEWER_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ViewerError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ViewerResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ViewerSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ViewerSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ViewerError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != VIEWER_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ViewerError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl ViewerEngineConfig {
    pub fn to_json_contract_v1_pretty(self) -> ViewerResult<String> {
        let payload = ViewerEngineConfigJsonContractV1 {
            schema_version: VIEWER_CONFIG_JSON_SCHEMA_V1,
            config: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ViewerError::InvalidData(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config or a versioned contract payload, then
    /// validates it.
    pub fn from_json_compat_str(input: &str) -> ViewerResult<Self> {
        if let Ok(config) = serde_json::from_str::<ViewerEngineConfig>(input) {
            return config.validate();
        }
        let payload: ViewerEngineConfigJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ViewerError::InvalidData(format!("failed to parse config json payload: {e}"))
            })?;
        if payload.schema_version != VIEWER_CONFIG_JSON_SCHEMA_V1 {
            return Err(ViewerError::InvalidData(format!(
                "unsupported config schema version: {}",
                payload.schema_version
            )));
        }
        payload.config.validate()
    }
}

impl<R: Renderer> ViewerEngine<R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> ViewerResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
