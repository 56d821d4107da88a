use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

use super::{AxisLayout, TimeAxisConfig};

pub const TIME_AXIS_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxisConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: TimeAxisConfig,
}

impl TimeAxisConfig {
    pub fn to_json_contract_v1_pretty(self) -> AxisResult<String> {
        let payload = TimeAxisConfigJsonContractV1 {
            schema_version: TIME_AXIS_CONFIG_JSON_SCHEMA_V1,
            config: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AxisError::InvalidData(format!("failed to serialize time axis config v1: {e}"))
        })
    }

    /// Parses either a bare config object or a versioned v1 contract, then validates it.
    pub fn from_json_compat_str(input: &str) -> AxisResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            AxisError::InvalidData(format!("failed to parse time axis config json: {e}"))
        })?;

        let config = if value.get("schema_version").is_some() {
            let payload: TimeAxisConfigJsonContractV1 =
                serde_json::from_value(value).map_err(|e| {
                    AxisError::InvalidData(format!(
                        "failed to parse time axis config json payload: {e}"
                    ))
                })?;
            if payload.schema_version != TIME_AXIS_CONFIG_JSON_SCHEMA_V1 {
                return Err(AxisError::InvalidData(format!(
                    "unsupported time axis config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value).map_err(|e| {
                AxisError::InvalidData(format!("failed to parse time axis config json: {e}"))
            })?
        };

        config.validate()
    }
}

impl AxisLayout {
    /// Diagnostic dump of the plan, labels and hash marks.
    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AxisError::InvalidData(format!("failed to serialize axis layout json: {e}"))
        })
    }
}
