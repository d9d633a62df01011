use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::Scene;

pub const SCENE_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneJsonContractV1 {
    pub schema_version: u32,
    pub scene: Scene,
}

impl Scene {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = SceneJsonContractV1 {
            schema_version: SCENE_JSON_SCHEMA_V1,
            scene: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize scene contract v1: {e}"))
        })
    }

    /// Accepts either a bare scene or a versioned v1 contract.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(scene) = serde_json::from_str::<Scene>(input) {
            return Ok(scene);
        }
        let payload: SceneJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse scene json payload: {e}"))
        })?;
        if payload.schema_version != SCENE_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported scene schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.scene)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::Viewport;
    use crate::error::ChartError;
    use crate::render::{ChartState, Color, Scene};

    #[test]
    fn rejects_unknown_schema_version() {
        let scene = Scene::new(
            ChartState::Empty,
            Viewport::new(10, 10),
            Color::rgb(1.0, 1.0, 1.0),
        );
        let json = scene
            .to_json_contract_v1_pretty()
            .expect("serialize")
            .replace("\"schema_version\": 1", "\"schema_version\": 9");
        let err = Scene::from_json_compat_str(&json).expect_err("unsupported version");
        assert!(matches!(err, ChartError::InvalidData(msg) if msg.contains("schema version")));
    }
}
