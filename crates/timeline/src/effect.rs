//! Per-clip effect entries.
//!
//! The engine treats effects as opaque data: a name the host pipeline knows,
//! an enabled flag, and a free-form parameter object. They ride on the clip
//! like keyframes do, so history snapshots and project files carry them;
//! rendering them is the host's job.

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn empty_parameters() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// One effect applied to a clip (video or audio chain).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectInstance {
    pub id: String,
    /// Effect name as the host pipeline knows it, e.g. `"crossDissolve"`.
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Free-form parameter object. Never interpreted by the engine.
    #[serde(default = "empty_parameters")]
    pub parameters: serde_json::Value,
}

impl EffectInstance {
    /// Create an enabled effect with the given parameters.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_effects_start_enabled() {
        let fx = EffectInstance::new("fx_1", "crop", json!({ "top": 0 }));
        assert!(fx.enabled);
        assert_eq!(fx.name, "crop");
        assert_eq!(fx.parameters["top"], 0);
    }

    #[test]
    fn serialization_roundtrip() {
        let fx = EffectInstance::new("fx_1", "dip", json!({ "duration": 1, "color": "#000000" }));
        let json = serde_json::to_string(&fx).unwrap();
        let restored: EffectInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, fx);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let fx: EffectInstance =
            serde_json::from_value(json!({ "id": "fx_1", "name": "reverb" })).unwrap();
        assert!(fx.enabled);
        assert_eq!(fx.parameters, json!({}));
    }
}
