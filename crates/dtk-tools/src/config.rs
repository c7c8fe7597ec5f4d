//! Tool configuration.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{property} property must be a string, got {found}")]
    NotAString {
        property: &'static str,
        found: &'static str,
    },
    #[error("sector configuration must be an object, got {0}")]
    NotAnObject(&'static str),
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expect_string(property: &'static str, value: &Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(ConfigError::NotAString {
            property,
            found: json_type(value),
        })
}

/// Names of the data properties a sector is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SectorFields {
    pub radius: String,
    pub angle: String,
    pub sweep: String,
}

impl Default for SectorFields {
    fn default() -> Self {
        Self {
            radius: "radius".to_string(),
            angle: "angle".to_string(),
            sweep: "sweep".to_string(),
        }
    }
}

impl SectorFields {
    /// Read `{ "radius": .., "angle": .., "sweep": .. }`; missing keys keep
    /// their defaults, non-string values are rejected.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAnObject(json_type(value)));
        };
        let mut fields = Self::default();
        if let Some(v) = map.get("radius") {
            fields.set_radius_property(v)?;
        }
        if let Some(v) = map.get("angle") {
            fields.set_angle_property(v)?;
        }
        if let Some(v) = map.get("sweep") {
            fields.set_sweep_property(v)?;
        }
        Ok(fields)
    }

    pub fn set_radius_property(&mut self, value: &Value) -> Result<(), ConfigError> {
        self.radius = expect_string("radius", value)?;
        Ok(())
    }

    pub fn set_angle_property(&mut self, value: &Value) -> Result<(), ConfigError> {
        self.angle = expect_string("angle", value)?;
        Ok(())
    }

    pub fn set_sweep_property(&mut self, value: &Value) -> Result<(), ConfigError> {
        self.sweep = expect_string("sweep", value)?;
        Ok(())
    }
}
