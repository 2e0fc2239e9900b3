//! Wire models for the telemetry server's `/config.json` document

use crate::types::SkinConfiguration;
use serde::{Deserialize, Serialize};

/// Skin list returned by `GET /config.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinsResponse {
    /// Available skins, in server order. Missing on the wire means empty.
    #[serde(default)]
    pub skins: Vec<SkinConfiguration>,
}

impl SkinsResponse {
    /// Parse a skin list from a JSON document.
    pub fn from_json(content: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
