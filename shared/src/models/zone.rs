//! Zone Model

use serde::{Deserialize, Serialize};

/// Zone type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneType {
    DiningArea,
    KitchenArea,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DiningArea => "dining-area",
            Self::KitchenArea => "kitchen-area",
        }
    }
}

impl std::fmt::Display for ZoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zone entity (区域：大厅、后厨等)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    #[serde(default)]
    pub description: Option<String>,
}

impl Zone {
    pub fn new(id: impl Into<String>, name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zone_type,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
