use std::path::Path;
use std::str::FromStr;

use checkers::{Move, RuleSet, Variant};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Names a variant either by its name or by its numeric identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantRef {
    Id(i32),
    Name(String),
}

impl VariantRef {
    /// Unknown identifiers fall back to American rules, unknown names are
    /// an error.
    pub fn rules(&self) -> anyhow::Result<RuleSet> {
        match self {
            VariantRef::Id(id) => {
                if Variant::from_id(*id).is_none() {
                    warn!(variant_id = *id, "Unknown variant, playing American rules");
                }
                Ok(checkers::resolve(*id))
            }
            VariantRef::Name(name) => Ok(Variant::from_str(name)?.rules()),
        }
    }
}

/// A game to replay, as read from a JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: VariantRef,
    pub light: String,
    pub dark: String,
    #[serde(default)]
    pub moves: Vec<Move>,
}

impl GameConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
            .map_err(|err| anyhow::anyhow!("Invalid game file '{}': {}", path.display(), err))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
