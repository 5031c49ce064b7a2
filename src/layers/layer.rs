use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LakeError;

/// Layer tag written into metadata and storage paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Raw,
    Trusted,
    Refined,
}

impl Layer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Raw => "raw",
            Layer::Trusted => "trusted",
            Layer::Refined => "refined",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = LakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Layer::Raw),
            "trusted" => Ok(Layer::Trusted),
            "refined" => Ok(Layer::Refined),
            other => Err(LakeError::UnknownLayer {
                layer: other.to_string(),
            }),
        }
    }
}
