use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a stored embedding was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorType {
    Frame,
    Scene,
    Audio,
    Text,
    Object,
    Ocr,
}

impl fmt::Display for VectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorType::Frame => write!(f, "frame"),
            VectorType::Scene => write!(f, "scene"),
            VectorType::Audio => write!(f, "audio"),
            VectorType::Text => write!(f, "text"),
            VectorType::Object => write!(f, "object"),
            VectorType::Ocr => write!(f, "ocr"),
        }
    }
}

impl FromStr for VectorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "frame" => Ok(VectorType::Frame),
            "scene" => Ok(VectorType::Scene),
            "audio" => Ok(VectorType::Audio),
            "text" => Ok(VectorType::Text),
            "object" => Ok(VectorType::Object),
            "ocr" => Ok(VectorType::Ocr),
            _ => Err(format!("Unknown vector type: {s}")),
        }
    }
}
