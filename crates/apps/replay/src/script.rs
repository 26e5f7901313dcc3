use std::path::Path;

use serde::Deserialize;

/// A recorded interaction session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub width_px: Option<f64>,
    pub steps: Vec<Step>,
}

/// One user gesture, or a pause. Features are referred to by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Hover { country: Option<String> },
    HoverRegion { region: String },
    Click { country: String },
    ClickRegion { region: String },
    ClickBackground,
    Escape,
    Back,
    Drag,
    Resize { width_px: f64 },
    Wait { ms: u64 },
}

#[derive(Debug)]
pub enum ScriptError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Io(msg) => write!(f, "script read error: {msg}"),
            ScriptError::Parse(msg) => write!(f, "script parse error: {msg}"),
        }
    }
}

impl std::error::Error for ScriptError {}

impl Script {
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json).map_err(|e| ScriptError::Parse(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ScriptError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}
