//! TOML input files.
//!
//! ```toml
//! [plate]
//! stack = [0.0, 45.0, -45.0, 90.0]
//! plyt = 0.000125
//! laminaprop = [142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 3.0e9]
//!
//! [panel]
//! a = 0.5
//! b = 0.3
//! ```

use composites_core::{LaminationParametersInput, PlateInput};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Panel dimensions and load ratio for the buckling command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelInput {
    #[serde(default)]
    pub a: Option<f64>,
    #[serde(default)]
    pub b: Option<f64>,
    /// `Nxy / Nxx` for combined loading.
    #[serde(default)]
    pub k: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputFile {
    #[serde(default)]
    pub plate: Option<PlateInput>,
    #[serde(default)]
    pub lamination_parameters: Option<LaminationParametersInput>,
    #[serde(default)]
    pub panel: Option<PanelInput>,
}

impl InputFile {
    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        Self::parse(&text).map_err(|e| format!("failed to parse {}: {e}", path.display()))
    }

    pub fn plate(&self) -> Result<&PlateInput, String> {
        self.plate
            .as_ref()
            .ok_or_else(|| "input file has no [plate] table".to_string())
    }

    pub fn lamination_parameters(&self) -> Result<&LaminationParametersInput, String> {
        self.lamination_parameters
            .as_ref()
            .ok_or_else(|| "input file has no [lamination_parameters] table".to_string())
    }
}
