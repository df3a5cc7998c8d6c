//! Centralized viewer options with TOML preset support.
//!
//! Camera tuning, picking fill modes, default tool bindings and key bindings
//! are consolidated here. Options serialize to/from TOML.

mod camera;
mod keybindings;
mod picking;
mod tools;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use picking::PickingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use tools::ToolOptions;

use crate::error::MeshViewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Camera fit and mutator parameters.
    pub camera: CameraOptions,
    /// Picking fill modes and default kinds.
    pub picking: PickingOptions,
    /// Default mouse tool per button.
    #[schemars(skip)]
    pub tools: ToolOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`MeshViewError::OptionsParse`] on malformed TOML or values that fail
    /// [`Options::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, MeshViewError> {
        let options: Self =
            toml::from_str(content).map_err(|e| MeshViewError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check value ranges and key binding collisions.
    ///
    /// # Errors
    ///
    /// [`MeshViewError::OptionsParse`] describing the first problem found.
    pub fn validate(&self) -> Result<(), MeshViewError> {
        self.camera.validate()?;
        self.keybindings.validate()
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, MeshViewError> {
        let content = std::fs::read_to_string(path).map_err(MeshViewError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), MeshViewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MeshViewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MeshViewError::Io)?;
        }
        std::fs::write(path, content).map_err(MeshViewError::Io)
    }
}
