use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::MeshViewError;
use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `FitToView` → `"KeyF"`).
    pub bindings: HashMap<KeyAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::Cancel, "Escape".into()),
            (KeyAction::FitToView, "KeyF".into()),
            (KeyAction::ViewFront, "Digit1".into()),
            (KeyAction::ViewBack, "Digit2".into()),
            (KeyAction::ViewLeft, "Digit3".into()),
            (KeyAction::ViewRight, "Digit4".into()),
            (KeyAction::ViewTop, "Digit5".into()),
            (KeyAction::ViewBottom, "Digit6".into()),
            (KeyAction::ViewIsometric, "Digit0".into()),
            (KeyAction::SelectAll, "KeyA".into()),
            (KeyAction::HideSelected, "KeyH".into()),
            (KeyAction::ShowAll, "KeyU".into()),
            (KeyAction::DeleteSelected, "Delete".into()),
            (KeyAction::TogglePoints, "KeyP".into()),
            (KeyAction::ToggleLines, "KeyL".into()),
            (KeyAction::ToggleTriangles, "KeyT".into()),
            (KeyAction::ToggleQuads, "KeyQ".into()),
            (KeyAction::ToolSelect, "KeyS".into()),
            (KeyAction::ToolAddLine, "KeyE".into()),
            (KeyAction::ToolAddTriangle, "KeyR".into()),
            (KeyAction::ToolAddQuad, "KeyY".into()),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string. If several actions share the
    /// key, the one declared first in [`KeyAction`] wins.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings
            .iter()
            .filter(|(_, bound)| bound.as_str() == key)
            .map(|(action, _)| *action)
            .min()
    }

    /// Reject a key bound to more than one action.
    ///
    /// # Errors
    ///
    /// [`MeshViewError::OptionsParse`] naming the key and the actions that
    /// share it.
    pub fn validate(&self) -> Result<(), MeshViewError> {
        let mut by_key: BTreeMap<&str, Vec<KeyAction>> = BTreeMap::new();
        for (action, key) in &self.bindings {
            by_key.entry(key.as_str()).or_default().push(*action);
        }
        match by_key.into_iter().find(|(_, actions)| actions.len() > 1) {
            Some((key, mut actions)) => {
                actions.sort_unstable();
                Err(MeshViewError::OptionsParse(format!(
                    "key {key} is bound to several actions: {actions:?}"
                )))
            }
            None => Ok(()),
        }
    }
}
