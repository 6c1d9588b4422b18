use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::NavAction;

/// Serialized shape of [`KeybindingOptions`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawKeybindings {
    bindings: HashMap<NavAction, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawKeybindings", into = "RawKeybindings")]
/// Configurable keyboard bindings mapping navigation actions to
/// `KeyboardEvent.key` values.
pub struct KeybindingOptions {
    /// Maps action → key strings (e.g. `NextSection` → `["ArrowDown"]`).
    bindings: HashMap<NavAction, Vec<String>>,
    /// Reverse lookup cache (key string → action).
    key_to_action: HashMap<String, NavAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        Self::from_bindings(HashMap::from([
            (
                NavAction::NextSection,
                vec!["ArrowDown".into(), "PageDown".into()],
            ),
            (
                NavAction::PreviousSection,
                vec!["ArrowUp".into(), "PageUp".into()],
            ),
        ]))
    }
}

impl PartialEq for KeybindingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl KeybindingOptions {
    /// Bindings from an explicit action → keys map.
    #[must_use]
    pub fn from_bindings(bindings: HashMap<NavAction, Vec<String>>) -> Self {
        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }

    /// Bind `key` to `action`, removing it from any other action.
    pub fn bind(&mut self, action: NavAction, key: &str) {
        for keys in self.bindings.values_mut() {
            keys.retain(|k| k != key);
        }
        self.bindings.entry(action).or_default().push(key.to_owned());
        self.rebuild_reverse_map();
    }

    /// Keys bound to `action`.
    #[must_use]
    pub fn keys_for(&self, action: NavAction) -> &[String] {
        self.bindings.get(&action).map_or(&[], Vec::as_slice)
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<NavAction> {
        self.key_to_action.get(key).copied()
    }

    fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, keys) in &self.bindings {
            for key in keys {
                let _ = self.key_to_action.insert(key.clone(), *action);
            }
        }
    }
}

impl From<RawKeybindings> for KeybindingOptions {
    fn from(raw: RawKeybindings) -> Self {
        if raw.bindings.is_empty() {
            return Self::default();
        }
        Self::from_bindings(raw.bindings)
    }
}

impl From<KeybindingOptions> for RawKeybindings {
    fn from(opts: KeybindingOptions) -> Self {
        Self {
            bindings: opts.bindings,
        }
    }
}
