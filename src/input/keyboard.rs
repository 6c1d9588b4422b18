use serde::{Deserialize, Serialize};

/// Navigation actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// next_section = ["ArrowDown", "PageDown"]
/// previous_section = ["ArrowUp", "PageUp"]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    /// Advance one section.
    NextSection,
    /// Retreat one section.
    PreviousSection,
}
