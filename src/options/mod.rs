//! Centralized controller options with TOML preset support.
//!
//! All tweakable settings (navigation timing and thresholds, keybindings,
//! position indicator, scroll effects) are consolidated here. Options
//! serialize to/from TOML so a page can ship its tuning next to its markup.

mod effects;
mod indicator;
mod keybindings;
mod navigation;

use std::path::Path;

pub use effects::EffectsOptions;
pub use indicator::IndicatorOptions;
pub use keybindings::KeybindingOptions;
pub use navigation::NavigationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SnapError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[navigation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Section snapping, cooldown and gesture thresholds.
    pub navigation: NavigationOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
    /// Position indicator options.
    pub indicator: IndicatorOptions,
    /// Header and back-to-top options.
    pub effects: EffectsOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, SnapError> {
        let opts: Self = toml::from_str(content)
            .map_err(|e| SnapError::OptionsParse(e.to_string()))?;
        opts.check()?;
        Ok(opts)
    }

    /// Parse options from JSON, as handed over by a page script. Missing
    /// fields use defaults.
    pub fn from_json_str(content: &str) -> Result<Self, SnapError> {
        let opts: Self = serde_json::from_str(content)
            .map_err(|e| SnapError::OptionsParse(e.to_string()))?;
        opts.check()?;
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SnapError> {
        let content = std::fs::read_to_string(path).map_err(SnapError::Io)?;
        let opts = Self::from_toml_str(&content)?;
        log::info!("Loaded options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SnapError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SnapError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SnapError::Io)?;
        }
        std::fs::write(path, content).map_err(SnapError::Io)
    }

    /// Reject combinations the controller cannot honor.
    fn check(&self) -> Result<(), SnapError> {
        let nav = &self.navigation;
        if nav.cooldown_ms < nav.transition_ms {
            return Err(SnapError::OptionsParse(format!(
                "navigation.cooldown_ms ({}) must not be shorter than \
                 navigation.transition_ms ({})",
                nav.cooldown_ms, nav.transition_ms
            )));
        }
        if nav.swipe_threshold_px.is_nan() || nav.swipe_threshold_px < 0.0 {
            return Err(SnapError::OptionsParse(
                "navigation.swipe_threshold_px must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NavAction;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_json_overrides_one_field() {
        let opts = Options::from_json_str(
            r#"{ "navigation": { "swipe_threshold_px": 80.0 } }"#,
        )
        .unwrap();
        assert_eq!(opts.navigation.swipe_threshold_px, 80.0);
        assert_eq!(opts.navigation.cooldown_ms, 1000);
        assert_eq!(opts.indicator, IndicatorOptions::default());
    }

    #[test]
    fn json_with_short_cooldown_is_rejected() {
        let err = Options::from_json_str(
            r#"{ "navigation": { "cooldown_ms": 200 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SnapError::OptionsParse(_)));
    }

    #[test]
    fn defaults_keep_cooldown_longer_than_transition() {
        let nav = NavigationOptions::default();
        assert_eq!(nav.transition_ms, 800);
        assert_eq!(nav.cooldown_ms, 1000);
        assert!(nav.cooldown() > nav.transition());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[navigation]
swipe_threshold_px = 80.0
easing = 'linear'
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.navigation.swipe_threshold_px, 80.0);
        assert_eq!(opts.navigation.easing, EasingFunction::Linear);
        // Everything else should be default
        assert_eq!(opts.navigation.cooldown_ms, 1000);
        assert_eq!(opts.effects.back_to_top_px, 500.0);
        assert_eq!(opts.indicator.landmarks.len(), 4);
    }

    #[test]
    fn cooldown_shorter_than_transition_is_rejected() {
        let toml_str = r"
[navigation]
transition_ms = 1200
cooldown_ms = 1000
";
        let err = Options::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, SnapError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("ArrowDown"),
            Some(NavAction::NextSection)
        );
        assert_eq!(
            opts.keybindings.lookup("PageUp"),
            Some(NavAction::PreviousSection)
        );
        assert_eq!(opts.keybindings.lookup("Space"), None);
    }

    #[test]
    fn keybindings_from_toml_rebuild_lookup() {
        let toml_str = r#"
[keybindings.bindings]
next_section = ["j"]
previous_section = ["k"]
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("j"), Some(NavAction::NextSection));
        assert_eq!(
            opts.keybindings.lookup("k"),
            Some(NavAction::PreviousSection)
        );
        assert_eq!(opts.keybindings.lookup("ArrowDown"), None);
    }

    #[test]
    fn rebinding_moves_a_key_between_actions() {
        let mut bindings = KeybindingOptions::default();
        bindings.bind(NavAction::PreviousSection, "ArrowDown");
        assert_eq!(
            bindings.lookup("ArrowDown"),
            Some(NavAction::PreviousSection)
        );
        assert_eq!(bindings.keys_for(NavAction::NextSection), ["PageDown"]);
    }

    #[test]
    fn indicator_entry_selector_substitutes_id() {
        let indicator = IndicatorOptions::default();
        assert_eq!(
            indicator.entry_for("lobby"),
            ".tower-section[data-target=\"lobby\"]"
        );
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("navigation"));
        assert!(props.contains_key("indicator"));
        assert!(props.contains_key("effects"));
        assert!(!props.contains_key("keybindings"));

        let navigation = &props["navigation"]["properties"];
        assert!(navigation.get("cooldown_ms").is_some());
        assert!(navigation.get("section_selector").is_none());
    }
}
