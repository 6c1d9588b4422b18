use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Position Indicator", inline)]
#[serde(default)]
/// Secondary position indicator (the tower beside the page).
pub struct IndicatorOptions {
    /// Selector of the indicator element. Empty disables the indicator.
    #[schemars(skip)]
    pub selector: String,
    /// Selector template for one landmark entry; `{id}` is replaced by the
    /// landmark's section identifier.
    #[schemars(skip)]
    pub entry_selector: String,
    /// The indicator shows once the scroll offset exceeds this fraction
    /// of the viewport height.
    #[schemars(title = "Visible After (viewport fraction)", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub visible_fraction: f64,
    /// Section identifiers with an indicator entry, in priority order.
    #[schemars(skip)]
    pub landmarks: Vec<String>,
    /// Duration of the scroll triggered by clicking an entry.
    #[schemars(title = "Jump Duration (ms)", range(min = 100, max = 3000), extend("step" = 50))]
    pub jump_ms: u64,
}

impl IndicatorOptions {
    /// Selector for the entry of `landmark`.
    #[must_use]
    pub fn entry_for(&self, landmark: &str) -> String {
        self.entry_selector.replace("{id}", landmark)
    }
}

impl Default for IndicatorOptions {
    fn default() -> Self {
        Self {
            selector: "#towerIndicator".into(),
            entry_selector: ".tower-section[data-target=\"{id}\"]".into(),
            visible_fraction: 0.5,
            landmarks: vec![
                "observatory".into(),
                "skylounge".into(),
                "exhibition".into(),
                "lobby".into(),
            ],
            jump_ms: 800,
        }
    }
}
