use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scroll Effects", inline)]
#[serde(default)]
/// Header and back-to-top reactions to the scroll offset.
pub struct EffectsOptions {
    /// Selector of the page header.
    #[schemars(skip)]
    pub header_selector: String,
    /// The header gets `scrolled` once the offset exceeds this.
    #[schemars(title = "Header Scrolled After (px)", range(min = 0.0, max = 1000.0), extend("step" = 10.0))]
    pub header_scrolled_px: f64,
    /// Selector of the back-to-top button. Empty disables it.
    #[schemars(skip)]
    pub back_to_top_selector: String,
    /// The button gets `visible` once the offset exceeds this.
    #[schemars(title = "Back To Top After (px)", range(min = 0.0, max = 3000.0), extend("step" = 10.0))]
    pub back_to_top_px: f64,
    /// Duration of the scroll back to the top.
    #[schemars(title = "Back To Top Duration (ms)", range(min = 100, max = 3000), extend("step" = 50))]
    pub back_to_top_ms: u64,
}

impl Default for EffectsOptions {
    fn default() -> Self {
        Self {
            header_selector: "#header".into(),
            header_scrolled_px: 100.0,
            back_to_top_selector: "#backToTop".into(),
            back_to_top_px: 500.0,
            back_to_top_ms: 800,
        }
    }
}
