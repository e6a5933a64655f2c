use colorfilters::{Colorspace, DisplayMode};

/// Window preferences kept between runs.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub colorspace: Colorspace,
    pub display_mode: DisplayMode,
    pub is_dark: bool,
}
