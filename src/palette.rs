use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Colour theme of the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

/// Colours keyed by semantic role, as CSS colour strings.
///
/// The engines carry this through to the renderer and never read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(BTreeMap<String, String>);

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colours used by the hero-page arm for each theme
    pub fn for_theme(theme: Theme) -> Self {
        let roles: [(&str, &str, &str); 6] = [
            // role, light, dark
            ("fill", "rgba(37, 99, 235, 0.02)", "rgba(255, 255, 255, 0.02)"),
            ("skeleton", "rgba(37, 99, 235, 0.18)", "rgba(255, 255, 255, 0.15)"),
            ("joint_outer", "rgba(37, 99, 235, 0.08)", "rgba(255, 255, 255, 0.08)"),
            ("joint_inner", "rgba(37, 99, 235, 0.8)", "rgba(255, 255, 255, 0.8)"),
            ("accent", "rgba(8, 145, 178, 0.9)", "rgba(34, 211, 238, 0.9)"),
            ("claw", "rgba(37, 99, 235, 0.1)", "rgba(255, 255, 255, 0.1)"),
        ];

        let mut palette = Self::new();
        for (role, light, dark) in roles {
            let colour = match theme {
                Theme::Light => light,
                Theme::Dark => dark,
            };
            palette.set(role, colour);
        }
        palette
    }

    pub fn set(&mut self, role: impl Into<String>, colour: impl Into<String>) {
        self.0.insert(role.into(), colour.into());
    }

    pub fn get(&self, role: &str) -> Option<&str> {
        self.0.get(role).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_theme_palettes_cover_same_roles() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);

        assert_eq!(light.len(), 6);
        assert_eq!(dark.len(), 6);
        assert_eq!(dark.get("accent"), Some("rgba(34, 211, 238, 0.9)"));
        assert_ne!(light.get("accent"), dark.get("accent"));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_palette_json_is_flat_map() {
        let palette = Palette::from_json(r##"{"accent": "#0891b2"}"##).unwrap();
        assert_eq!(palette.get("accent"), Some("#0891b2"));
        assert_eq!(
            serde_json::to_string(&palette).unwrap(),
            r##"{"accent":"#0891b2"}"##
        );
    }
}
