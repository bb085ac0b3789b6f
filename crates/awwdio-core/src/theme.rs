//! Design tokens for the web client (Twilio Paste palette).
//!
//! The palette is emitted under the `twilio` color key, so a shade is
//! addressed as e.g. `twilio-blue-60`. Dark mode is toggled by a class on
//! the document root.

use std::fmt;

use serde_json::{json, Map, Value};

/// Color key the palette is registered under
pub const PALETTE_NAME: &str = "twilio";

/// Files scanned for class names when building the stylesheet
pub const CONTENT_GLOBS: &[&str] = &["./src/**/*.{html,js,svelte,ts}"];

/// Dark styles apply under a `dark` class on the document root
pub const DARK_MODE: &str = "class";

const BLUE: &[(u16, &str)] = &[
    (10, "#E1EFFE"),
    (30, "#6899E8"),
    (60, "#0263E0"),
    (70, "#0249C0"),
    (100, "#001C4A"),
];

const RED: &[(u16, &str)] = &[
    (10, "#FCE8E8"),
    (30, "#F78D8D"),
    (60, "#D61F1F"),
    (70, "#B91919"),
    (100, "#3B0606"),
];

const GREEN: &[(u16, &str)] = &[
    (10, "#D5F3E0"),
    (30, "#68D68E"),
    (60, "#14B053"),
    (70, "#108F44"),
    (100, "#04270D"),
];

const ORANGE: &[(u16, &str)] = &[
    (10, "#FFEAE6"),
    (30, "#FFA788"),
    (60, "#FF6B3D"),
    (70, "#D94E28"),
    (100, "#4A1609"),
];

const PURPLE: &[(u16, &str)] = &[
    (10, "#F3EBFA"),
    (30, "#C99AE8"),
    (60, "#8957CF"),
    (70, "#6A3FB2"),
    (100, "#1F0D36"),
];

const GRAY: &[(u16, &str)] = &[
    (0, "#FFFFFF"),
    (10, "#F4F4F6"),
    (20, "#E8EAEA"),
    (30, "#C4C7C7"),
    (40, "#A1A6A6"),
    (50, "#7E8284"),
    (60, "#5B5F60"),
    (70, "#3A3C3D"),
    (80, "#282A2B"),
    (90, "#1A1C1D"),
    (100, "#121C2D"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFamily {
    Blue,
    Red,
    Green,
    Orange,
    Purple,
    Gray,
}

impl ColorFamily {
    pub const ALL: [ColorFamily; 6] = [
        ColorFamily::Blue,
        ColorFamily::Red,
        ColorFamily::Green,
        ColorFamily::Orange,
        ColorFamily::Purple,
        ColorFamily::Gray,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorFamily::Blue => "blue",
            ColorFamily::Red => "red",
            ColorFamily::Green => "green",
            ColorFamily::Orange => "orange",
            ColorFamily::Purple => "purple",
            ColorFamily::Gray => "gray",
        }
    }

    /// Shades of this family as `(shade, hex)`, lightest first
    pub fn scale(&self) -> &'static [(u16, &'static str)] {
        match self {
            ColorFamily::Blue => BLUE,
            ColorFamily::Red => RED,
            ColorFamily::Green => GREEN,
            ColorFamily::Orange => ORANGE,
            ColorFamily::Purple => PURPLE,
            ColorFamily::Gray => GRAY,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hex value of `family` at `shade`, if the palette defines that shade.
pub fn color(family: ColorFamily, shade: u16) -> Option<&'static str> {
    family
        .scale()
        .iter()
        .find(|(s, _)| *s == shade)
        .map(|(_, hex)| *hex)
}

/// Semantic color roles used across the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Primary,
    Error,
    Success,
    Warning,
    Accent,
    BackgroundDark,
}

impl Role {
    pub fn family_and_shade(&self) -> (ColorFamily, u16) {
        match self {
            Role::Primary => (ColorFamily::Blue, 60),
            Role::Error => (ColorFamily::Red, 60),
            Role::Success => (ColorFamily::Green, 60),
            Role::Warning => (ColorFamily::Orange, 60),
            Role::Accent => (ColorFamily::Purple, 60),
            Role::BackgroundDark => (ColorFamily::Gray, 100),
        }
    }

    pub fn hex(&self) -> &'static str {
        let (family, shade) = self.family_and_shade();
        // Every role points at a shade present in the palette.
        color(family, shade).unwrap_or("#000000")
    }
}

/// The palette as nested JSON: `{"twilio": {"blue": {"10": "#E1EFFE", ...}}}`.
///
/// Families and shades keep palette order.
pub fn tokens_json() -> Value {
    let families: Map<String, Value> = ColorFamily::ALL
        .iter()
        .map(|family| {
            let shades: Map<String, Value> = family
                .scale()
                .iter()
                .map(|(shade, hex)| (shade.to_string(), Value::String((*hex).to_string())))
                .collect();
            (family.name().to_string(), Value::Object(shades))
        })
        .collect();

    let mut palette = Map::new();
    palette.insert(PALETTE_NAME.to_string(), Value::Object(families));
    Value::Object(palette)
}

/// A complete tailwind configuration object carrying the palette.
pub fn tailwind_config() -> Value {
    json!({
        "content": CONTENT_GLOBS,
        "darkMode": DARK_MODE,
        "theme": { "extend": { "colors": tokens_json() } },
        "plugins": [],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lookup() {
        assert_eq!(color(ColorFamily::Blue, 60), Some("#0263E0"));
        assert_eq!(color(ColorFamily::Gray, 0), Some("#FFFFFF"));
        assert_eq!(color(ColorFamily::Gray, 100), Some("#121C2D"));
        assert_eq!(color(ColorFamily::Red, 20), None);
    }

    #[test]
    fn test_roles_resolve_to_palette() {
        assert_eq!(Role::Primary.hex(), "#0263E0");
        assert_eq!(Role::Error.hex(), "#D61F1F");
        assert_eq!(Role::Success.hex(), "#14B053");
        assert_eq!(Role::BackgroundDark.hex(), "#121C2D");
    }

    #[test]
    fn test_family_from_name() {
        assert_eq!(ColorFamily::from_name("Purple"), Some(ColorFamily::Purple));
        assert_eq!(ColorFamily::from_name("teal"), None);
    }

    #[test]
    fn test_tokens_json_shape() {
        let tokens = tokens_json();
        assert_eq!(tokens["twilio"]["orange"]["70"], "#D94E28");
        assert_eq!(tokens["twilio"]["gray"].as_object().unwrap().len(), 11);
        assert_eq!(tokens["twilio"].as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_tokens_keep_palette_order() {
        let tokens = tokens_json();
        let families: Vec<&str> = tokens["twilio"].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(families, vec!["blue", "red", "green", "orange", "purple", "gray"]);

        let shades: Vec<&str> = tokens["twilio"]["gray"].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(shades, vec!["0", "10", "20", "30", "40", "50", "60", "70", "80", "90", "100"]);
    }

    #[test]
    fn test_tailwind_config_uses_class_dark_mode() {
        let config = tailwind_config();
        assert_eq!(config["darkMode"], "class");
        assert_eq!(config["theme"]["extend"]["colors"]["twilio"]["blue"]["10"], "#E1EFFE");
    }
}
