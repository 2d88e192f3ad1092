//! Built-in palette presets, brightest slot first.

use crate::color::hex_to_color;
use crate::posterize::Palette;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub colors: [&'static str; 4],
}

impl Preset {
    pub fn palette(&self) -> Palette {
        Palette::new(self.colors.map(hex_to_color))
    }
}

static PRESETS: [Preset; 4] = [
    Preset {
        name: "red",
        colors: ["#FFFFFF", "#FFCCCC", "#CC9999", "#000000"],
    },
    Preset {
        name: "green",
        colors: ["#FFFFFF", "#CCFFCC", "#99CC99", "#000000"],
    },
    Preset {
        name: "blue",
        colors: ["#FFFFFF", "#CCCCFF", "#9999CC", "#000000"],
    },
    Preset {
        name: "yellow",
        colors: ["#FFFFFF", "#FFFFCC", "#CCCC99", "#000000"],
    },
];

pub fn presets() -> &'static [Preset] {
    &PRESETS
}

/// Case-insensitive lookup by name.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let name = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn four_presets_in_order() {
        let names: Vec<&str> = presets().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["red", "green", "blue", "yellow"]);
    }

    #[test]
    fn presets_run_white_to_black() {
        for p in presets() {
            let pal = p.palette();
            assert_eq!(pal.colors()[0], Color::new(255, 255, 255), "{}", p.name);
            assert_eq!(pal.colors()[3], Color::new(0, 0, 0), "{}", p.name);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find_preset("Blue").map(|p| p.name), Some("blue"));
        assert_eq!(find_preset(" yellow ").map(|p| p.colors[2]), Some("#CCCC99"));
        assert!(find_preset("purple").is_none());
    }

    #[test]
    fn default_palette_is_first_preset() {
        assert_eq!(Palette::default(), presets()[0].palette());
        assert_eq!(Palette::default().colors()[1], Color::new(0xFF, 0xCC, 0xCC));
    }
}
