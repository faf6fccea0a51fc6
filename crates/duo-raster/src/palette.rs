//! Mapping wire colors to panel inks

use std::collections::HashMap;

use duo_core::Color;

use crate::bitmap::Ink;

/// Decides which ink a recorded color is printed with.
///
/// White paints paper, red paints accent and everything else paints black.
/// Explicit entries take precedence; names compare case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    overrides: HashMap<String, Ink>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, name: &str, ink: Ink) -> Self {
        self.overrides.insert(name.to_ascii_lowercase(), ink);
        self
    }

    pub fn ink_for(&self, color: &Color) -> Ink {
        let name = color.as_str().trim().to_ascii_lowercase();
        if let Some(&ink) = self.overrides.get(&name) {
            return ink;
        }
        match name.as_str() {
            "white" | "#fff" | "#ffffff" => Ink::Paper,
            "red" | "accent" | "#f00" | "#ff0000" => Ink::Accent,
            _ => Ink::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping() {
        let palette = Palette::new();
        assert_eq!(palette.ink_for(&Color::WHITE), Ink::Paper);
        assert_eq!(palette.ink_for(&Color::RED), Ink::Accent);
        assert_eq!(palette.ink_for(&Color::new("#FF0000")), Ink::Accent);
        assert_eq!(palette.ink_for(&Color::BLACK), Ink::Black);
        assert_eq!(palette.ink_for(&Color::new("navy")), Ink::Black);
    }

    #[test]
    fn test_overrides_win() {
        let palette = Palette::new()
            .with_color("Orange", Ink::Accent)
            .with_color("red", Ink::Black);
        assert_eq!(palette.ink_for(&Color::new("orange")), Ink::Accent);
        assert_eq!(palette.ink_for(&Color::RED), Ink::Black);
    }
}
