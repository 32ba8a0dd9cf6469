//! Color themes.
//!
//! A theme is a fixed palette; widgets pick the slot they need. Muted
//! variants are derived by blending towards the surface color.

use crate::buffer::Rgb;

/// Named theme presets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ThemeName {
    /// Arctic blues on polar night.
    #[default]
    Nord,
    /// Neutral dark grey with blue accents.
    TextualDark,
}

/// The palette used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Screen background.
    pub background: Rgb,
    /// Stopwatch panel background.
    pub surface: Rgb,
    /// Header and footer background.
    pub panel: Rgb,
    /// Default text.
    pub foreground: Rgb,
    /// Secondary text (idle digits, disabled labels).
    pub foreground_muted: Rgb,
    /// Focus highlight and key hints.
    pub primary: Rgb,
    /// Start button.
    pub success: Rgb,
    /// Stop button.
    pub error: Rgb,
    /// Panel background while running.
    pub success_muted: Rgb,
    /// Neutral buttons.
    pub button: Rgb,
}

impl Theme {
    /// Build the palette for a preset.
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Nord => Self::from_base(
                Rgb::from_u32(0x002E_3440),
                Rgb::from_u32(0x003B_4252),
                Rgb::from_u32(0x0043_4C5E),
                Rgb::from_u32(0x00D8_DEE9),
                Rgb::from_u32(0x0088_C0D0),
                Rgb::from_u32(0x00A3_BE8C),
                Rgb::from_u32(0x00BF_616A),
            ),
            ThemeName::TextualDark => Self::from_base(
                Rgb::from_u32(0x0012_1212),
                Rgb::from_u32(0x001E_1E1E),
                Rgb::from_u32(0x002B_2B2B),
                Rgb::from_u32(0x00E0_E0E0),
                Rgb::from_u32(0x0001_78D4),
                Rgb::from_u32(0x004E_BF71),
                Rgb::from_u32(0x00BA_3C5B),
            ),
        }
    }

    fn from_base(
        background: Rgb,
        surface: Rgb,
        panel: Rgb,
        foreground: Rgb,
        primary: Rgb,
        success: Rgb,
        error: Rgb,
    ) -> Self {
        Self {
            background,
            surface,
            panel,
            foreground,
            foreground_muted: foreground.blend(surface, 0.4),
            primary,
            success,
            error,
            success_muted: surface.blend(success, 0.3),
            button: panel.blend(foreground, 0.15),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::named(ThemeName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nord_base_colors() {
        let theme = Theme::named(ThemeName::Nord);
        assert_eq!(theme.background, Rgb::new(0x2E, 0x34, 0x40));
        assert_eq!(theme.success, Rgb::new(0xA3, 0xBE, 0x8C));
    }

    #[test]
    fn test_running_background_differs_from_idle() {
        for name in [ThemeName::Nord, ThemeName::TextualDark] {
            let theme = Theme::named(name);
            assert_ne!(theme.surface, theme.success_muted);
            assert_ne!(theme.foreground, theme.foreground_muted);
        }
    }
}
