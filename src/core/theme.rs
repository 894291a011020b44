use serde::{Deserialize, Serialize};

/// The closed set of visual themes. `Dark` is the neutral dark theme with no palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Blue,
    BlueDark,
    #[default]
    Dark,
    KawaiiPink,
    KawaiiLavender,
    KawaiiPinkDark,
    KawaiiLavenderDark,
}

/// Selectable base palettes; combined with light/dark mode they yield a [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    KawaiiPink,
    KawaiiLavender,
    Blue,
}

impl Palette {
    pub const ALL: &'static [Palette] = &[Palette::KawaiiPink, Palette::KawaiiLavender, Palette::Blue];

    pub fn label(&self) -> &'static str {
        match self {
            Self::KawaiiPink => "Pink",
            Self::KawaiiLavender => "Lavender",
            Self::Blue => "Blue",
        }
    }
}

impl Theme {
    pub const ALL: &'static [Theme] = &[
        Theme::Blue,
        Theme::BlueDark,
        Theme::Dark,
        Theme::KawaiiPink,
        Theme::KawaiiLavender,
        Theme::KawaiiPinkDark,
        Theme::KawaiiLavenderDark,
    ];

    pub fn as_id(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::BlueDark => "blue-dark",
            Self::Dark => "dark",
            Self::KawaiiPink => "kawaii-pink",
            Self::KawaiiLavender => "kawaii-lavender",
            Self::KawaiiPinkDark => "kawaii-pink-dark",
            Self::KawaiiLavenderDark => "kawaii-lavender-dark",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_id() == s)
    }

    pub fn is_dark(&self) -> bool {
        matches!(
            self,
            Self::BlueDark | Self::Dark | Self::KawaiiPinkDark | Self::KawaiiLavenderDark
        )
    }

    /// `None` for the neutral dark theme.
    pub fn palette(&self) -> Option<Palette> {
        match self {
            Self::Blue | Self::BlueDark => Some(Palette::Blue),
            Self::KawaiiPink | Self::KawaiiPinkDark => Some(Palette::KawaiiPink),
            Self::KawaiiLavender | Self::KawaiiLavenderDark => Some(Palette::KawaiiLavender),
            Self::Dark => None,
        }
    }

    pub fn from_parts(palette: Palette, dark: bool) -> Self {
        match (palette, dark) {
            (Palette::Blue, false) => Self::Blue,
            (Palette::Blue, true) => Self::BlueDark,
            (Palette::KawaiiPink, false) => Self::KawaiiPink,
            (Palette::KawaiiPink, true) => Self::KawaiiPinkDark,
            (Palette::KawaiiLavender, false) => Self::KawaiiLavender,
            (Palette::KawaiiLavender, true) => Self::KawaiiLavenderDark,
        }
    }

    /// Flip light/dark, keeping the palette. The neutral dark theme has no
    /// light twin and switches to light blue.
    pub fn toggled(&self) -> Self {
        match self.palette() {
            Some(palette) => Self::from_parts(palette, !self.is_dark()),
            None => Self::Blue,
        }
    }

    /// Switch palette, keeping the current light/dark mode.
    pub fn with_palette(&self, palette: Palette) -> Self {
        Self::from_parts(palette, self.is_dark())
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_id())
    }
}
