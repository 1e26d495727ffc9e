//! Display colors for language badges.

/// Which set of colors to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Hex colors for the skills list and the featured grid.
    Badge,
    /// HSL colors for standalone repository cards.
    Card,
}

const BADGE_COLORS: &[(&str, &str)] = &[
    ("TypeScript", "#3178c6"),
    ("JavaScript", "#f7df1e"),
    ("Python", "#3776ab"),
    ("Rust", "#dea584"),
    ("Go", "#00add8"),
    ("Java", "#b07219"),
    ("Ruby", "#cc342d"),
    ("CSS", "#563d7c"),
    ("HTML", "#e34c26"),
    ("Shell", "#89e051"),
    ("C", "#555555"),
    ("C++", "#f34b7d"),
];

const CARD_COLORS: &[(&str, &str)] = &[
    ("TypeScript", "hsl(210 80% 60%)"),
    ("JavaScript", "hsl(45 90% 55%)"),
    ("Python", "hsl(210 55% 55%)"),
    ("Rust", "hsl(25 75% 55%)"),
    ("Go", "hsl(195 65% 50%)"),
    ("Java", "hsl(20 75% 55%)"),
    ("Ruby", "hsl(0 65% 55%)"),
    ("CSS", "hsl(280 55% 60%)"),
    ("HTML", "hsl(15 75% 55%)"),
    ("Shell", "hsl(140 45% 50%)"),
    ("C", "hsl(210 40% 55%)"),
    ("C++", "hsl(340 50% 55%)"),
];

impl Palette {
    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Palette::Badge => BADGE_COLORS,
            Palette::Card => CARD_COLORS,
        }
    }

    /// Color used for languages missing from the table.
    pub fn fallback(self) -> &'static str {
        match self {
            Palette::Badge => "#666",
            Palette::Card => "hsl(var(--muted-foreground))",
        }
    }

    /// Exact-match lookup; `None` for unknown languages.
    pub fn get(self, language: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(name, _)| *name == language)
            .map(|(_, color)| *color)
    }
}

/// Color for `language`, falling back to the palette default.
pub fn language_color(language: &str, palette: Palette) -> &'static str {
    palette.get(language).unwrap_or_else(|| palette.fallback())
}
