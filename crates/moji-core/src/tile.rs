use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of tiles in every grid row
pub const GRID_WIDTH: usize = 5;

/// Symbol used for tiles the share table does not know about
pub const BLANK_SYMBOL: &str = "⬜";

/// A single tile in the result grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tile {
    Empty,
    Yellow,
    Green,
    Blue,
    Purple,
    Orange,
    Star,
    Lightbulb,
    BlueCircle,
}

/// Tiles a normal win's final row may be painted with
pub const WIN_TILES: [Tile; 4] = [Tile::Green, Tile::Blue, Tile::Purple, Tile::Yellow];

/// Tiles a special win row is scrambled from
pub const CHAOS_TILES: [Tile; 8] = [
    Tile::Green,
    Tile::Purple,
    Tile::BlueCircle,
    Tile::Lightbulb,
    Tile::Yellow,
    Tile::Blue,
    Tile::Orange,
    Tile::Star,
];

impl Tile {
    pub const ALL: [Tile; 9] = [
        Tile::Empty,
        Tile::Yellow,
        Tile::Green,
        Tile::Blue,
        Tile::Purple,
        Tile::Orange,
        Tile::Star,
        Tile::Lightbulb,
        Tile::BlueCircle,
    ];

    /// Persisted name
    pub fn name(self) -> &'static str {
        match self {
            Tile::Empty => "empty",
            Tile::Yellow => "yellow",
            Tile::Green => "green",
            Tile::Blue => "blue",
            Tile::Purple => "purple",
            Tile::Orange => "orange",
            Tile::Star => "star",
            Tile::Lightbulb => "lightbulb",
            Tile::BlueCircle => "bluecircle",
        }
    }

    /// Share symbol
    pub fn emoji(self) -> &'static str {
        match self {
            Tile::Empty => BLANK_SYMBOL,
            Tile::Yellow => "🟨",
            Tile::Green => "🟩",
            Tile::Blue => "🟦",
            Tile::Purple => "🟪",
            Tile::Orange => "🟠",
            Tile::Star => "⭐",
            Tile::Lightbulb => "💡",
            Tile::BlueCircle => "🔵",
        }
    }

    /// Style class used by front ends; the blue circle shares the blue style
    pub fn style_class(self) -> &'static str {
        match self {
            Tile::BlueCircle => "blue",
            other => other.name(),
        }
    }

    /// Look up a tile by its persisted name
    pub fn from_name(name: &str) -> Option<Tile> {
        Tile::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Look up a tile by its share symbol
    pub fn from_emoji(symbol: &str) -> Option<Tile> {
        Tile::ALL.into_iter().find(|t| t.emoji() == symbol)
    }
}

impl From<String> for Tile {
    fn from(name: String) -> Self {
        Tile::from_name(&name).unwrap_or_else(|| {
            log::warn!("unknown tile {:?}, treating as empty", name);
            Tile::Empty
        })
    }
}

impl From<Tile> for String {
    fn from(tile: Tile) -> Self {
        tile.name().to_string()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.emoji())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbols_are_injective() {
        let symbols: HashSet<&str> = Tile::ALL.iter().map(|t| t.emoji()).collect();
        assert_eq!(symbols.len(), Tile::ALL.len());
    }

    #[test]
    fn test_name_lookup() {
        for tile in Tile::ALL {
            assert_eq!(Tile::from_name(tile.name()), Some(tile));
            assert_eq!(Tile::from_emoji(tile.emoji()), Some(tile));
        }
        assert_eq!(Tile::from_name("magenta"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&[Tile::BlueCircle, Tile::Lightbulb]).unwrap();
        assert_eq!(json, r#"["bluecircle","lightbulb"]"#);

        let tiles: Vec<Tile> = serde_json::from_str(r#"["green","magenta"]"#).unwrap();
        assert_eq!(tiles, vec![Tile::Green, Tile::Empty]);
    }

    #[test]
    fn test_style_class() {
        assert_eq!(Tile::BlueCircle.style_class(), "blue");
        assert_eq!(Tile::Star.style_class(), "star");
    }
}
