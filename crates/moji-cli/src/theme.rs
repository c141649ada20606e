use crossterm::style::Color;
use moji_core::{BarKind, Tile};

/// Color theme for the terminal front end
#[derive(Debug, Clone)]
pub struct Theme {
    /// Default text color
    pub fg: Color,
    /// Secondary text (countdown, hints)
    pub info: Color,
    /// Score header color
    pub header: Color,
    /// Active streak color
    pub success: Color,
    /// Lost streak and fail bar color
    pub error: Color,
    /// Special outcome bar color
    pub special: Color,
    /// Regular distribution bar color
    pub bar: Color,
    /// Bar of today's result
    pub highlight: Color,
    pub empty: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub purple: Color,
    pub orange: Color,
    pub star: Color,
    pub lightbulb: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            header: Color::Rgb { r: 255, g: 210, b: 100 },
            success: Color::Rgb { r: 255, g: 150, b: 60 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            special: Color::Rgb { r: 190, g: 120, b: 255 },
            bar: Color::Rgb { r: 110, g: 115, b: 135 },
            highlight: Color::Rgb { r: 90, g: 200, b: 120 },
            empty: Color::Rgb { r: 58, g: 58, b: 60 },
            green: Color::Rgb { r: 83, g: 141, b: 78 },
            yellow: Color::Rgb { r: 181, g: 159, b: 59 },
            blue: Color::Rgb { r: 76, g: 135, b: 220 },
            purple: Color::Rgb { r: 150, g: 90, b: 200 },
            orange: Color::Rgb { r: 230, g: 130, b: 50 },
            star: Color::Rgb { r: 255, g: 215, b: 0 },
            lightbulb: Color::Rgb { r: 255, g: 240, b: 150 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            header: Color::Rgb { r: 200, g: 120, b: 20 },
            success: Color::Rgb { r: 220, g: 100, b: 20 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            special: Color::Rgb { r: 130, g: 60, b: 200 },
            bar: Color::Rgb { r: 120, g: 124, b: 126 },
            highlight: Color::Rgb { r: 40, g: 160, b: 60 },
            empty: Color::Rgb { r: 211, g: 214, b: 218 },
            green: Color::Rgb { r: 106, g: 170, b: 100 },
            yellow: Color::Rgb { r: 201, g: 180, b: 88 },
            blue: Color::Rgb { r: 60, g: 120, b: 210 },
            purple: Color::Rgb { r: 140, g: 80, b: 190 },
            orange: Color::Rgb { r: 230, g: 120, b: 30 },
            star: Color::Rgb { r: 220, g: 170, b: 0 },
            lightbulb: Color::Rgb { r: 230, g: 200, b: 60 },
        }
    }

    pub fn tile(&self, tile: Tile) -> Color {
        self.style(tile.style_class())
    }

    /// Color of a tile style class
    pub fn style(&self, class: &str) -> Color {
        match class {
            "green" => self.green,
            "yellow" => self.yellow,
            "blue" => self.blue,
            "purple" => self.purple,
            "orange" => self.orange,
            "star" => self.star,
            "lightbulb" => self.lightbulb,
            _ => self.empty,
        }
    }

    pub fn bar(&self, kind: BarKind, highlight: bool) -> Color {
        if highlight {
            return self.highlight;
        }
        match kind {
            BarKind::Normal => self.bar,
            BarKind::Special => self.special,
            BarKind::Fail => self.error,
        }
    }
}
