use std::fmt;

use ratatui::style::Color;

/// Colour scheme picked in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Jungle,
    Neon,
    Mono,
}

/// Colours the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub head: Color,
    pub body: Color,
    pub food: Color,
    pub obstacle: Color,
    pub empty: Color,
    pub border: Color,
    pub accent: Color,
}

impl Theme {
    #[cfg(test)]
    pub const ALL: [Theme; 3] = [Theme::Jungle, Theme::Neon, Theme::Mono];

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Jungle => Palette {
                head: Color::LightGreen,
                body: Color::Green,
                food: Color::Red,
                obstacle: Color::Rgb(139, 69, 19),
                empty: Color::DarkGray,
                border: Color::White,
                accent: Color::Yellow,
            },
            Theme::Neon => Palette {
                head: Color::Cyan,
                body: Color::Magenta,
                food: Color::LightYellow,
                obstacle: Color::LightRed,
                empty: Color::Rgb(40, 40, 60),
                border: Color::LightMagenta,
                accent: Color::LightCyan,
            },
            Theme::Mono => Palette {
                head: Color::White,
                body: Color::Gray,
                food: Color::White,
                obstacle: Color::DarkGray,
                empty: Color::Black,
                border: Color::Gray,
                accent: Color::White,
            },
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Theme::Jungle => Theme::Neon,
            Theme::Neon => Theme::Mono,
            Theme::Mono => Theme::Jungle,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Theme::Jungle => Theme::Mono,
            Theme::Neon => Theme::Jungle,
            Theme::Mono => Theme::Neon,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Jungle => write!(f, "Jungle"),
            Theme::Neon => write!(f, "Neon"),
            Theme::Mono => write!(f, "Mono"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle() {
        for theme in Theme::ALL {
            assert_eq!(theme.next().prev(), theme);
        }
        assert_eq!(Theme::Mono.next(), Theme::Jungle);
    }

    #[test]
    fn test_palettes_keep_food_visible() {
        for theme in Theme::ALL {
            let palette = theme.palette();
            assert_ne!(palette.food, palette.empty);
            assert_ne!(palette.obstacle, palette.empty);
        }
    }
}
