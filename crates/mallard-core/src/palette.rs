use tracing::error;

/// Accent color used by presentation adapters that can display one.
/// Platforms without colored output ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a configured color: either a named palette entry or an
    /// `r,g,b` triple. Invalid input is logged and falls back to the
    /// default, never a startup failure.
    pub fn parse(input: &str) -> Self {
        if let Some(color) = named(input) {
            return color;
        }
        if let Some(color) = rgb_triple(input) {
            return color;
        }

        error!("color not recognized: '{input}', using default");
        Self::default()
    }
}

fn named(name: &str) -> Option<Color> {
    let color = match name.trim().to_ascii_lowercase().as_str() {
        "default" => Color::default(),
        "teal" => Color::rgb(0x1a, 0xbc, 0x9c),
        "dark_teal" => Color::rgb(0x11, 0x80, 0x6a),
        "green" => Color::rgb(0x2e, 0xcc, 0x71),
        "dark_green" => Color::rgb(0x1f, 0x8b, 0x4c),
        "blue" => Color::rgb(0x34, 0x98, 0xdb),
        "dark_blue" => Color::rgb(0x20, 0x66, 0x94),
        "purple" => Color::rgb(0x9b, 0x59, 0xb6),
        "dark_purple" => Color::rgb(0x71, 0x36, 0x8a),
        "magenta" => Color::rgb(0xe9, 0x1e, 0x63),
        "dark_magenta" => Color::rgb(0xad, 0x14, 0x57),
        "gold" => Color::rgb(0xf1, 0xc4, 0x0f),
        "dark_gold" => Color::rgb(0xc2, 0x7c, 0x0e),
        "orange" => Color::rgb(0xe6, 0x7e, 0x22),
        "dark_orange" => Color::rgb(0xa8, 0x43, 0x00),
        "red" => Color::rgb(0xe7, 0x4c, 0x3c),
        "dark_red" => Color::rgb(0x99, 0x2d, 0x22),
        "light_grey" => Color::rgb(0x97, 0x9c, 0x9f),
        "lighter_grey" => Color::rgb(0x95, 0xa5, 0xa6),
        "dark_grey" => Color::rgb(0x60, 0x7d, 0x8b),
        "darker_grey" => Color::rgb(0x54, 0x6e, 0x7a),
        "blurple" => Color::rgb(0x72, 0x89, 0xda),
        "greyple" => Color::rgb(0x99, 0xaa, 0xb5),
        _ => return None,
    };
    Some(color)
}

fn rgb_triple(input: &str) -> Option<Color> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }

    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    Some(Color::rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_colors() {
        assert_eq!(Color::parse("gold"), Color::rgb(0xf1, 0xc4, 0x0f));
        assert_eq!(Color::parse("  Dark_Red "), Color::rgb(0x99, 0x2d, 0x22));
        assert_eq!(Color::parse("default"), Color::default());
    }

    #[test]
    fn parses_rgb_triples() {
        assert_eq!(Color::parse("255, 128, 0"), Color::rgb(255, 128, 0));
        assert_eq!(Color::parse("0,0,0"), Color::default());
    }

    #[test]
    fn falls_back_to_default_on_invalid_input() {
        assert_eq!(Color::parse("chartreuse"), Color::default());
        assert_eq!(Color::parse("300,0,0"), Color::default());
        assert_eq!(Color::parse("1,2"), Color::default());
        assert_eq!(Color::parse(""), Color::default());
    }
}
