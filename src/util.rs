use crate::model::palette::Palette;
use crate::styles::Style;
use log::info;

pub fn parse_style(s: &str) -> Style {
    match s.to_lowercase().as_str() {
        "c" | "classic" | "piano-roll" => Style::Classic,
        "w" | "watercolor" | "watercolour" => Style::Watercolor,
        "n" | "neon" => Style::Neon,
        "p" | "particles" => Style::Particles,
        "g" | "geometric" => Style::Geometric,
        other => {
            info!("Unknown style '{}', defaulting to `classic`..!", other);
            Style::Classic
        }
    }
}

pub fn parse_palette(s: &str) -> Palette {
    match s.to_lowercase().as_str() {
        "hsv" | "rainbow" => Palette::Hsv,
        "ocean" => Palette::Ocean,
        "forest" => Palette::Forest,
        "sunset" => Palette::Sunset,
        "pastel" => Palette::Pastel,
        "grayscale" | "greyscale" | "gray" | "grey" => Palette::Grayscale,
        "fire" => Palette::Fire,
        "ice" => Palette::Ice,
        other => {
            info!("Unknown palette '{}', painting every note in neutral gray..!", other);
            Palette::Neutral
        }
    }
}

/// Parses `R,G,B` (decimal) or `#RRGGBB` into a color triple.
pub fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #RRGGBB, got '{}'", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("bad hex color '{}': {}", s, e))
        };
        return Ok([channel(0)?, channel(2)?, channel(4)?]);
    }

    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(format!("expected R,G,B, got '{}'", s));
    };

    let channel = |c: &str| {
        c.parse::<u8>()
            .map_err(|e| format!("bad color channel '{}': {}", c, e))
    };
    Ok([channel(*r)?, channel(*g)?, channel(*b)?])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn styles_parse_case_insensitively() {
        assert_eq!(parse_style("NEON"), Style::Neon);
        assert_eq!(parse_style("Watercolor"), Style::Watercolor);
        assert_eq!(parse_style("g"), Style::Geometric);
    }

    #[test]
    fn unknown_style_falls_back_to_classic() {
        env_logger::try_init().unwrap_or(());
        assert_eq!(parse_style("cubist"), Style::Classic);
    }

    #[test]
    fn palettes_parse() {
        assert_eq!(parse_palette("Sunset"), Palette::Sunset);
        assert_eq!(parse_palette("grey"), Palette::Grayscale);
        assert_eq!(parse_palette("ice"), Palette::Ice);
    }

    #[test]
    fn unknown_palette_falls_back_to_neutral() {
        env_logger::try_init().unwrap_or(());
        assert_eq!(parse_palette("vaporwave"), Palette::Neutral);
    }

    #[test]
    fn colors_parse() {
        assert_eq!(parse_rgb("15, 15, 25"), Ok([15, 15, 25]));
        assert_eq!(parse_rgb("#ff8000"), Ok([255, 128, 0]));
        assert!(parse_rgb("1,2").is_err());
        assert!(parse_rgb("300,0,0").is_err());
        assert!(parse_rgb("#12345").is_err());
    }
}
