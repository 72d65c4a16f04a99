use crate::model::palette::Palette;
use crate::styles::Style;
use crate::util::{parse_palette, parse_rgb, parse_style};
use clap::Parser;
use image::Rgb;
use std::path::PathBuf;

/// Background of a song with no notes.
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([15, 15, 25]);

#[derive(Parser, Debug)]
#[command(
    name = "midi_canvas",
    about = "Paint a MIDI file as a static image!"
)]
pub struct Args {
    /// Path to the source MIDI file.
    pub midi: PathBuf,

    /// Where to write the image. `.jpg`/`.jpeg` paths are JPEG encoded, anything else by extension.
    #[arg(default_value = "artwork.png")]
    pub output: PathBuf,

    /// Image width in pixels.
    #[arg(long, default_value_t = 2000)]
    pub width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 500)]
    pub height: u32,

    /// Background color as `R,G,B` or `#RRGGBB`. Defaults to each style's own background.
    #[arg(short, long, value_parser = parse_rgb)]
    pub background: Option<[u8; 3]>,

    /// Visual style: classic|watercolor|neon|particles|geometric.
    #[arg(short, long, default_value = "classic")]
    pub style: String,

    /// Color palette: hsv|ocean|forest|sunset|pastel|grayscale|fire|ice.
    #[arg(short, long, default_value = "hsv")]
    pub palette: String,

    /// Skip the darkened border.
    #[arg(long, default_value_t = false)]
    pub no_vignette: bool,

    /// Gaussian blur radius applied after rendering, 0 to disable.
    #[arg(long, default_value_t = 0.5)]
    pub blur_radius: f32,

    /// Strength of the vignette, between 0 and 1.
    #[arg(short, long, default_value_t = 0.7)]
    pub intensity: f32,

    /// Seed for the randomized styles, for repeatable output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Encoder quality for lossy formats.
    #[arg(short, long, default_value_t = 95)]
    pub quality: u8,

    /// Dry run (print the first dry_run_max notes and exit).
    #[arg(short, long, default_value_t = false)]
    pub dry_run: bool,

    /// Maximum notes to print in dry run.
    #[arg(long, default_value_t = 80)]
    pub dry_run_max: usize,

    /// Also write the reconstructed notes to this path as JSON.
    #[arg(long = "export-notes")]
    pub export_notes: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Overrides the style background, and fills the canvas when there are no notes.
    pub background: Option<Rgb<u8>>,
    pub style: Style,
    pub palette: Palette,
    pub vignette: bool,
    pub blur_radius: f32,
    pub intensity: f32,
    pub seed: Option<u64>,
    pub quality: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 500,
            background: None,
            style: Style::Classic,
            palette: Palette::Hsv,
            vignette: true,
            blur_radius: 0.5,
            intensity: 0.7,
            seed: None,
            quality: 95,
        }
    }
}

impl RenderConfig {
    pub fn blank_background(&self) -> Rgb<u8> {
        self.background.unwrap_or(DEFAULT_BACKGROUND)
    }
}

impl From<&Args> for RenderConfig {
    fn from(args: &Args) -> Self {
        Self {
            width: args.width.max(1),
            height: args.height.max(1),
            background: args.background.map(Rgb),
            style: parse_style(&args.style),
            palette: parse_palette(&args.palette),
            vignette: !args.no_vignette,
            blur_radius: args.blur_radius.max(0.0),
            intensity: args.intensity.clamp(0.0, 1.0),
            seed: args.seed,
            quality: args.quality.clamp(1, 100),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cli_defaults_match_render_defaults() {
        let args = Args::parse_from(["midi_canvas", "song.mid"]);
        assert_eq!(args.output, PathBuf::from("artwork.png"));
        assert_eq!(RenderConfig::from(&args), RenderConfig::default());
    }

    #[test]
    fn cli_options_are_applied() {
        let args = Args::parse_from([
            "midi_canvas",
            "song.mid",
            "out.jpg",
            "--width",
            "3000",
            "--height",
            "800",
            "--style",
            "geometric",
            "--palette",
            "fire",
            "--background",
            "1,2,3",
            "--no-vignette",
            "--intensity",
            "4.5",
            "--seed",
            "7",
        ]);

        let config = RenderConfig::from(&args);
        assert_eq!(config.width, 3000);
        assert_eq!(config.height, 800);
        assert_eq!(config.style, Style::Geometric);
        assert_eq!(config.palette, Palette::Fire);
        assert_eq!(config.background, Some(Rgb([1, 2, 3])));
        assert!(!config.vignette);
        assert_eq!(config.intensity, 1.0);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn bad_background_is_rejected() {
        let parsed = Args::try_parse_from(["midi_canvas", "song.mid", "--background", "red"]);
        assert!(parsed.is_err());
    }
}
