use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::model::config::RenderConfig;
use crate::model::song::{NoteInterval, Song};
use crate::postprocess::PostProcess;
use crate::scene::{Scene, SceneExtents};
use image::{ImageFormat, RgbImage};
use image::codecs::jpeg::JpegEncoder;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Runs notes through normalization, the configured style and post-processing.
#[derive(Debug)]
pub struct Painter {
    config: RenderConfig,
    rng: StdRng,
}

impl Painter {
    pub fn new(config: RenderConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn paint(&mut self, notes: &[NoteInterval]) -> RgbImage {
        let RenderConfig {
            width,
            height,
            background,
            style,
            palette,
            ..
        } = self.config;

        if notes.is_empty() {
            info!("No notes to paint, returning a blank {}x{} canvas..!", width, height);
            return Canvas::new(width, height, self.config.blank_background()).into_image();
        }

        let extents = SceneExtents::of(notes);
        debug!(
            "Scene extents: {:.3}s, lowest pitch {}, pitch range {}",
            extents.total_duration, extents.min_pitch, extents.pitch_range
        );

        let scene = Scene::new(extents, width, height);
        let canvas = style.render(
            notes,
            &scene,
            &|pitch, velocity| palette.color(pitch, velocity),
            background,
            &mut self.rng,
        );

        let post = PostProcess {
            blur_radius: self.config.blur_radius,
            vignette: self.config.vignette,
            intensity: self.config.intensity,
        };

        info!(
            "Painted {} notes in the {:?} style with the {:?} palette..!",
            notes.len(),
            style,
            palette
        );

        post.apply(canvas).into_image()
    }
}

/// Encodes the image to `path`. JPEG paths honour `quality`; other formats are picked by extension.
pub fn export_image<P: AsRef<Path>>(image: &RgbImage, path: P, quality: u8) -> Result<()> {
    let path = path.as_ref();
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));

    let encode_err = |source| Error::OutputEncode {
        path: path.to_path_buf(),
        source,
    };

    let format = if is_jpeg {
        ImageFormat::Jpeg
    } else {
        ImageFormat::from_path(path).map_err(encode_err)?
    };

    let file = File::create(path).map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    if is_jpeg {
        let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
        encoder.encode_image(image).map_err(encode_err)?;
    } else {
        image.write_to(&mut writer, format).map_err(encode_err)?;
    }

    debug!("Wrote {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

pub fn export_notes_json<P: AsRef<Path>>(song: &Song, path: P) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(song).map_err(|e| write_err(e.into()))?;
    std::fs::write(path, json).map_err(write_err)?;

    info!("Exported {} notes to {}..!", song.notes.len(), path.display());
    Ok(())
}
