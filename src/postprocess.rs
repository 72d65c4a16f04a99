use crate::canvas::Canvas;
use image::Rgb;
use log::debug;

const VIGNETTE_MAX_ALPHA: f64 = 70.0;

/// Blur and vignette applied to every rendered canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostProcess {
    pub blur_radius: f32,
    pub vignette: bool,
    pub intensity: f32,
}

impl PostProcess {
    pub fn apply(&self, canvas: Canvas) -> Canvas {
        let mut canvas = if self.blur_radius > 0.0 {
            debug!("Blurring with radius {}..!", self.blur_radius);
            Canvas::from_image(image::imageops::blur(canvas.image(), self.blur_radius))
        } else {
            canvas
        };

        if self.vignette {
            apply_vignette(&mut canvas, self.intensity);
        }

        canvas
    }
}

/// Alpha (out of 255) of the `ring`-th border ring counting inward.
pub fn vignette_alpha(ring: u32, rings: u32, intensity: f32) -> u8 {
    if rings == 0 {
        return 0;
    }

    let fade = 1.0 - ring as f64 / rings as f64;
    (VIGNETTE_MAX_ALPHA * fade * intensity.clamp(0.0, 1.0) as f64) as u8
}

/// Darkens the border with concentric one-pixel rings fading out toward the center.
pub fn apply_vignette(canvas: &mut Canvas, intensity: f32) {
    let (width, height) = (canvas.width(), canvas.height());
    let rings = width.min(height) / 3;

    debug!("Applying a {} ring vignette at intensity {}..!", rings, intensity);

    for i in 0..rings {
        let alpha = vignette_alpha(i, rings, intensity);
        if alpha == 0 {
            continue;
        }

        let i = i as i64;
        canvas.blend_outline(
            i,
            i,
            width as i64 - i,
            height as i64 - i,
            Rgb([0, 0, 0]),
            alpha as f32 / 255.0,
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn gray_canvas() -> Canvas {
        let mut canvas = Canvas::new(90, 60, Rgb([200, 200, 200]));
        canvas.fill_rect(30, 20, 60, 40, Rgb([10, 120, 240]));
        canvas
    }

    #[test]
    fn zero_intensity_vignette_is_a_no_op() {
        let before = gray_canvas();
        let mut after = before.clone();
        apply_vignette(&mut after, 0.0);
        assert_eq!(before.image(), after.image());
    }

    #[test]
    fn vignette_darkens_edges_more_than_center() {
        let mut canvas = gray_canvas();
        apply_vignette(&mut canvas, 1.0);
        let image = canvas.image();

        let corner = image.get_pixel(0, 0)[0];
        let inner = image.get_pixel(10, 10)[0];
        let untouched = image.get_pixel(25, 30)[0];

        assert!(corner < inner);
        assert!(inner < 200);
        assert_eq!(*image.get_pixel(45, 30), Rgb([10, 120, 240]));
        assert_eq!(untouched, 200);
    }

    #[test]
    fn ring_alpha_falls_linearly() {
        assert_eq!(vignette_alpha(0, 10, 1.0), 70);
        assert_eq!(vignette_alpha(5, 10, 1.0), 35);
        assert_eq!(vignette_alpha(9, 10, 0.0), 0);
        assert_eq!(vignette_alpha(0, 0, 1.0), 0);
    }

    #[test]
    fn ring_alpha_truncates_at_default_intensity() {
        assert_eq!(vignette_alpha(0, 100, 0.7), 48);
        assert_eq!(vignette_alpha(50, 100, 0.7), 24);
    }

    #[test]
    fn no_blur_and_no_vignette_is_identity() {
        let before = gray_canvas();
        let after = PostProcess {
            blur_radius: 0.0,
            vignette: false,
            intensity: 1.0,
        }
        .apply(before.clone());
        assert_eq!(before.image(), after.image());
    }

    #[test]
    fn blur_softens_hard_edges() {
        let before = gray_canvas();
        let after = PostProcess {
            blur_radius: 2.0,
            vignette: false,
            intensity: 0.0,
        }
        .apply(before.clone());

        assert_eq!(after.image().dimensions(), (90, 60));
        assert_ne!(*after.image().get_pixel(30, 30), *before.image().get_pixel(30, 30));
    }
}
