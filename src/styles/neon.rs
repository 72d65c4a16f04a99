use super::StyleRenderer;
use crate::canvas::Canvas;
use crate::model::song::NoteInterval;
use crate::scene::Scene;
use image::Rgb;
use rand::RngCore;

const GLOW_LAYERS: i64 = 10;
const GLOW_PEAK_ALPHA: f32 = 0.3;
const CORE_WIDTH: i64 = 3;

/// Lines with a translucent halo that fades outward.
pub struct NeonRenderer;

impl NeonRenderer {
    /// Alpha of the glow layer with the given half-width; the widest layer is the faintest.
    pub fn glow_alpha(half_width: i64) -> f32 {
        let falloff = (GLOW_LAYERS + 1 - half_width) as f32 / GLOW_LAYERS as f32;
        GLOW_PEAK_ALPHA * falloff.clamp(0.0, 1.0)
    }
}

impl StyleRenderer for NeonRenderer {
    fn background(&self) -> Rgb<u8> {
        Rgb([0, 0, 0])
    }

    fn draw_note(
        &self,
        canvas: &mut Canvas,
        note: &NoteInterval,
        scene: &Scene,
        color: Rgb<u8>,
        _rng: &mut dyn RngCore,
    ) {
        let (x1, x2) = scene.span(note);
        let y = scene.pitch_to_y(note.pitch, self.layout()).round() as i64;

        for r in (1..=GLOW_LAYERS).rev() {
            canvas.blend_rect(x1, y - r, x2, y + r - 1, color, Self::glow_alpha(r));
        }

        let top = y - CORE_WIDTH / 2;
        canvas.fill_rect(x1, top, x2, top + CORE_WIDTH - 1, color);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::styles::Style;
    use crate::styles::test::paint;

    #[test]
    fn glow_fades_outward() {
        for r in 2..=GLOW_LAYERS {
            assert!(NeonRenderer::glow_alpha(r) < NeonRenderer::glow_alpha(r - 1));
        }
        assert!(NeonRenderer::glow_alpha(GLOW_LAYERS) > 0.0);
    }

    #[test]
    fn core_is_solid_and_halo_is_dimmer() {
        let notes = vec![
            NoteInterval {
                pitch: 60,
                start: 0.0,
                duration: 1.0,
                velocity: 127,
            },
            NoteInterval {
                pitch: 72,
                start: 0.0,
                duration: 1.0,
                velocity: 127,
            },
        ];

        // pitch 72 sits at y = 300 - 250 = 50
        let canvas = paint(Style::Neon, &notes, 0);
        let image = canvas.image();
        let core = *image.get_pixel(500, 50);
        let inner = *image.get_pixel(500, 53);
        let outer = *image.get_pixel(500, 59);
        let outside = *image.get_pixel(500, 61);

        assert_eq!(core, Rgb([255, 0, 0]));
        assert!(inner[0] < core[0] && inner[0] > outer[0]);
        assert!(outer[0] > 0);
        assert_eq!(outside, Rgb([0, 0, 0]));
    }
}
