use super::StyleRenderer;
use crate::canvas::Canvas;
use crate::model::song::NoteInterval;
use crate::scene::Scene;
use image::Rgb;
use rand::RngCore;

const BAR_THICKNESS: i64 = 20;

/// Piano-roll bars of fixed thickness centered on the pitch line.
pub struct ClassicRenderer;

impl StyleRenderer for ClassicRenderer {
    fn background(&self) -> Rgb<u8> {
        Rgb([20, 20, 30])
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
        let y = scene.pitch_to_y(note.pitch, self.layout());
        let top = (y - BAR_THICKNESS as f64 / 2.0).round() as i64;

        canvas.fill_rect(x1, top, x2, top + BAR_THICKNESS - 1, color);
    }
}

#[cfg(test)]
mod test {
    use crate::styles::Style;
    use crate::styles::test::{paint, sample_notes};
    use image::Rgb;

    #[test]
    fn first_note_spans_half_the_canvas_at_the_bottom() {
        let canvas = paint(Style::Classic, &sample_notes(), 0);
        let image = canvas.image();

        // C4 at velocity 100 in the hsv palette
        let c4 = *image.get_pixel(250, 295);
        assert_ne!(c4, Rgb([20, 20, 30]));
        assert_eq!(c4[1], c4[2]);
        assert!(c4[0] > c4[1]);

        // bar is 20px tall centered at y=300, so only the top half is on the canvas
        assert_eq!(*image.get_pixel(250, 290), c4);
        assert_eq!(*image.get_pixel(250, 289), Rgb([20, 20, 30]));
    }

    #[test]
    fn classic_is_deterministic_regardless_of_seed() {
        let a = paint(Style::Classic, &sample_notes(), 1);
        let b = paint(Style::Classic, &sample_notes(), 2);
        assert_eq!(a.image(), b.image());
    }
}
