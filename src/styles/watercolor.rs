use super::StyleRenderer;
use crate::canvas::{Canvas, SMOOTH_MORE};
use crate::model::song::NoteInterval;
use crate::scene::{Scene, VerticalLayout};
use image::Rgb;
use rand::{Rng, RngCore};

const LAYERS: usize = 3;
const JITTER: i64 = 10;
const HALF_HEIGHT: i64 = 20;

/// Overlapping jittered ellipses, smoothed afterwards to soften the edges.
pub struct WatercolorRenderer;

impl StyleRenderer for WatercolorRenderer {
    fn background(&self) -> Rgb<u8> {
        Rgb([240, 240, 235])
    }

    fn layout(&self) -> VerticalLayout {
        VerticalLayout::new(50.0, 100.0)
    }

    fn draw_note(
        &self,
        canvas: &mut Canvas,
        note: &NoteInterval,
        scene: &Scene,
        color: Rgb<u8>,
        rng: &mut dyn RngCore,
    ) {
        let (x1, x2) = scene.span(note);
        let y = scene.pitch_to_y(note.pitch, self.layout()).round() as i64;

        for _ in 0..LAYERS {
            let offset = rng.random_range(-JITTER..=JITTER);
            let radius = rng.random_range(5..=15);
            canvas.fill_ellipse(
                x1 + offset - radius,
                y - HALF_HEIGHT + offset,
                x2 + offset + radius,
                y + HALF_HEIGHT + offset,
                color,
            );
        }
    }

    fn finish(&self, canvas: &mut Canvas) {
        let (kernel, divisor) = SMOOTH_MORE;
        canvas.convolve5x5(&kernel, divisor);
    }
}

#[cfg(test)]
mod test {
    use crate::styles::Style;
    use crate::styles::test::{paint, sample_notes};

    #[test]
    fn different_seeds_scatter_differently() {
        let a = paint(Style::Watercolor, &sample_notes(), 1);
        let b = paint(Style::Watercolor, &sample_notes(), 2);
        assert_ne!(a.image(), b.image());
    }

    #[test]
    fn edges_are_softened() {
        let canvas = paint(Style::Watercolor, &sample_notes(), 5);
        let mut shades: Vec<_> = canvas.image().pixels().map(|p| p.0).collect();
        shades.sort();
        shades.dedup();
        // three flat colors plus the paper would leave four shades without smoothing
        assert!(shades.len() > 4);
    }
}
