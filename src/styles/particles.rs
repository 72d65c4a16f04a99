use super::StyleRenderer;
use crate::canvas::Canvas;
use crate::model::song::NoteInterval;
use crate::scene::Scene;
use image::Rgb;
use rand::{Rng, RngCore};

const SCATTER: i64 = 30;

/// A cloud of small dots around the middle of each note.
pub struct ParticleRenderer;

impl ParticleRenderer {
    /// One particle per ten steps of velocity.
    pub fn particle_count(velocity: u8) -> usize {
        (velocity / 10) as usize
    }
}

impl StyleRenderer for ParticleRenderer {
    fn background(&self) -> Rgb<u8> {
        Rgb([10, 10, 20])
    }

    fn draw_note(
        &self,
        canvas: &mut Canvas,
        note: &NoteInterval,
        scene: &Scene,
        color: Rgb<u8>,
        rng: &mut dyn RngCore,
    ) {
        let x = scene.time_to_x(note.start + note.duration / 2.0).floor() as i64;
        let y = scene.pitch_to_y(note.pitch, self.layout()).round() as i64;

        for _ in 0..Self::particle_count(note.velocity) {
            let px = x + rng.random_range(-SCATTER..=SCATTER);
            let py = y + rng.random_range(-SCATTER..=SCATTER);
            let size = rng.random_range(1..=5);
            canvas.fill_ellipse(px - size, py - size, px + size, py + size, color);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::styles::Style;
    use crate::styles::test::paint;

    #[test]
    fn density_follows_velocity() {
        assert_eq!(ParticleRenderer::particle_count(0), 0);
        assert_eq!(ParticleRenderer::particle_count(9), 0);
        assert_eq!(ParticleRenderer::particle_count(100), 10);
        assert_eq!(ParticleRenderer::particle_count(127), 12);
    }

    #[test]
    fn quiet_notes_leave_no_trace() {
        let notes = vec![NoteInterval {
            pitch: 60,
            start: 0.0,
            duration: 1.0,
            velocity: 5,
        }];

        let canvas = paint(Style::Particles, &notes, 9);
        assert!(canvas.image().pixels().all(|p| *p == Rgb([10, 10, 20])));
    }

    #[test]
    fn particles_stay_near_the_note() {
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
                velocity: 0,
            },
        ];

        // the loud note is centered at (500, 300)
        let canvas = paint(Style::Particles, &notes, 11);
        for (x, y, p) in canvas.image().enumerate_pixels() {
            if *p != Rgb([10, 10, 20]) {
                assert!((465..=535).contains(&x), "stray particle at x={}", x);
                assert!(y >= 265, "stray particle at y={}", y);
            }
        }
    }
}
