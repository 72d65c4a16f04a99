use super::StyleRenderer;
use crate::canvas::Canvas;
use crate::model::song::NoteInterval;
use crate::scene::Scene;
use image::Rgb;
use rand::RngCore;

const THICKNESS: i64 = 30;
const HALF_THICKNESS: i64 = THICKNESS / 2;

/// Angular shapes picked by pitch: rectangles, arrowhead triangles and ellipses.
pub struct GeometricRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rectangle,
    Triangle,
    Ellipse,
}

impl Shape {
    pub fn for_pitch(pitch: u8) -> Self {
        match pitch % 3 {
            0 => Shape::Rectangle,
            1 => Shape::Triangle,
            _ => Shape::Ellipse,
        }
    }
}

impl StyleRenderer for GeometricRenderer {
    fn background(&self) -> Rgb<u8> {
        Rgb([250, 250, 245])
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
        let top = y - HALF_THICKNESS;
        let bottom = top + THICKNESS - 1;

        match Shape::for_pitch(note.pitch) {
            Shape::Rectangle => canvas.fill_rect(x1, top, x2, bottom, color),
            Shape::Triangle => canvas.fill_triangle([(x1, y), (x2, top), (x2, bottom)], color),
            Shape::Ellipse => canvas.fill_ellipse(x1, top, x2, bottom, color),
        }
    }
}
