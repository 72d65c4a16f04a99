use crate::canvas::Canvas;
use crate::model::song::NoteInterval;
use crate::scene::{Scene, VerticalLayout};
use image::Rgb;
use log::debug;
use rand::RngCore;

mod classic;
mod geometric;
mod neon;
mod particles;
mod watercolor;

pub use classic::ClassicRenderer;
pub use geometric::GeometricRenderer;
pub use neon::NeonRenderer;
pub use particles::ParticleRenderer;
pub use watercolor::WatercolorRenderer;

/// Maps a note's (pitch, velocity) to the color it is drawn with.
pub type ColorFn<'a> = dyn Fn(u8, u8) -> Rgb<u8> + 'a;

/// Visual style a song is painted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// Piano-roll bars.
    #[default]
    Classic,
    /// Jittered translucent-looking blobs with soft edges.
    Watercolor,
    /// Glowing lines on black.
    Neon,
    /// Clouds of dots whose density follows velocity.
    Particles,
    /// Rectangles, triangles and ellipses chosen by pitch.
    Geometric,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Classic,
        Style::Watercolor,
        Style::Neon,
        Style::Particles,
        Style::Geometric,
    ];

    pub fn renderer(self) -> &'static dyn StyleRenderer {
        match self {
            Style::Classic => &ClassicRenderer,
            Style::Watercolor => &WatercolorRenderer,
            Style::Neon => &NeonRenderer,
            Style::Particles => &ParticleRenderer,
            Style::Geometric => &GeometricRenderer,
        }
    }

    /// Paints every note onto a fresh canvas.
    ///
    /// `background` overrides the style's own background when given. Styles that scatter
    /// marks draw their randomness from `rng`, so a seeded generator gives repeatable output.
    pub fn render(
        self,
        notes: &[NoteInterval],
        scene: &Scene,
        color: &ColorFn,
        background: Option<Rgb<u8>>,
        rng: &mut dyn RngCore,
    ) -> Canvas {
        let renderer = self.renderer();
        let mut canvas = Canvas::new(
            scene.width,
            scene.height,
            background.unwrap_or_else(|| renderer.background()),
        );

        debug!("Rendering {} notes in the {:?} style..!", notes.len(), self);

        for note in notes {
            renderer.draw_note(&mut canvas, note, scene, color(note.pitch, note.velocity), rng);
        }

        renderer.finish(&mut canvas);
        canvas
    }
}

pub trait StyleRenderer: Send + Sync {
    fn background(&self) -> Rgb<u8>;

    /// How the pitch axis is placed vertically for this style.
    fn layout(&self) -> VerticalLayout {
        VerticalLayout::new(0.0, 50.0)
    }

    fn draw_note(
        &self,
        canvas: &mut Canvas,
        note: &NoteInterval,
        scene: &Scene,
        color: Rgb<u8>,
        rng: &mut dyn RngCore,
    );

    /// Whole-canvas pass after every note is drawn.
    fn finish(&self, _canvas: &mut Canvas) {}
}
