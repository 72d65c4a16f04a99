use crate::model::song::NoteInterval;

/// Temporal and pitch bounding box of a note collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneExtents {
    pub total_duration: f64,
    pub min_pitch: u8,
    pub pitch_range: u8,
}

impl SceneExtents {
    pub fn of(notes: &[NoteInterval]) -> Self {
        let latest_end = notes
            .iter()
            .map(NoteInterval::end)
            .fold(0.0_f64, f64::max);
        let min_pitch = notes.iter().map(|n| n.pitch).min().unwrap_or(0);
        let max_pitch = notes.iter().map(|n| n.pitch).max().unwrap_or(0);

        Self {
            total_duration: if latest_end > 0.0 { latest_end } else { 1.0 },
            min_pitch,
            pitch_range: (max_pitch - min_pitch).max(1),
        }
    }
}

/// Where the pitch axis sits vertically: `y = height - inset - ratio * (height - margin)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalLayout {
    pub inset: f64,
    pub margin: f64,
}

impl VerticalLayout {
    pub const fn new(inset: f64, margin: f64) -> Self {
        Self { inset, margin }
    }
}

/// Maps (time, pitch) into pixel space for one canvas.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    pub extents: SceneExtents,
    pub width: u32,
    pub height: u32,
}

impl Scene {
    pub fn new(extents: SceneExtents, width: u32, height: u32) -> Self {
        Self {
            extents,
            width,
            height,
        }
    }

    pub fn time_to_x(&self, t: f64) -> f64 {
        (t / self.extents.total_duration) * self.width as f64
    }

    pub fn pitch_to_y(&self, pitch: u8, layout: VerticalLayout) -> f64 {
        let ratio =
            (pitch as f64 - self.extents.min_pitch as f64) / self.extents.pitch_range as f64;
        self.height as f64 - layout.inset - ratio * (self.height as f64 - layout.margin)
    }

    /// Whole-pixel horizontal span of a note.
    pub fn span(&self, note: &NoteInterval) -> (i64, i64) {
        (
            self.time_to_x(note.start).floor() as i64,
            self.time_to_x(note.end()).floor() as i64,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn note(pitch: u8, start: f64, duration: f64, velocity: u8) -> NoteInterval {
        NoteInterval {
            pitch,
            start,
            duration,
            velocity,
        }
    }

    #[test]
    fn three_note_example() {
        let notes = vec![
            note(60, 0.0, 1.0, 100),
            note(64, 0.5, 1.0, 80),
            note(67, 1.5, 0.5, 110),
        ];

        let extents = SceneExtents::of(&notes);
        assert_eq!(extents.total_duration, 2.0);
        assert_eq!(extents.min_pitch, 60);
        assert_eq!(extents.pitch_range, 7);

        let scene = Scene::new(extents, 1000, 300);
        assert_eq!(scene.span(&notes[0]), (0, 500));
        assert_eq!(scene.pitch_to_y(60, VerticalLayout::new(0.0, 50.0)), 300.0);
        assert_eq!(scene.pitch_to_y(67, VerticalLayout::new(0.0, 50.0)), 50.0);
    }

    #[test]
    fn extents_bound_every_note() {
        let notes = vec![
            note(40, 3.25, 0.75, 10),
            note(90, 0.0, 0.1, 10),
            note(41, 1.0, 2.5, 10),
        ];

        let extents = SceneExtents::of(&notes);
        assert!(notes.iter().all(|n| extents.total_duration >= n.end()));
        assert!(extents.pitch_range >= 1);
        assert_eq!(extents.pitch_range, 50);
    }

    #[test]
    fn single_pitch_has_unit_range() {
        let notes = vec![note(72, 0.0, 1.0, 64), note(72, 2.0, 1.0, 64)];
        let extents = SceneExtents::of(&notes);
        assert_eq!(extents.pitch_range, 1);
        assert_eq!(extents.total_duration, 3.0);
    }

    #[test]
    fn empty_collection_falls_back_to_unit_duration() {
        let extents = SceneExtents::of(&[]);
        assert_eq!(extents.total_duration, 1.0);
        assert_eq!(extents.pitch_range, 1);
    }

    #[test]
    fn mappings_are_monotonic() {
        let notes = vec![note(50, 0.0, 4.0, 64), note(70, 1.0, 1.0, 64)];
        let scene = Scene::new(SceneExtents::of(&notes), 800, 400);
        let layout = VerticalLayout::new(50.0, 100.0);

        assert!(scene.time_to_x(1.0) < scene.time_to_x(2.0));
        assert!(scene.pitch_to_y(51, layout) < scene.pitch_to_y(50, layout));
        assert_eq!(scene.pitch_to_y(50, layout), 350.0);
        assert_eq!(scene.pitch_to_y(70, layout), 50.0);
    }
}
