mod canvas;
mod error;
mod midi_importer;
mod model;
mod painter;
mod postprocess;
mod scene;
mod styles;
mod util;

pub use canvas::*;
pub use error::*;
pub use midi_importer::*;
pub use model::config::*;
pub use model::palette::*;
pub use model::song::*;
pub use painter::*;
pub use postprocess::*;
pub use scene::*;
pub use styles::*;
pub use util::*;
