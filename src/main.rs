use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use midi_canvas::{Args, Painter, RenderConfig, export_image, export_notes_json, import_midi_file};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = RenderConfig::from(&args);

    info!("Importing MIDI file: '{}'...", args.midi.display());
    let song = import_midi_file(&args.midi)?;

    debug!(
        "Imported song '{}' with {} notes..!",
        song.metadata
            .title
            .clone()
            .unwrap_or_else(|| "<unknown>".into()),
        song.notes.len()
    );

    if let Some(path) = &args.export_notes {
        export_notes_json(&song, path)?;
    }

    if args.dry_run {
        info!("Previewing at most {} notes..!", args.dry_run_max);
        for (i, note) in song.notes.iter().take(args.dry_run_max).enumerate() {
            info!(
                "Note {}: pitch={} start={:.3}s dur={:.3}s velocity={} color={:?}",
                i,
                note.pitch,
                note.start,
                note.duration,
                note.velocity,
                config.palette.color(note.pitch, note.velocity).0
            );
        }
        return Ok(());
    }

    let mut painter = Painter::new(config);
    let image = painter.paint(&song.notes);

    export_image(&image, &args.output, config.quality)?;
    info!("Wrote '{}'..!", args.output.display());

    Ok(())
}
