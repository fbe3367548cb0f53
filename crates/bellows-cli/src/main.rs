//! Command-line surface for the bellows engine.
//!
//! Generates layout JSON and maps note/chord event files onto it. The real
//! job pipeline calls the same library entry points; this binary exists for
//! inspection and offline use.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use bellows::{
    generate, preset_layout, preset_names, validate_mapping, BassEvent, BassMapper, ChordUsage,
    Layout, LayoutRequest, MappedBassEvent, MappedNoteEvent, MappingReport, NoteEvent,
    SystemType, TrebleMapper,
};

/// Bellows - accordion layout and fingering mapper
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a layout and print it as JSON
    Layout {
        /// Preset name (see `presets`); overrides the other options
        #[arg(long)]
        preset: Option<String>,

        /// System type: c-system, b-system, freebass-c, freebass-b, stradella
        #[arg(long)]
        system: Option<SystemType>,

        #[arg(long)]
        rows: Option<u32>,

        #[arg(long)]
        columns: Option<u32>,

        /// Starting MIDI note (chromatic systems)
        #[arg(long)]
        start_midi: Option<u8>,

        /// Circle-of-fifths start index (stradella, default 4 = C)
        #[arg(long)]
        start_fifth_index: Option<usize>,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Map a treble note-event file onto a layout
    MapTreble {
        /// Layout JSON produced by `layout`
        #[arg(long)]
        layout: PathBuf,

        /// JSON array of note events
        #[arg(long)]
        events: PathBuf,

        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Map a bass event file onto a layout
    MapBass {
        #[arg(long)]
        layout: PathBuf,

        /// JSON array of bass events
        #[arg(long)]
        events: PathBuf,

        /// Include Stradella chord-usage statistics
        #[arg(long)]
        chord_usage: bool,

        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List available layout presets
    Presets,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrebleOutput {
    events: Vec<MappedNoteEvent>,
    validation: MappingReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BassOutput {
    events: Vec<MappedBassEvent>,
    validation: MappingReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    chord_usage: Option<ChordUsage>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Layout {
            preset,
            system,
            rows,
            columns,
            start_midi,
            start_fifth_index,
            output,
        } => {
            let layout = match (preset, system) {
                (Some(name), _) => preset_layout(&name)?,
                (None, Some(system_type)) => generate(&LayoutRequest {
                    system_type,
                    rows,
                    columns,
                    start_midi,
                    start_fifth_index,
                })?,
                (None, None) => bail!("either --preset or --system is required"),
            };
            info!(system = %layout.system, buttons = layout.buttons.len(), "layout generated");
            emit(&layout, output.as_deref())
        }

        Command::MapTreble {
            layout,
            events,
            output,
        } => {
            let layout: Layout = read_json(&layout)?;
            let events: Vec<NoteEvent> = read_json(&events)?;
            let mapper = TrebleMapper::new(&layout);
            let mapped = mapper.map_events(&events);
            let validation = validate_mapping(&mapped);
            emit(
                &TrebleOutput {
                    events: mapped,
                    validation,
                },
                output.as_deref(),
            )
        }

        Command::MapBass {
            layout,
            events,
            chord_usage,
            output,
        } => {
            let layout: Layout = read_json(&layout)?;
            let events: Vec<BassEvent> = read_json(&events)?;
            let mapper = BassMapper::new(&layout);
            let mapped = mapper.map_events(&events);
            let validation = validate_mapping(&mapped);
            let chord_usage = chord_usage.then(|| mapper.analyze_chord_usage(&mapped));
            emit(
                &BassOutput {
                    events: mapped,
                    validation,
                    chord_usage,
                },
                output.as_deref(),
            )
        }

        Command::Presets => {
            for name in preset_names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
