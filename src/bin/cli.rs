//! chippack CLI: batch packing and single-file inspection.
//!
//! Usage:
//!   cp-cli pack [chippack.toml] [--skip-export] [--strict]
//!   cp-cli inspect output/music_00.txt
//!   cp-cli inspect output/sfx_01.txt --sfx

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use cp_formats::load_text;
use cp_master::{write_artifacts, Batch, Config, FamiTracker, CONFIG_FILE};
use cp_pack::{pack_sfx, pack_song, Pool};
use tracing::info;

/// Packs tracker text exports into sound driver data
#[derive(Parser)]
#[command(name = "cp-cli")]
#[command(version)]
struct Cli {
    /// Log every decoded record and pool entry
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export, pack and write every song and sound effect
    Pack(PackArgs),

    /// Show one text export and how it packs
    Inspect(InspectArgs),
}

#[derive(Args)]
struct PackArgs {
    /// Config file; defaults apply if it does not exist
    #[arg(default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding music_NN.ftm and sfx_NN.ftm
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for text exports and generated files
    #[arg(long)]
    output: Option<PathBuf>,

    /// Tracker executable used for text export
    #[arg(long)]
    famitracker: Option<PathBuf>,

    /// Use existing text exports as they are
    #[arg(long)]
    skip_export: bool,

    /// Exit with an error if any problem was reported
    #[arg(long)]
    strict: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Text export to read
    file: PathBuf,

    /// Track number within the export
    #[arg(long, default_value_t = 1)]
    track: usize,

    /// Pack as a sound effect instead of a song
    #[arg(long)]
    sfx: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Pack(args) => pack(args),
        Commands::Inspect(args) => inspect(args),
    }
}

fn load_config(args: &PackArgs) -> Result<Config> {
    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    if let Some(input) = &args.input {
        config.input.dir = input.clone();
    }
    if let Some(output) = &args.output {
        config.output.dir = output.clone();
    }
    if let Some(famitracker) = &args.famitracker {
        config.export.famitracker = famitracker.clone();
    }
    config.export.skip |= args.skip_export;
    Ok(config)
}

fn pack(args: PackArgs) -> Result<()> {
    let config = load_config(&args)?;
    info!(
        input = %config.input.dir.display(),
        output = %config.output.dir.display(),
        "packing"
    );

    let exporter = FamiTracker::new(&config.export.famitracker);
    let mut batch = Batch::new();
    batch.run(&config, &exporter).context("Batch run failed")?;
    let set = batch.finish();

    let written = write_artifacts(&set, &config.output.dir, &config.output.segment)
        .context("Failed to write artifacts")?;

    println!(
        "Packed {} songs and {} sound effects into {} files.",
        set.songs.len(),
        set.tables.sfx.len(),
        written.len()
    );
    if !set.log.is_empty() {
        println!();
        println!("Reported errors:");
        print!("{}", set.log);
        if args.strict {
            bail!("{} errors reported", set.log.len());
        }
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn inspect(args: InspectArgs) -> Result<()> {
    let text = read_text(&args.file)?;
    let loaded = load_text(&text, args.track);
    let track = &loaded.value;

    println!("Title:    {}", track.title);
    println!(
        "Speed:    {}, Tempo: {}, Rows: {}",
        track.speed, track.tempo, track.pattern_length
    );
    print!("{}", cp_ir::summarize(track));
    println!();

    let mut errors: Vec<String> = loaded.errors.iter().map(|e| e.to_string()).collect();

    if args.sfx {
        let packed = pack_sfx(track);
        println!("Mode:     {:?}", packed.value.mode);
        println!("Bytes:    {}", hex(&packed.value.bytes));
        errors.extend(packed.errors.iter().map(|e| e.to_string()));
    } else {
        let mut pool = Pool::new();
        let packed = pack_song(&mut pool, track);
        for (i, frame) in packed.value.order.iter().enumerate() {
            println!("Order {:02X}: {}", i, hex(frame));
        }
        for &index in &packed.value.new_patterns {
            let entry = &pool.patterns()[index];
            println!(
                "Pattern {:02X} ({} {:02X}): {}",
                index,
                entry.channel.name(),
                entry.slot,
                hex(&entry.bytes)
            );
        }
        errors.extend(packed.errors.iter().map(|e| e.to_string()));
    }

    if !errors.is_empty() {
        println!();
        println!("Errors:");
        for e in &errors {
            println!("  {}", e);
        }
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
