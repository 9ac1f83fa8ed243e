mod config;
mod error;
mod render;

use anyhow::Result;
use clap::Parser;
use error::PlannerError;
use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use seating::{Classroom, Config, DisableOutcome, DisplacementPolicy, LockOutcome, read_roster_file};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Seat a class roster at two-seat desks", long_about = None)]
struct Args {
    /// Roster file, one `name,gender` per line
    #[arg(short, long)]
    roster: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Desk rows (overrides the config file)
    #[arg(long)]
    rows: Option<usize>,

    /// Desk columns (overrides the config file)
    #[arg(long)]
    cols: Option<usize>,

    /// Let leftover singles share a desk across genders
    #[arg(long)]
    allow_mixed_gender: bool,

    /// Prefer mixed-gender desks
    #[arg(long)]
    ignore_gender: bool,

    /// Reseat randomly after import instead of keeping roster order
    #[arg(short, long)]
    shuffle: bool,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Toggle a seat's disabled flag (repeatable)
    #[arg(long = "disable", value_name = "SEAT")]
    disable: Vec<String>,

    /// Toggle a seat lock (repeatable)
    #[arg(long = "lock", value_name = "SEAT")]
    lock: Vec<String>,

    /// Swap two seats after seating (repeatable)
    #[arg(long = "swap", value_name = "SEAT:SEAT")]
    swap: Vec<String>,

    /// Refuse to disable an occupied seat when nobody can be moved
    #[arg(long)]
    strict_disable: bool,

    /// Do not write the CSV export
    #[arg(long)]
    no_export: bool,
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let output = config::OutputConfig::from_env()?;

    let mut room = Classroom::from_config(&config);
    let entries = read_roster_file(&args.roster)?;
    info!("Loaded {} roster rows from {}", entries.len(), args.roster.display());
    room.import(entries);

    for id in &args.disable {
        let seat = room.resolve(id)?;
        match room.toggle_disable(seat)? {
            DisableOutcome::Enabled => info!("Enabled {seat}"),
            DisableOutcome::Disabled => info!("Disabled {seat}"),
            DisableOutcome::Relocated { person, to } => {
                info!("Disabled {seat}, moved {} to {to}", person.name)
            }
            DisableOutcome::Dropped { person } => {
                warn!("Disabled {seat}, {} has no seat left", person.name)
            }
        }
    }

    for id in &args.lock {
        let seat = room.resolve(id)?;
        match room.toggle_lock(seat)? {
            LockOutcome::Locked(person) => info!("Locked {} to {seat}", person.name),
            LockOutcome::Unlocked => info!("Unlocked {seat}"),
            LockOutcome::Unchanged => warn!("Seat {seat} is empty, nothing to lock"),
        }
    }

    if args.shuffle {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        room.shuffle(&mut rng);
    }

    for pair in &args.swap {
        let (a, b) = pair
            .split_once(':')
            .ok_or_else(|| PlannerError::InvalidSwap(pair.clone()))?;
        let (a, b) = (room.resolve(a)?, room.resolve(b)?);
        if room.swap(a, b)? {
            info!("Swapped {a} and {b}, locks released");
        } else {
            info!("Swapped {a} and {b}");
        }
    }

    println!("{}", render::render_grid(&room.desks()));

    let unseated = room.unseated();
    if !unseated.is_empty() {
        let names: Vec<&str> = unseated.iter().map(|p| p.name.as_str()).collect();
        warn!("{} unseated: {}", names.len(), names.join(", "));
    }

    if args.no_export {
        return Ok(());
    }

    if let Some(ref dir) = output.output_dir {
        debug!("Exporting to directory: {}", dir.display());
    }
    match room.export_to(output.output_dir.as_deref()) {
        Ok(path) => info!("Seating saved to: {}", path.display()),
        Err(e) => {
            let e = anyhow::Error::from(e);
            error!("Error: {e}");
            log_export_hint(&e);
            return Err(e);
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let config = Config::load_from_file(path)?;
            info!("Loaded configuration from {}", path.display());
            config
        }
        None => Config::default(),
    };

    if let Some(rows) = args.rows {
        config.grid.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.grid.cols = cols;
    }
    config.grid.allow_mixed_gender |= args.allow_mixed_gender;
    config.grid.ignore_gender |= args.ignore_gender;
    if args.strict_disable {
        config.engine.displacement = DisplacementPolicy::Reject;
    }

    config
        .validate()
        .map_err(|e| PlannerError::InvalidConfiguration(e.to_string()))?;
    Ok(config)
}

// Provide helpful hints for common errors
fn log_export_hint(e: &anyhow::Error) {
    use std::io::ErrorKind;
    for cause in e.chain() {
        if let Some(ioe) = cause.downcast_ref::<std::io::Error>() {
            match ioe.kind() {
                ErrorKind::PermissionDenied => {
                    error!("Hint: Run in a writable directory or set SEAT_PLANNER_OUTPUT_DIR.");
                    break;
                }
                ErrorKind::NotADirectory | ErrorKind::AlreadyExists => {
                    error!("Hint: SEAT_PLANNER_OUTPUT_DIR must point to a directory.");
                    break;
                }
                _ => {}
            }
        }
    }
}
