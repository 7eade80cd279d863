//! trail-metrics CLI - trail statistics for GPX files
//!
//! Usage:
//!   trail-metrics stats <file.gpx> [--window N] [--min-segment M] [--config cfg.json] [--json]
//!   trail-metrics profile <file.gpx> [--output profile.csv]
//!   trail-metrics hover <file.gpx> --km <distance>
//!   trail-metrics batch <folder>

use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use trail_metrics::{
    compute_metrics_batch, compute_track_metrics, format_hover_tooltip, load_gpx_file,
    MetricsConfig, ParsedTrack, TrackSummary, ViewSession,
};

#[derive(Parser)]
#[command(name = "trail-metrics")]
#[command(about = "Trail statistics and elevation profiles for GPX tracks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with a MetricsConfig (camelCase keys)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Smoothing window (points on each side)
    #[arg(long, global = true)]
    window: Option<u32>,

    /// Minimum segment length in meters for max-slope candidates
    #[arg(long, global = true)]
    min_segment: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print distance, elevation and slope statistics
    Stats {
        /// GPX file
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the elevation profile as CSV
    Profile {
        /// GPX file
        file: PathBuf,

        /// Output CSV file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the chart point and map position at a distance
    Hover {
        /// GPX file
        file: PathBuf,

        /// Distance along the track in km
        #[arg(long)]
        km: f64,
    },

    /// Summarize every GPX file in a folder
    Batch {
        /// Folder containing GPX files
        folder: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let config = match build_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Commands::Stats { file, json } => run_stats(file, &config, *json),
        Commands::Profile { file, output } => run_profile(file, output.as_deref(), &config),
        Commands::Hover { file, km } => run_hover(file, *km, &config),
        Commands::Batch { folder } => run_batch(folder, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Defaults, then the config file, then individual flags.
fn build_config(cli: &Cli) -> Result<MetricsConfig, String> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("reading {}: {}", path.display(), e))?;
            serde_json::from_str(&text).map_err(|e| format!("parsing {}: {}", path.display(), e))?
        }
        None => MetricsConfig::default(),
    };
    if let Some(window) = cli.window {
        config.smoothing_window = window;
    }
    if let Some(min_segment) = cli.min_segment {
        config.min_slope_segment_m = min_segment;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run_stats(file: &Path, config: &MetricsConfig, json: bool) -> Result<(), String> {
    let track = load_gpx_file(file).map_err(|e| e.to_string())?;
    let metrics = compute_track_metrics(&track.samples, config);

    if json {
        let summary = TrackSummary::from_metrics(&metrics);
        let out = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}", "=".repeat(40));
    println!("{} ({} points)", track.name, track.samples.len());
    println!("{}", "=".repeat(40));
    println!("{}", TrackSummary::from_metrics(&metrics));
    if track.missing_elevation > 0 && !track.is_flat() {
        println!("({} points without elevation, read as 0 m)", track.missing_elevation);
    }
    Ok(())
}

fn run_profile(file: &Path, output: Option<&Path>, config: &MetricsConfig) -> Result<(), String> {
    let track = load_gpx_file(file).map_err(|e| e.to_string())?;
    let metrics = compute_track_metrics(&track.samples, config);

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).map_err(|e| format!("creating {}: {}", path.display(), e))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut writer = BufWriter::new(writer);

    let write_all = |w: &mut BufWriter<Box<dyn Write>>| -> io::Result<()> {
        writeln!(w, "distance_km,elevation_m,latitude,longitude")?;
        for (point, sample) in metrics.chart_points.iter().zip(&track.samples) {
            writeln!(
                w,
                "{:.5},{:.2},{:.7},{:.7}",
                point.distance_km, point.elevation_m, sample.latitude, sample.longitude
            )?;
        }
        w.flush()
    };
    write_all(&mut writer).map_err(|e| e.to_string())?;

    if let Some(path) = output {
        println!("Wrote {} profile points to {}", metrics.len(), path.display());
    }
    Ok(())
}

fn run_hover(file: &Path, km: f64, config: &MetricsConfig) -> Result<(), String> {
    let track = load_gpx_file(file).map_err(|e| e.to_string())?;
    let mut session = ViewSession::load(track.name, track.samples, config);

    match session.hover_distance_km(km) {
        Some(info) => {
            println!(
                "Point #{} at {:.3} km: {:.6}, {:.6}",
                info.index, info.distance_km, info.position.latitude, info.position.longitude
            );
            for line in format_hover_tooltip(info) {
                println!("  {}", line);
            }
            Ok(())
        }
        None => Err("track has no points".to_string()),
    }
}

fn run_batch(folder: &Path, config: &MetricsConfig) -> Result<(), String> {
    let entries = fs::read_dir(folder).map_err(|e| format!("reading folder: {}", e))?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("gpx")))
        .collect();
    paths.sort();

    let mut tracks = Vec::new();
    for path in &paths {
        match load_gpx_file(path) {
            Ok(ParsedTrack { name, samples, .. }) => tracks.push((name, samples)),
            Err(e) => eprintln!("  [ERR] {}", e),
        }
    }

    let results = compute_metrics_batch(&tracks, config);
    for (name, metrics) in &results {
        let s = TrackSummary::from_metrics(metrics);
        println!(
            "{:<40} {:>7.2} km  +{:>5} m  -{:>5} m  max {:>5.1} %",
            name, s.distance_km, s.elevation_gain_m, s.elevation_loss_m, s.max_slope_percent
        );
    }
    println!("\n{} tracks", results.len());
    Ok(())
}
