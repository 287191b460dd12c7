use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use eclipse_map::constants::{DEFAULT_RESOLUTION, DEFAULT_SEARCH_STEP, DEFAULT_TIME_STEP};
use eclipse_map::eclipse_errors::EclipseError;
use eclipse_map::ephemeris::AnalyticEphemeris;
use eclipse_map::image_writer::PngWriter;
use eclipse_map::options::{AnnulusPolicy, RunOptions};
use eclipse_map::search::EclipseSearch;
use eclipse_map::time::{advance, parse_instant, Instant};

/// Generate grayscale maps of solar eclipse obscuration over the Earth.
#[derive(Parser)]
#[command(name = "eclipse-map", version)]
struct ClArgs {
    /// Start date, Y-M-D-H-M-S (UTC)
    start: String,

    #[command(flatten)]
    span: Span,

    /// Grid cells per degree
    #[arg(short, long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: u32,

    /// Seconds between maps inside an eclipse
    #[arg(short = 't', long = "time-resolution", default_value_t = DEFAULT_TIME_STEP)]
    time_step: i64,

    /// Seconds between feasibility checks while searching
    #[arg(short = 'p', long = "step", default_value_t = DEFAULT_SEARCH_STEP)]
    search_step: i64,

    /// File name prefix of the maps
    #[arg(short = 'f', long)]
    prefix: Option<String>,

    /// Directory receiving the maps
    #[arg(short, long)]
    output_dir: Option<Utf8PathBuf>,

    /// Value written where the Moon lies entirely inside the Sun
    #[arg(long, value_enum, default_value_t = AnnulusPolicy::Percentage)]
    annulus: AnnulusPolicy,

    /// Increase logging verbosity
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Disable logging
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Span {
    /// Search for this many seconds after the start date
    #[arg(short, long)]
    duration: Option<i64>,

    /// Only map the start date
    #[arg(short, long)]
    single: bool,

    /// Search until this date, Y-M-D-H-M-S (UTC)
    #[arg(short, long)]
    end: Option<String>,
}

fn init_tracing(args: &ClArgs) {
    if args.quiet {
        return;
    }
    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("eclipse-map: cannot install logger: {err}");
    }
}

fn end_instant(start: &Instant, span: &Span) -> Result<Instant, EclipseError> {
    let end = match (&span.end, span.duration) {
        (Some(end), _) => parse_instant(end)?,
        (None, Some(seconds)) => advance(start, seconds),
        (None, None) => *start,
    };
    if end <= *start {
        return Err(EclipseError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(end)
}

fn run(args: &ClArgs) -> Result<(), EclipseError> {
    let options = RunOptions {
        resolution: args.resolution,
        time_step: args.time_step,
        search_step: args.search_step,
        prefix: args.prefix.clone(),
        output_dir: args.output_dir.clone(),
        annulus: args.annulus,
    };
    let start = parse_instant(&args.start)?;
    let ephemeris = AnalyticEphemeris::default();
    let mut writer = PngWriter::from_options(&options);
    let mut search = EclipseSearch::new(&ephemeris, &mut writer, &options)?;

    if args.span.single {
        search.render_instant(&start)?;
    } else {
        let end = end_instant(&start, &args.span)?;
        let summary = search.run(&start, &end)?;
        info!(
            "{} eclipse window(s), {} map(s), {} near miss(es)",
            summary.windows.len(),
            summary.images(),
            summary.near_misses
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = ClArgs::parse();
    init_tracing(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if args.quiet {
                eprintln!("eclipse-map: {err}");
            } else {
                error!("{err}");
            }
            ExitCode::FAILURE
        }
    }
}
