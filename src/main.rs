/*!
Chartify command line interface

Inspect a data file, build chart series from it, or move a chart
configuration in and out of a share link. `config` shows the settings in
effect and can write them out as a starting file.
*/

use anyhow::{Context, Result, bail};
use chartify::data::load_file;
use chartify::export::{export_filename, write_series_json};
use chartify::settings::{Settings, default_settings_path};
use chartify::share::{decode_state_from_fragment, encode_state_to_url, fragment_of};
use chartify::state::{Action, AppState, FilterPatch};
use chartify::types::{ChartType, FilterOp, MappingTarget, Summary};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chartify")]
#[command(about = "Turn CSV/JSON files into chart series and shareable links")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the columns of a file and their inferred types
    Inspect {
        file: PathBuf,
    },

    /// Print the chart series for a file as JSON
    Chart {
        file: PathBuf,

        #[command(flatten)]
        chart: ChartArgs,

        /// Write the series here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print a share link carrying the file and chart configuration
    Share {
        file: PathBuf,

        #[command(flatten)]
        chart: ChartArgs,

        /// Page the link points at (defaults to the configured one)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Rebuild the chart encoded in a share link
    Restore {
        /// Full URL or bare `#state=...` fragment
        link: String,

        /// Write the series here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the settings in effect
    Config {
        /// Write them to the settings file if it does not exist yet
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct ChartArgs {
    /// bar, line, scatter or pie
    #[arg(long = "type", default_value = "bar")]
    chart_type: ChartType,

    /// X column (bar, line, scatter)
    #[arg(long)]
    x: Option<String>,

    /// Y column (bar, line, scatter)
    #[arg(long)]
    y: Option<String>,

    /// Column splitting the data into one dataset per value
    #[arg(long)]
    group_by: Option<String>,

    /// sum or count (bar, line)
    #[arg(long)]
    summary: Option<Summary>,

    /// Category column (pie)
    #[arg(long)]
    category: Option<String>,

    /// Value column (pie)
    #[arg(long)]
    value: Option<String>,

    /// Filter as column:op:value[:value2]; repeatable
    #[arg(long = "filter", value_name = "RULE")]
    filters: Vec<String>,

    #[arg(long)]
    palette: Option<String>,

    /// Chart title (defaults to the file name)
    #[arg(long)]
    title: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Inspect { file } => cmd_inspect(&file, &settings),
        Commands::Chart {
            file,
            chart,
            output,
        } => {
            let state = build_state(&file, &chart, &settings)?;
            emit_series(&state, output.as_deref())
        }
        Commands::Share {
            file,
            chart,
            base_url,
        } => {
            let state = build_state(&file, &chart, &settings)?;
            let base_url = base_url.unwrap_or_else(|| settings.share_base_url.clone());
            let url = encode_state_to_url(&base_url, &state).context("Failed to encode share link")?;
            println!("{url}");
            Ok(())
        }
        Commands::Restore { link, output } => cmd_restore(&link, output.as_deref()),
        Commands::Config { init } => {
            let path = cli.config.or_else(default_settings_path);
            cmd_config(path.as_deref(), &settings, init)
        }
    }
}

fn cmd_config(path: Option<&Path>, settings: &Settings, init: bool) -> Result<()> {
    match path {
        Some(path) => eprintln!("Settings file: {}", path.display()),
        None => eprintln!("No config directory on this platform"),
    }
    println!("{}", serde_json::to_string_pretty(settings)?);

    if init {
        let Some(path) = path else {
            bail!("No settings file location; pass --config");
        };
        if path.exists() {
            tracing::info!("{} already exists, leaving it as is", path.display());
        } else {
            settings
                .save_to(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn cmd_inspect(file: &Path, settings: &Settings) -> Result<()> {
    let loaded = load_file(file, &settings.load_limits())
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let state = AppState::new().reduce_with_sample(Action::DataLoaded(loaded.rows), settings.sample_size);

    println!("{} ({}, {} rows)", loaded.name, loaded.format.label(), state.rows.len());
    for column in &state.columns {
        println!("  {:<24} {}", column.name, column.column_type.label());
    }
    Ok(())
}

fn cmd_restore(link: &str, output: Option<&Path>) -> Result<()> {
    let fragment = if link.starts_with('#') { link } else { fragment_of(link) };
    let Some(state) = decode_state_from_fragment(fragment).context("Share link is corrupt")? else {
        bail!("No chart state found in {link}");
    };

    eprintln!(
        "{} chart \"{}\": {} rows, {} columns, {} filters",
        state.chart_type.label(),
        state.title,
        state.rows.len(),
        state.columns.len(),
        state.filters.len()
    );
    emit_series(&state, output)
}

/// Load `file` and apply the chart options on top of the defaults
fn build_state(file: &Path, args: &ChartArgs, settings: &Settings) -> Result<AppState> {
    let loaded = load_file(file, &settings.load_limits())
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let mut state = AppState::new()
        .reduce(Action::SetPalette(
            args.palette.clone().unwrap_or_else(|| settings.palette.clone()),
        ))
        .reduce_with_sample(Action::DataLoaded(loaded.rows), settings.sample_size)
        .reduce(Action::SetChartType(args.chart_type))
        .reduce(Action::SetTitle(args.title.clone().unwrap_or(loaded.name)));

    let assignments = [
        (MappingTarget::X, &args.x),
        (MappingTarget::Y, &args.y),
        (MappingTarget::GroupBy, &args.group_by),
        (MappingTarget::Category, &args.category),
        (MappingTarget::Value, &args.value),
    ];
    for (target, column) in assignments {
        if let Some(column) = column {
            state = state.reduce(Action::AssignColumn {
                target,
                column: column.clone(),
            });
        }
    }
    if let Some(summary) = args.summary {
        state = state.reduce(Action::SetSummary(summary));
    }

    for raw in &args.filters {
        let patch = parse_filter(raw).with_context(|| format!("Invalid filter '{raw}'"))?;
        state = state.reduce(Action::AddFilter);
        let Some(id) = state.filters.last().map(|rule| rule.id.clone()) else {
            continue;
        };
        state = state.reduce(Action::UpdateFilter { id, patch });
    }

    Ok(state)
}

/// Parse `column:op:value[:value2]`
fn parse_filter(raw: &str) -> Result<FilterPatch> {
    let mut parts = raw.splitn(4, ':');
    let (Some(column), Some(op)) = (parts.next(), parts.next()) else {
        bail!("expected column:op:value[:value2]");
    };
    if column.is_empty() {
        bail!("missing column name");
    }
    Ok(FilterPatch {
        column: Some(column.to_string()),
        op: Some(FilterOp::from(op)),
        value: Some(parts.next().unwrap_or_default().to_string()),
        value2: parts.next().map(str::to_string),
    })
}

fn emit_series(state: &AppState, output: Option<&Path>) -> Result<()> {
    let series = state.chart_series();
    match output {
        Some(path) => {
            write_series_json(&series, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(
                "Series written to {} (image export name: {})",
                path.display(),
                export_filename(&state.title)
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&series)?),
    }
    Ok(())
}
