use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod output;

#[derive(Parser, Debug)]
#[command(author, version, about = "EVA Fit ship-fitting utilities")]
struct Cli {
    /// Path to the static data export (falls back to EVAFIT_STATIC_DATA).
    #[arg(long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the catalog for types by name fragment.
    Types {
        /// Name fragment to search for.
        #[arg(long)]
        search: String,
    },
    /// List hull types available in the catalog.
    Hulls,
    /// Show a type's attributes with dictionary names.
    Show {
        /// Type name to display.
        #[arg(long = "type")]
        type_name: String,
    },
    /// Compute the combat profile for a fitting file.
    Report {
        /// Path to the fitting JSON file.
        #[arg(long)]
        fitting: PathBuf,
        /// Target signature radius in meters; supplying it enables applied
        /// damage figures.
        #[arg(long)]
        target_signature: Option<f64>,
        /// Target range in meters.
        #[arg(long, default_value_t = 0.0)]
        target_range: f64,
        /// Target transverse velocity in meters per second.
        #[arg(long, default_value_t = 0.0)]
        target_velocity: f64,
        /// Incoming damage mix as em,thermal,kinetic,explosive.
        #[arg(long)]
        incoming: Option<String>,
        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Types { search } => commands::handle_types(cli.data.as_deref(), &search),
        Command::Hulls => commands::handle_hulls(cli.data.as_deref()),
        Command::Show { type_name } => commands::handle_show(cli.data.as_deref(), &type_name),
        Command::Report {
            fitting,
            target_signature,
            target_range,
            target_velocity,
            incoming,
            json,
        } => commands::handle_report(
            cli.data.as_deref(),
            &fitting,
            commands::TargetArgs {
                signature: target_signature,
                range: target_range,
                velocity: target_velocity,
            },
            incoming.as_deref(),
            json,
        ),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
