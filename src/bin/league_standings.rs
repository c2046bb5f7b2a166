use clap::Parser;
use small_league::utils::logger;
use small_league::views::{render, ExportFormat};
use small_league::{CliConfig, CsvStorage, League, LeagueError, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "league-standings")]
#[command(about = "Print or export the ranked league table")]
struct Args {
    #[command(flatten)]
    config: CliConfig,

    /// Output format: table, csv, tsv or json
    #[arg(short, long, default_value = "table")]
    format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn run(args: &Args) -> Result<(), LeagueError> {
    let settings = Settings::resolve(&args.config)?;

    if args.log_json {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    let mut league = League::new(CsvStorage::from_config(&settings));
    league.start()?;

    let standings = league.standings();
    let rendered = render(&standings, args.format)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, rendered)?;
            tracing::info!("📁 Standings written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("❌ Export failed: {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code().max(1));
    }
}
