use anyhow::Context;
use clap::Parser;
use small_league::utils::logger;
use small_league::views::{menu, Console};
use small_league::{CliConfig, CsvStorage, League, LeagueError, Settings};
use std::io;

fn report(e: &LeagueError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            report(&e);
        }
    };

    logger::init_cli_logger(settings.verbose);
    tracing::info!("Starting small-league");
    tracing::debug!("Settings: {:?}", settings);

    let storage = CsvStorage::from_config(&settings);
    let mut league = League::new(storage);
    if let Err(e) = league.start() {
        report(&e);
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    menu::run(&mut console, &mut league, settings.page_size).context("console session failed")?;

    if settings.save_on_exit {
        league.save().context("saving league data on exit")?;
        tracing::info!("✅ League data saved on exit");
    }

    println!("Bye!");
    Ok(())
}
