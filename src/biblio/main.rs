use biblio::api::BiblioApi;
use biblio::config::StoreSettings;
use biblio::error::{BiblioError, Result};
use biblio::store::remote::RedisStore;
use biblio::store::Keyspace;
use clap::Parser;
use tracing::Level;

mod args;
mod cli;

use args::Cli;
use cli::prompt::Terminal;
use cli::shell::{SessionEnd, Shell};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| {
                BiblioError::Config(format!("could not load {}: {}", path.display(), e))
            })?;
        }
        // A missing .env is fine.
        None => {
            dotenvy::dotenv().ok();
        }
    }

    init_tracing(cli.verbose);

    let settings = StoreSettings::from_env()?;
    tracing::debug!(?settings, "settings loaded");

    let store = RedisStore::connect(&settings)?;
    let api = BiblioApi::new(store, Keyspace::new(settings.prefix.clone()));
    let mut shell = Shell::new(api, Terminal::new()?, std::io::stdout());

    match shell.run()? {
        SessionEnd::Quit => {}
        SessionEnd::Interrupted => println!("\nInterrupted by user. Closing…"),
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
