// crowdfund - run crowdfunding campaigns from the terminal
//
// This is the main entry point. Parses CLI args, sets up logging and config,
// then hands stdin/stdout to the console.

use anyhow::Context;
use crowdfund_lib::{
    core::PasswordHasher, AppConfig, Console, ProjectStore, Session, UserDirectory,
};
use std::env;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("run") => handle_run().await,
        Some("version" | "-v" | "--version") => {
            println!("crowdfund v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some("help" | "-h" | "--help") => {
            print_usage();
            Ok(())
        }
        Some(command) => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

async fn handle_run() -> anyhow::Result<()> {
    let loaded = AppConfig::load();
    let default_level = loaded
        .as_ref()
        .map(|config| config.log_level.as_str())
        .unwrap_or("warn");
    init_logging(default_level);

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Ignoring config file: {}", e);
        AppConfig::default()
    });

    let hasher = PasswordHasher::new(&config.password_policy)
        .context("invalid password policy in config")?;
    let session = Session::new(UserDirectory::new(hasher), ProjectStore::new());

    tracing::info!("Starting crowdfund v{}", env!("CARGO_PKG_VERSION"));

    let mut console = Console::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        session,
        config.currency,
    );
    console.run().await.context("console session failed")?;

    Ok(())
}

// Logs go to stderr so they never mix with the menus on stdout
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!(
        r#"crowdfund v{} - Crowdfunding projects in your terminal

USAGE:
    crowdfund [COMMAND]

COMMANDS:
    run                    Start the interactive menu (default)
    version                Show version
    help                   Show this help

CONFIG:
    ~/.crowdfund/config.json, or the file named by $CROWDFUND_CONFIG.
    Keys: currency, log_level, password_policy.

Nothing is saved: users and projects are gone when you exit.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
